/// Variable-timestep frame timer.
/// The simulation is frame-rate independent by scaling with elapsed time,
/// so each frame runs exactly one update with a sanitized delta.
pub struct FrameTimer {
    /// Largest delta a single frame may report (seconds).
    max_dt: f32,
    /// Total sanitized time since start (seconds).
    elapsed: f64,
    /// Number of frames ticked.
    frames: u64,
}

impl FrameTimer {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Register a frame. Returns the delta to simulate with:
    /// negative or non-finite deltas become zero, long stalls (hidden tab) are capped.
    pub fn tick(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };
        self.elapsed += dt as f64;
        self.frames += 1;
        dt
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

/// Rate limiter for work that should not run every frame
/// (e.g. pushing display snapshots to the UI a few times per second).
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: f32,
    accumulator: f32,
}

impl Throttle {
    /// A throttle firing `hz` times per second. Fires on the first tick.
    pub fn new(hz: f32) -> Self {
        let interval = if hz > 0.0 { 1.0 / hz } else { 0.0 };
        Self {
            interval,
            accumulator: interval,
        }
    }

    /// Advance by `dt`; returns true when the interval has elapsed.
    /// Missed intervals are dropped, never queued.
    pub fn ready(&mut self, dt: f32) -> bool {
        self.accumulator += dt.max(0.0);
        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            if self.accumulator >= self.interval {
                self.accumulator = 0.0;
            }
            true
        } else {
            false
        }
    }

    /// Force the next `ready` call to fire.
    pub fn prime(&mut self) {
        self.accumulator = self.interval;
    }
}
