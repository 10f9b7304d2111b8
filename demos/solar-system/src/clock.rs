/// Simulated time: a day counter advanced once per frame, with optional
/// bounded runs that stop exactly on their target.

/// Days of simulated time per real second at speed 1.
pub const DEFAULT_DAYS_PER_SECOND: f64 = 5.0;
pub const DEFAULT_SPEED_MIN: f64 = 0.1;
pub const DEFAULT_SPEED_MAX: f64 = 10.0;

/// Calendar approximation used when composing run lengths.
const DAYS_PER_YEAR: f64 = 365.0;
const DAYS_PER_MONTH: f64 = 30.0;

/// Requested length of a bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunLength {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl RunLength {
    pub fn new(years: u32, months: u32, days: u32) -> Self {
        Self { years, months, days }
    }

    /// Build from raw UI floats. Negative, fractional or non-numeric
    /// components are coerced (NaN/negative → 0, fractions truncated).
    pub fn from_raw(years: f32, months: f32, days: f32) -> Self {
        Self::new(coerce(years), coerce(months), coerce(days))
    }

    pub fn total_days(&self) -> f64 {
        self.years as f64 * DAYS_PER_YEAR + self.months as f64 * DAYS_PER_MONTH + self.days as f64
    }

    pub fn is_zero(&self) -> bool {
        self.total_days() == 0.0
    }
}

fn coerce(value: f32) -> u32 {
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}

/// What the overlay needs to know about the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub total_days_floor: u64,
    pub running: bool,
    pub just_finished: bool,
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    total_days: f64,
    /// 0 = unbounded.
    target_days: f64,
    running: bool,
    speed: f64,
    just_finished: bool,
    days_per_second: f64,
    speed_min: f64,
    speed_max: f64,
}

impl SimulationClock {
    pub fn new(days_per_second: f64) -> Self {
        Self {
            total_days: 0.0,
            target_days: 0.0,
            running: false,
            speed: 1.0,
            just_finished: false,
            days_per_second,
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
        }
    }

    pub fn with_speed_range(mut self, min: f64, max: f64) -> Self {
        self.set_speed_range(min, max);
        self
    }

    pub fn set_speed_range(&mut self, min: f64, max: f64) {
        self.speed_min = min;
        self.speed_max = max;
        self.speed = self.speed.clamp(min, max);
    }

    pub fn set_days_per_second(&mut self, days_per_second: f64) {
        self.days_per_second = days_per_second;
    }

    /// Advance by one frame. Returns true when this call completed a bounded run.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        let dt = if dt.is_finite() { dt.max(0.0) as f64 } else { 0.0 };
        self.total_days += self.days_per_second * self.speed * dt;

        if self.target_days > 0.0 && self.total_days >= self.target_days {
            self.total_days = self.target_days;
            self.target_days = 0.0;
            self.running = false;
            self.just_finished = true;
            return true;
        }
        false
    }

    /// Start running. A positive `extra_days` bounds the run to that many
    /// days from now; otherwise any existing target is kept.
    pub fn start(&mut self, extra_days: f64) {
        if extra_days.is_finite() && extra_days > 0.0 {
            self.target_days = self.total_days + extra_days;
        }
        self.running = true;
    }

    /// Pause. The target survives so a later start resumes the same run.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Play/stop button: stop if running, otherwise start with `extra_days`.
    pub fn toggle(&mut self, extra_days: f64) {
        if self.running {
            self.stop();
        } else {
            self.start(extra_days);
        }
    }

    /// Back to day zero. Speed is kept.
    pub fn reset(&mut self) {
        self.total_days = 0.0;
        self.target_days = 0.0;
        self.running = false;
        self.just_finished = false;
    }

    /// Finite positive values are clamped into the speed range; anything
    /// else is ignored. Returns whether the value was accepted.
    pub fn set_speed(&mut self, value: f64) -> bool {
        if !value.is_finite() || value <= 0.0 {
            return false;
        }
        self.speed = value.clamp(self.speed_min, self.speed_max);
        true
    }

    /// One-shot read of the finished flag.
    pub fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.just_finished)
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            total_days_floor: self.total_days.floor() as u64,
            running: self.running,
            just_finished: self.just_finished,
        }
    }

    pub fn total_days(&self) -> f64 {
        self.total_days
    }

    pub fn target_days(&self) -> f64 {
        self.target_days
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_DAYS_PER_SECOND)
    }
}
