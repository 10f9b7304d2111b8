// extensions/easing.rs
//
// Interpolation helpers for smoothed motion.
// Pure math, no dependencies on Entity/Scene.

use glam::Vec3;

/// Frame rate the per-frame smoothing factors are tuned for.
pub const REFERENCE_HZ: f32 = 60.0;

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Rescale a per-frame smoothing factor (tuned at 60 Hz) to a frame of length `dt`.
///
/// At `dt = 1/60` this returns `per_frame` unchanged; two half-length frames
/// cover the same fraction of the remaining distance as one full frame.
#[inline]
pub fn damp_factor(per_frame: f32, dt: f32) -> f32 {
    let keep = (1.0 - per_frame.clamp(0.0, 1.0)).powf(dt.max(0.0) * REFERENCE_HZ);
    1.0 - keep
}

/// Exponentially move `current` toward `target`.
#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, per_frame: f32, dt: f32) -> Vec3 {
    lerp_vec3(current, target, damp_factor(per_frame, dt))
}
