/// Circular-orbit positions: pure math, no engine dependencies.
///
/// f64 throughout so long runs (tens of thousands of days) keep their
/// precision. Conversion to f32 happens when positions enter the scene.

use std::f64::consts::TAU;

use crate::bodies::CelestialBody;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Position in the orbital (XZ) plane after `total_days` simulated days.
/// The star, or anything without a positive period, sits at the origin.
pub fn orbital_position(body: &CelestialBody, total_days: f64) -> (f64, f64) {
    if body.is_star() || body.orbital_period <= 0.0 {
        return (0.0, 0.0);
    }
    let angle = (total_days / body.orbital_period) * TAU;
    let r = body.orbit_radius as f64;
    (angle.cos() * r, angle.sin() * r)
}

/// Distance along the orbit at constant average velocity. Display only.
pub fn distance_traveled_km(velocity_km_s: f64, days: f64) -> f64 {
    velocity_km_s * days * SECONDS_PER_DAY
}

/// Self-rotation advanced by one frame, wrapped to one turn.
pub fn advance_spin(spin: f32, rate: f32, dt: f32) -> f32 {
    (spin + rate * dt).rem_euclid(std::f32::consts::TAU)
}
