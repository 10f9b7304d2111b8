/// Runtime-tunable simulation settings, loadable as JSON through
/// `game_load_config`. Every field has a default, so partial documents work.

use serde::{Deserialize, Serialize};

use crate::camera_rig::RigSettings;
use crate::clock::{DEFAULT_DAYS_PER_SECOND, DEFAULT_SPEED_MAX, DEFAULT_SPEED_MIN};

/// Errors that can occur when parsing or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] serde_json::Error),

    /// A value parsed but is out of its allowed range.
    #[error("invalid config value `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: &'static str },
}

/// Pointer and wheel handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Camera distance limits from the look-at target.
    pub min_distance: f32,
    pub max_distance: f32,
    /// Distance change per wheel delta unit.
    pub wheel_step: f32,
    /// Pointer travel (NDC) before a press becomes a drag instead of a click.
    pub drag_threshold: f32,
    /// Radians of orbit per NDC unit dragged.
    pub orbit_sensitivity: f32,
    /// Pick sphere for the star; planets use `max(radius * factor, min)`.
    pub star_hit_radius: f32,
    pub planet_hit_factor: f32,
    pub planet_hit_min: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 400.0,
            wheel_step: 0.05,
            drag_threshold: 0.01,
            orbit_sensitivity: std::f32::consts::PI,
            star_hit_radius: 14.0,
            planet_hit_factor: 3.0,
            planet_hit_min: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub days_per_second: f64,
    pub initial_speed: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    /// Rate of CLOCK / SELECTION events.
    pub snapshot_hz: f32,
    pub camera: RigSettings,
    pub controls: ControlSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days_per_second: DEFAULT_DAYS_PER_SECOND,
            initial_speed: 1.0,
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            snapshot_hz: 5.0,
            camera: RigSettings::default(),
            controls: ControlSettings::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { field, reason: "must be a positive number" })
            }
        }
        fn fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { field, reason: "must be in (0, 1]" })
            }
        }

        positive("days_per_second", self.days_per_second)?;
        positive("initial_speed", self.initial_speed)?;
        positive("speed_min", self.speed_min)?;
        positive("speed_max", self.speed_max)?;
        if self.speed_min > self.speed_max {
            return Err(ConfigError::InvalidValue { field: "speed_min", reason: "must not exceed speed_max" });
        }
        positive("snapshot_hz", self.snapshot_hz as f64)?;

        fraction("camera.target_smoothing", self.camera.target_smoothing)?;
        fraction("camera.position_smoothing", self.camera.position_smoothing)?;
        positive("camera.arrive_distance", self.camera.arrive_distance as f64)?;
        if self.camera.overview_eye.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidValue { field: "camera.overview_eye", reason: "must be finite" });
        }

        positive("controls.min_distance", self.controls.min_distance as f64)?;
        positive("controls.max_distance", self.controls.max_distance as f64)?;
        if self.controls.min_distance > self.controls.max_distance {
            return Err(ConfigError::InvalidValue {
                field: "controls.min_distance",
                reason: "must not exceed controls.max_distance",
            });
        }
        Ok(())
    }
}
