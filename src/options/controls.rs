use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit Controls", inline)]
#[serde(default)]
/// Orbit controller behavior: damping, enabled gestures, and clamps.
pub struct ControlsOptions {
    /// Keep rotating with decaying velocity after the pointer is released.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied (and removed) per frame.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Allow drag-to-rotate.
    #[schemars(title = "Rotate")]
    pub enable_rotate: bool,
    /// Allow wheel zoom (dolly).
    #[schemars(title = "Zoom")]
    pub enable_zoom: bool,
    /// Allow secondary-button panning of the orbit target.
    #[schemars(title = "Pan")]
    pub enable_pan: bool,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 3.0), extend("step" = 0.1))]
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 3.0), extend("step" = 0.1))]
    pub pan_speed: f32,
    /// Spin around the globe without input.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Auto-rotate speed; 2.0 is one turn per 30 seconds at 60 fps.
    #[schemars(title = "Auto Rotate Speed", range(min = -10.0, max = 10.0), extend("step" = 0.1))]
    pub auto_rotate_speed: f32,
    /// Closest allowed camera distance from the target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed camera distance from the target.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Smallest polar angle (radians from the +Y axis).
    #[schemars(skip)]
    pub min_polar_angle: f32,
    /// Largest polar angle (radians from the +Y axis).
    #[schemars(skip)]
    pub max_polar_angle: f32,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            enable_rotate: true,
            enable_zoom: false,
            enable_pan: false,
            rotate_speed: 0.8,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            min_distance: 200.0,
            max_distance: 500.0,
            min_polar_angle: PI / 3.5,
            max_polar_angle: PI - PI / 3.0,
        }
    }
}

impl ControlsOptions {
    /// Check the clamp ranges and speeds the orbit controller relies on.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        ordered_range(
            "min_polar_angle",
            self.min_polar_angle,
            "max_polar_angle",
            self.max_polar_angle,
        )?;
        ordered_range(
            "min_distance",
            self.min_distance,
            "max_distance",
            self.max_distance,
        )?;
        if self.damping_factor.is_nan()
            || self.damping_factor <= 0.0
            || self.damping_factor > 1.0
        {
            return Err(format!(
                "damping_factor {} is outside (0, 1]",
                self.damping_factor
            ));
        }
        for (name, value) in [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("pan_speed", self.pan_speed),
            ("auto_rotate_speed", self.auto_rotate_speed),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} {value} is not finite"));
            }
        }
        Ok(())
    }
}

/// `min <= max`, both finite.
fn ordered_range(
    min_name: &str,
    min: f32,
    max_name: &str,
    max: f32,
) -> Result<(), String> {
    if !min.is_finite() || !max.is_finite() {
        return Err(format!(
            "{min_name} {min} and {max_name} {max} must be finite"
        ));
    }
    if min > max {
        return Err(format!("{min_name} {min} exceeds {max_name} {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ControlsOptions::default().validate().is_ok());
    }

    #[test]
    fn inverted_polar_range_is_rejected() {
        let options = ControlsOptions {
            min_polar_angle: 2.0,
            max_polar_angle: 1.0,
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.contains("min_polar_angle"));
    }

    #[test]
    fn inverted_or_nan_distance_is_rejected() {
        let inverted = ControlsOptions {
            min_distance: 500.0,
            max_distance: 200.0,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        let nan = ControlsOptions {
            max_distance: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn zero_damping_is_rejected() {
        let options = ControlsOptions {
            damping_factor: 0.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
