//! Wheel geometry used to convert travel distance into encoder units.

use core::f32::consts::PI;

use serde::Deserialize;

use super::motor::MotorConfig;
use super::units::Centimeters;
use crate::error::Result;

/// Wheel and external gearing of the drivebase.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WheelGeometry {
    /// Wheel diameter in centimeters.
    #[serde(default = "default_wheel_diameter", rename = "wheel_diameter_cm")]
    pub wheel_diameter: Centimeters,

    /// External gear ratio (motor turns per wheel turn).
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f32,
}

fn default_wheel_diameter() -> Centimeters {
    // 4 inch omni wheel
    Centimeters(10.16)
}

fn default_gear_ratio() -> f32 {
    1.0
}

impl WheelGeometry {
    /// Check that diameter and gear ratio are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWheelDiameter` or
    /// `ConfigError::InvalidGearRatio`.
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_wheels(self)
    }

    /// Distance covered by one wheel revolution.
    pub fn circumference(&self) -> Centimeters {
        Centimeters(PI * self.wheel_diameter.0)
    }

    /// Encoder units the motor must turn to cover `distance`.
    ///
    /// Rounded to the nearest unit; the sign of `distance` is kept.
    pub fn encoder_units_for(&self, distance: Centimeters, motor: &MotorConfig) -> i32 {
        let wheel_turns = distance.0 / self.circumference().0;
        let units = wheel_turns * self.gear_ratio * motor.units_per_revolution();
        libm::roundf(units) as i32
    }
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            wheel_diameter: default_wheel_diameter(),
            gear_ratio: default_gear_ratio(),
        }
    }
}
