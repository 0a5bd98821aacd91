//! Speed limit configuration and types.

use serde::Deserialize;

use super::units::Rpm;
use crate::error::Result;

/// Policy for handling requests above the maximum speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Clamp the request to the maximum and log the event.
    #[default]
    Clamp,
    /// Reject the request with an error.
    Reject,
}

/// Cruise speed settings shared by every move.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpeedLimits {
    /// Speed used when a routine restores the default.
    #[serde(default = "default_speed", rename = "default_rpm")]
    pub default_speed: Rpm,

    /// Ceiling applied to every commanded speed.
    #[serde(default = "max_speed", rename = "max_rpm")]
    pub max_speed: Rpm,

    /// What to do when a request exceeds the ceiling.
    #[serde(default)]
    pub policy: SpeedPolicy,
}

fn default_speed() -> Rpm {
    Rpm(50)
}

fn max_speed() -> Rpm {
    Rpm(100)
}

impl SpeedLimits {
    /// Create new speed limits.
    pub const fn new(default_speed: Rpm, max_speed: Rpm, policy: SpeedPolicy) -> Self {
        Self {
            default_speed,
            max_speed,
            policy,
        }
    }

    /// Check the limits against the slowest gearset's top speed.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for non-positive speeds, a default above the
    /// maximum, or a maximum above `gearset_max`.
    pub fn validate(&self, gearset_max: Rpm) -> Result<()> {
        super::validation::validate_speed(self, gearset_max.0)
    }
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self::new(default_speed(), max_speed(), SpeedPolicy::Clamp)
    }
}
