//! Robot configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::geometry::WheelGeometry;
use super::motion::MotionSettings;
use super::motor::{EncoderUnits, Gearset, MotorConfig};
use super::speed::SpeedLimits;
use super::units::SmartPort;
use crate::routine::RoutineConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotConfig {
    /// Left drive motor.
    pub left: MotorConfig,

    /// Right drive motor.
    pub right: MotorConfig,

    /// Cruise and maximum speeds.
    #[serde(default)]
    pub speed: SpeedLimits,

    /// Tolerance window and polling policy.
    #[serde(default)]
    pub motion: MotionSettings,

    /// Wheel geometry for distance drives.
    #[serde(default)]
    pub wheels: WheelGeometry,

    /// Log extra detail around collaborator calls.
    #[serde(default = "default_debug")]
    pub debug: bool,

    /// Named step sequences.
    #[serde(default)]
    pub routines: FnvIndexMap<String<32>, RoutineConfig, 8>,
}

fn default_debug() -> bool {
    true
}

impl RobotConfig {
    /// Get a routine configuration by name.
    pub fn routine(&self, name: &str) -> Option<&RoutineConfig> {
        self.routines
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all routine names.
    pub fn routine_names(&self) -> impl Iterator<Item = &str> {
        self.routines.keys().map(|s| s.as_str())
    }
}

impl Default for RobotConfig {
    /// Two red-cartridge motors on ports 1 and 10, the right one reversed so
    /// that positive displacements drive the robot forward.
    fn default() -> Self {
        Self {
            left: MotorConfig::new(
                SmartPort::new_unchecked(1),
                Gearset::Red,
                false,
                EncoderUnits::Degrees,
            ),
            right: MotorConfig::new(
                SmartPort::new_unchecked(10),
                Gearset::Red,
                true,
                EncoderUnits::Degrees,
            ),
            speed: SpeedLimits::default(),
            motion: MotionSettings::default(),
            wheels: WheelGeometry::default(),
            debug: default_debug(),
            routines: FnvIndexMap::new(),
        }
    }
}
