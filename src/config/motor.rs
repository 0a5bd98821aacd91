//! Motor configuration from TOML.

use serde::Deserialize;

use super::units::{Rpm, SmartPort};

/// Motor cartridge selecting the internal gear ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Gearset {
    /// 36:1, 100 RPM.
    Red,
    /// 18:1, 200 RPM.
    #[default]
    Green,
    /// 6:1, 600 RPM.
    Blue,
}

impl Gearset {
    /// Maximum output speed of the cartridge.
    pub const fn max_rpm(self) -> Rpm {
        match self {
            Gearset::Red => Rpm(100),
            Gearset::Green => Rpm(200),
            Gearset::Blue => Rpm(600),
        }
    }

    /// Raw encoder counts per output shaft revolution.
    pub const fn counts_per_revolution(self) -> u32 {
        match self {
            Gearset::Red => 1800,
            Gearset::Green => 900,
            Gearset::Blue => 300,
        }
    }
}

/// Unit the motor reports positions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum EncoderUnits {
    /// Degrees of output shaft rotation.
    #[default]
    Degrees,
    /// Whole output shaft rotations.
    Rotations,
    /// Raw encoder counts, which depend on the gearset.
    Counts,
}

impl EncoderUnits {
    /// Encoder units per output shaft revolution.
    pub fn per_revolution(self, gearset: Gearset) -> f32 {
        match self {
            EncoderUnits::Degrees => 360.0,
            EncoderUnits::Rotations => 1.0,
            EncoderUnits::Counts => gearset.counts_per_revolution() as f32,
        }
    }
}

/// Construction parameters of one drive motor.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MotorConfig {
    /// Smart port the motor is plugged into.
    pub port: SmartPort,

    /// Installed cartridge.
    #[serde(default)]
    pub gearset: Gearset,

    /// Spin the other way for positive commands.
    #[serde(default)]
    pub reversed: bool,

    /// Unit of position reads and relative moves.
    #[serde(default)]
    pub encoder_units: EncoderUnits,
}

impl MotorConfig {
    /// Create a motor configuration.
    pub const fn new(port: SmartPort, gearset: Gearset, reversed: bool, encoder_units: EncoderUnits) -> Self {
        Self {
            port,
            gearset,
            reversed,
            encoder_units,
        }
    }

    /// Encoder units per output shaft revolution for this motor.
    pub fn units_per_revolution(&self) -> f32 {
        self.encoder_units.per_revolution(self.gearset)
    }
}
