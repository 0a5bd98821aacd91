//! Configuration module for drivebase-motion.
//!
//! Provides types for loading and validating drive motor, speed and motion
//! settings from TOML files (with `std` feature) or compiled-in defaults.

mod geometry;
mod motion;
pub mod motor;
mod speed;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use geometry::WheelGeometry;
pub use motion::{MotionSettings, WaitOn};
pub use motor::{EncoderUnits, Gearset, MotorConfig};
pub use speed::{SpeedLimits, SpeedPolicy};
pub use system::RobotConfig;
pub use validation::validate_config;

pub use crate::routine::RoutineConfig;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Centimeters, Rpm, SmartPort};
