//! # drivebase-motion
//!
//! Position-based motion for a two-motor robot drivebase, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Move completion**: Relative moves return once the polled encoder is
//!   inside an open tolerance window around the target
//! - **Bounded waits**: Optional timeout and stall detection on every wait
//! - **Speed governor**: Requested speeds are clamped (or rejected) at a ceiling
//! - **Routines**: Scripted step sequences, built in code or declared in TOML
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drivebase_motion::{DrivebaseBuilder, Routine, RobotConfig};
//!
//! let config: RobotConfig = drivebase_motion::load_config("robot.toml")?;
//!
//! let mut drivebase = DrivebaseBuilder::new()
//!     .from_config(&config)
//!     .left(left_motor)
//!     .right(right_motor)
//!     .delay(delay)
//!     .build()?;
//!
//! let report = Routine::template().run(&mut drivebase)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Derives `defmt::Format` on plain data types for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Heapless strings inside ConfigError make Error large
#![allow(clippy::result_large_err)]

pub mod config;
pub mod drive;
pub mod error;
pub mod governor;
pub mod motion;
pub mod motor;
pub mod routine;

pub use config::{validate_config, MotionSettings, MotorConfig, RobotConfig, SpeedLimits};
pub use drive::{DistanceDrive, Drivebase, DrivebaseBuilder, Moved};
pub use error::{Error, Result};
pub use governor::{clamp_speed, SpeedGovernor};
pub use motion::{wait_until_settled, Settled, ToleranceWindow};
pub use motor::{Side, SmartMotor};
pub use routine::{Routine, RoutineReport, Step};

#[cfg(feature = "std")]
pub use config::load_config;

pub use config::units::{Centimeters, Rpm, SmartPort};
