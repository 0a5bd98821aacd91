//! Error types for drivebase-motion.
//!
//! Provides unified error handling across configuration, motor commands,
//! move-completion waits, speed governing and routine execution.

use core::fmt;

use crate::motor::Side;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all drivebase-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor command or encoder read error
    Motor(MotorError),
    /// Move-completion wait error
    Motion(MotionError),
    /// Speed governor rejected a request
    Speed(SpeedError),
    /// Routine construction or lookup error
    Routine(RoutineError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Smart port outside 1..=21
    InvalidPort(u8),
    /// Both drive motors share a port
    DuplicatePort(u8),
    /// Speed must be > 0
    InvalidSpeed(i32),
    /// Default speed above the configured maximum
    DefaultSpeedExceedsMax {
        /// Configured default speed
        default: i32,
        /// Configured maximum speed
        max: i32,
    },
    /// Maximum speed above what the gearset can deliver
    MaxSpeedExceedsGearset {
        /// Configured maximum speed
        max: i32,
        /// Gearset limit
        gearset_max: i32,
    },
    /// Tolerance must be > 0
    InvalidTolerance(i32),
    /// Poll interval must be > 0
    InvalidPollInterval(u32),
    /// Timeout shorter than a single poll interval
    InvalidTimeout {
        /// Configured timeout
        timeout_ms: u32,
        /// Configured poll interval
        poll_interval_ms: u32,
    },
    /// Wheel diameter must be > 0
    InvalidWheelDiameter(f32),
    /// Gear ratio must be > 0
    InvalidGearRatio(f32),
    /// A required builder field was not set
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor command errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// A move, velocity or tare command was refused
    Command {
        /// Drivebase side of the failing motor
        side: Side,
    },
    /// Reading the encoder position failed
    Sample {
        /// Drivebase side of the failing motor
        side: Side,
    },
}

/// Move-completion wait errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// The deadline passed before the position entered the tolerance window
    Timeout {
        /// Target displacement
        target: i32,
        /// Last observed position farthest from the target
        position: i32,
        /// Time spent polling
        elapsed_ms: u32,
    },
    /// No polled position changed for the stall window
    Stalled {
        /// Target displacement
        target: i32,
        /// Position the motor stopped at
        position: i32,
        /// Time spent polling
        elapsed_ms: u32,
    },
}

/// Speed governor errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedError {
    /// Requested speed is above the configured maximum
    ExceedsLimit {
        /// Requested speed
        requested: i32,
        /// Maximum allowed speed
        max: i32,
    },
}

/// Routine-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutineError {
    /// Routine name not found in configuration
    NotFound(heapless::String<32>),
    /// Routine has no steps
    Empty(heapless::String<32>),
    /// Too many steps for the fixed-capacity step list
    TooManySteps,
    /// A step carries an unusable parameter
    InvalidStep {
        /// Zero-based step index
        index: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Speed(e) => write!(f, "Speed error: {}", e),
            Error::Routine(e) => write!(f, "Routine error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidPort(p) => write!(f, "Invalid smart port: {}. Valid ports: 1-21", p),
            ConfigError::DuplicatePort(p) => write!(f, "Port {} is assigned to both drive motors", p),
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {} RPM. Must be > 0", v),
            ConfigError::DefaultSpeedExceedsMax { default, max } => {
                write!(f, "Default speed {} RPM exceeds maximum {} RPM", default, max)
            }
            ConfigError::MaxSpeedExceedsGearset { max, gearset_max } => {
                write!(f, "Maximum speed {} RPM exceeds gearset limit {} RPM", max, gearset_max)
            }
            ConfigError::InvalidTolerance(v) => write!(f, "Invalid tolerance: {}. Must be > 0", v),
            ConfigError::InvalidPollInterval(v) => {
                write!(f, "Invalid poll interval: {} ms. Must be > 0", v)
            }
            ConfigError::InvalidTimeout { timeout_ms, poll_interval_ms } => write!(
                f,
                "Timeout {} ms is shorter than the poll interval {} ms",
                timeout_ms, poll_interval_ms
            ),
            ConfigError::InvalidWheelDiameter(v) => {
                write!(f, "Invalid wheel diameter: {} cm. Must be > 0", v)
            }
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::Command { side } => write!(f, "{} motor rejected a command", side),
            MotorError::Sample { side } => write!(f, "{} motor position read failed", side),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Timeout { target, position, elapsed_ms } => write!(
                f,
                "Timed out after {} ms waiting for {} (last position {})",
                elapsed_ms, target, position
            ),
            MotionError::Stalled { target, position, elapsed_ms } => write!(
                f,
                "Stalled at {} after {} ms while moving to {}",
                position, elapsed_ms, target
            ),
        }
    }
}

impl fmt::Display for SpeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedError::ExceedsLimit { requested, max } => {
                write!(f, "Requested speed {} RPM exceeds maximum {} RPM", requested, max)
            }
        }
    }
}

impl fmt::Display for RoutineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutineError::NotFound(name) => write!(f, "Routine '{}' not found", name),
            RoutineError::Empty(name) => write!(f, "Routine '{}' has no steps", name),
            RoutineError::TooManySteps => {
                write!(f, "Too many steps (max {})", crate::routine::MAX_STEPS)
            }
            RoutineError::InvalidStep { index } => write!(f, "Step {} has an invalid parameter", index),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<SpeedError> for Error {
    fn from(e: SpeedError) -> Self {
        Error::Speed(e)
    }
}

impl From<RoutineError> for Error {
    fn from(e: RoutineError) -> Self {
        Error::Routine(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for SpeedError {}

#[cfg(feature = "std")]
impl std::error::Error for RoutineError {}
