//! Unit types for physical quantities.
//!
//! Provides type-safe representations of motor speed, travel distance and
//! smart port numbers to prevent unit confusion at compile time.

use core::fmt;

use serde::Deserialize;

use crate::error::ConfigError;

/// Motor speed in revolutions per minute.
///
/// Direction is carried by the sign of the displacement passed to a move, not
/// by the sign of the speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Rpm(pub i32);

impl Rpm {
    /// Stopped.
    pub const ZERO: Self = Self(0);
}

impl fmt::Display for Rpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} RPM", self.0)
    }
}

/// Linear travel distance in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f32);

/// Smart port number on the brain (1 to 21).
///
/// Validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmartPort(u8);

impl SmartPort {
    /// Lowest port number.
    pub const MIN: u8 = 1;
    /// Highest port number.
    pub const MAX: u8 = 21;

    /// Create a new SmartPort with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPort` if the number is outside 1..=21.
    pub fn new(number: u8) -> Result<Self, ConfigError> {
        if number >= Self::MIN && number <= Self::MAX {
            Ok(Self(number))
        } else {
            Err(ConfigError::InvalidPort(number))
        }
    }

    /// Create a SmartPort from a number already known to be in range.
    pub(crate) const fn new_unchecked(number: u8) -> Self {
        Self(number)
    }

    /// Get the port number.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SmartPort {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for SmartPort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u8::deserialize(deserializer)?;
        SmartPort::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Rpm.
    fn rpm(self) -> Rpm;
}

impl UnitExt for i32 {
    #[inline]
    fn rpm(self) -> Rpm {
        Rpm(self)
    }
}
