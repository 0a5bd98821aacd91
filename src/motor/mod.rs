//! Motor module for drivebase-motion.
//!
//! Defines the smart motor interface the drivebase commands, and a simulated
//! motor for running routines without hardware.

use core::fmt;

use crate::config::units::Rpm;

mod sim;

pub use sim::{Command, SimError, SimulatedMotor};

/// Drivebase side a motor is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    /// Left drive motor.
    Left,
    /// Right drive motor.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

/// A motor with an integrated encoder and velocity controller.
///
/// Positions and displacements are in the motor's configured encoder units.
/// The motor's own controller runs the move; callers only issue commands and
/// read positions.
pub trait SmartMotor {
    /// Error returned by the hardware layer.
    type Error: fmt::Debug;

    /// Make the current position read as zero.
    fn tare_position(&mut self) -> Result<(), Self::Error>;

    /// Start moving `displacement` units from the current position at `speed`.
    ///
    /// Returns as soon as the command is accepted.
    fn move_relative(&mut self, displacement: i32, speed: Rpm) -> Result<(), Self::Error>;

    /// Run at a constant velocity. `Rpm::ZERO` stops the motor.
    fn move_velocity(&mut self, velocity: Rpm) -> Result<(), Self::Error>;

    /// Current position relative to the last tare.
    fn position(&mut self) -> Result<i32, Self::Error>;
}

impl<M: SmartMotor + ?Sized> SmartMotor for &mut M {
    type Error = M::Error;

    #[inline]
    fn tare_position(&mut self) -> Result<(), Self::Error> {
        M::tare_position(self)
    }

    #[inline]
    fn move_relative(&mut self, displacement: i32, speed: Rpm) -> Result<(), Self::Error> {
        M::move_relative(self, displacement, speed)
    }

    #[inline]
    fn move_velocity(&mut self, velocity: Rpm) -> Result<(), Self::Error> {
        M::move_velocity(self, velocity)
    }

    #[inline]
    fn position(&mut self) -> Result<i32, Self::Error> {
        M::position(self)
    }
}
