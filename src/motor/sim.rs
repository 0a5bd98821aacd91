//! Simulated smart motor.
//!
//! Each position read advances the simulated shaft by a fixed number of
//! units toward the commanded target, so a routine that polls a simulated
//! motor sees it approach, settle and stop deterministically.

use core::fmt;

use heapless::Vec;

use crate::config::units::Rpm;
use crate::config::MotorConfig;

use super::SmartMotor;

/// Commands recorded by a simulated motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `tare_position()`
    Tare,
    /// `move_relative(displacement, speed)`
    MoveRelative {
        /// Requested displacement
        displacement: i32,
        /// Requested speed
        speed: Rpm,
    },
    /// `move_velocity(velocity)`
    MoveVelocity(Rpm),
}

/// Errors raised by a simulated motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// The motor was unplugged with [`SimulatedMotor::disconnect`].
    Disconnected,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Disconnected => write!(f, "Simulated motor disconnected"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SimError {}

/// Capacity of the command history.
const HISTORY: usize = 64;

/// In-process stand-in for a smart motor.
#[derive(Debug, Clone)]
pub struct SimulatedMotor {
    config: MotorConfig,
    position: i32,
    /// Where the current relative move will come to rest.
    rest: Option<i32>,
    velocity: Rpm,
    /// Units moved per position read.
    step: i32,
    /// Units the motor stops short of a relative move's target.
    undershoot: i32,
    /// Travel after which the shaft jams.
    jam_after: Option<i32>,
    travelled: i32,
    connected: bool,
    history: Vec<Command, HISTORY>,
}

impl SimulatedMotor {
    /// Create a simulated motor at position zero.
    pub fn new(config: MotorConfig) -> Self {
        Self {
            config,
            position: 0,
            rest: None,
            velocity: Rpm::ZERO,
            step: 25,
            undershoot: 0,
            jam_after: None,
            travelled: 0,
            connected: true,
            history: Vec::new(),
        }
    }

    /// Move `units` per position read.
    pub fn with_step(mut self, units: i32) -> Self {
        self.step = units.max(1);
        self
    }

    /// Come to rest `units` short of every relative target.
    pub fn with_undershoot(mut self, units: i32) -> Self {
        self.undershoot = units.max(0);
        self
    }

    /// Jam once the shaft has travelled `units` since the last command.
    pub fn with_jam_after(mut self, units: i32) -> Self {
        self.jam_after = Some(units.max(0));
        self
    }

    /// Unplug the motor; every later call fails.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Construction parameters.
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Last commanded velocity (the speed of the current relative move, or
    /// the constant velocity).
    pub fn velocity(&self) -> Rpm {
        self.velocity
    }

    /// Commands received so far, oldest first.
    pub fn history(&self) -> &[Command] {
        &self.history
    }

    /// Position without advancing the simulation.
    pub fn peek_position(&self) -> i32 {
        self.position
    }

    fn record(&mut self, command: Command) {
        // Oldest entries are kept; later ones are dropped once full
        let _ = self.history.push(command);
    }

    fn check(&self) -> Result<(), SimError> {
        if self.connected {
            Ok(())
        } else {
            Err(SimError::Disconnected)
        }
    }

    fn advance(&mut self) {
        if let Some(limit) = self.jam_after {
            if self.travelled >= limit {
                return;
            }
        }

        let delta = match self.rest {
            Some(rest) => (rest - self.position).clamp(-self.step, self.step),
            None if self.velocity.0 > 0 => self.step,
            None if self.velocity.0 < 0 => -self.step,
            None => 0,
        };

        let delta = match self.jam_after {
            Some(limit) => delta.clamp(-(limit - self.travelled), limit - self.travelled),
            None => delta,
        };

        self.position += delta;
        self.travelled += delta.abs();
    }
}

impl SmartMotor for SimulatedMotor {
    type Error = SimError;

    fn tare_position(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.record(Command::Tare);
        if let Some(rest) = self.rest {
            self.rest = Some(rest - self.position);
        }
        self.position = 0;
        Ok(())
    }

    fn move_relative(&mut self, displacement: i32, speed: Rpm) -> Result<(), Self::Error> {
        self.check()?;
        self.record(Command::MoveRelative { displacement, speed });
        let short = self.undershoot.min(displacement.abs()) * displacement.signum();
        self.rest = Some(self.position + displacement - short);
        self.velocity = speed;
        self.travelled = 0;
        Ok(())
    }

    fn move_velocity(&mut self, velocity: Rpm) -> Result<(), Self::Error> {
        self.check()?;
        self.record(Command::MoveVelocity(velocity));
        self.rest = None;
        self.velocity = velocity;
        self.travelled = 0;
        Ok(())
    }

    fn position(&mut self) -> Result<i32, Self::Error> {
        self.check()?;
        let reading = self.position;
        self.advance();
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EncoderUnits, Gearset, SmartPort};

    fn motor() -> SimulatedMotor {
        let config = MotorConfig::new(SmartPort::new(1).unwrap(), Gearset::Red, false, EncoderUnits::Degrees);
        SimulatedMotor::new(config).with_step(100)
    }

    #[test]
    fn test_relative_move_reaches_target() {
        let mut m = motor();
        m.move_relative(250, Rpm(50)).unwrap();

        let readings: [i32; 5] = core::array::from_fn(|_| m.position().unwrap());
        assert_eq!(readings, [0, 100, 200, 250, 250]);
    }

    #[test]
    fn test_tare_reads_zero() {
        let mut m = motor();
        m.move_relative(300, Rpm(50)).unwrap();
        for _ in 0..5 {
            m.position().unwrap();
        }
        assert_eq!(m.peek_position(), 300);

        m.tare_position().unwrap();
        assert_eq!(m.position().unwrap(), 0);
        assert_eq!(m.position().unwrap(), 0);
    }

    #[test]
    fn test_undershoot_and_reverse() {
        let mut m = motor().with_undershoot(3);
        m.move_relative(-1000, Rpm(50)).unwrap();
        for _ in 0..20 {
            m.position().unwrap();
        }
        assert_eq!(m.peek_position(), -997);
    }

    #[test]
    fn test_jam_stops_travel() {
        let mut m = motor().with_jam_after(150);
        m.move_relative(1000, Rpm(50)).unwrap();
        for _ in 0..10 {
            m.position().unwrap();
        }
        assert_eq!(m.peek_position(), 150);
    }

    #[test]
    fn test_velocity_zero_stops() {
        let mut m = motor();
        m.move_velocity(Rpm(30)).unwrap();
        m.position().unwrap();
        m.position().unwrap();
        m.move_velocity(Rpm::ZERO).unwrap();
        let stopped = m.peek_position();
        m.position().unwrap();
        assert_eq!(m.peek_position(), stopped);
        assert_eq!(m.history().last(), Some(&Command::MoveVelocity(Rpm::ZERO)));
    }

    #[test]
    fn test_disconnected_motor_fails() {
        let mut m = motor();
        m.disconnect();
        assert_eq!(m.position(), Err(SimError::Disconnected));
        assert_eq!(m.move_relative(10, Rpm(10)), Err(SimError::Disconnected));
    }
}
