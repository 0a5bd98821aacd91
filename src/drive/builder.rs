//! Builder pattern for Drivebase.

use embedded_hal::delay::DelayNs;

use crate::config::{MotionSettings, MotorConfig, RobotConfig, SpeedLimits, WheelGeometry};
use crate::error::{ConfigError, Error, Result};
use crate::motor::SmartMotor;

use super::drivebase::Drivebase;

/// Builder for creating Drivebase instances.
pub struct DrivebaseBuilder<L, R, D>
where
    L: SmartMotor,
    R: SmartMotor,
    D: DelayNs,
{
    left: Option<L>,
    right: Option<R>,
    delay: Option<D>,
    left_config: MotorConfig,
    right_config: MotorConfig,
    speed: SpeedLimits,
    motion: MotionSettings,
    wheels: WheelGeometry,
    debug: bool,
}

impl<L, R, D> Default for DrivebaseBuilder<L, R, D>
where
    L: SmartMotor,
    R: SmartMotor,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<L, R, D> DrivebaseBuilder<L, R, D>
where
    L: SmartMotor,
    R: SmartMotor,
    D: DelayNs,
{
    /// Create a new builder with the compiled-in defaults.
    pub fn new() -> Self {
        let defaults = RobotConfig::default();
        Self {
            left: None,
            right: None,
            delay: None,
            left_config: defaults.left,
            right_config: defaults.right,
            speed: defaults.speed,
            motion: defaults.motion,
            wheels: defaults.wheels,
            debug: defaults.debug,
        }
    }

    /// Set the left motor.
    pub fn left(mut self, motor: L) -> Self {
        self.left = Some(motor);
        self
    }

    /// Set the right motor.
    pub fn right(mut self, motor: R) -> Self {
        self.right = Some(motor);
        self
    }

    /// Set the delay provider used between polls.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the speed limits.
    pub fn speed_limits(mut self, speed: SpeedLimits) -> Self {
        self.speed = speed;
        self
    }

    /// Set the tolerance window and polling policy.
    pub fn motion(mut self, motion: MotionSettings) -> Self {
        self.motion = motion;
        self
    }

    /// Set the wheel geometry.
    pub fn wheels(mut self, wheels: WheelGeometry) -> Self {
        self.wheels = wheels;
        self
    }

    /// Enable debug logging.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Configure everything but the hardware from a RobotConfig.
    pub fn from_config(mut self, config: &RobotConfig) -> Self {
        self.left_config = config.left;
        self.right_config = config.right;
        self.speed = config.speed;
        self.motion = config.motion;
        self.wheels = config.wheels;
        self.debug = config.debug;
        self
    }

    /// Build the Drivebase.
    ///
    /// # Errors
    ///
    /// Returns an error if a motor or the delay provider is missing, if both
    /// motors share a port, or if the speed, motion or wheel settings fail
    /// validation.
    pub fn build(self) -> Result<Drivebase<L, R, D>> {
        let left = self
            .left
            .ok_or(Error::Config(ConfigError::MissingField("left motor")))?;
        let right = self
            .right
            .ok_or(Error::Config(ConfigError::MissingField("right motor")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;

        if self.left_config.port == self.right_config.port {
            return Err(Error::Config(ConfigError::DuplicatePort(
                self.left_config.port.number(),
            )));
        }

        let gearset_max = self
            .left_config
            .gearset
            .max_rpm()
            .min(self.right_config.gearset.max_rpm());
        self.speed.validate(gearset_max)?;
        self.motion.validate()?;
        self.wheels.validate()?;

        Ok(Drivebase::new(
            left,
            right,
            delay,
            self.left_config,
            self.right_config,
            self.speed,
            self.motion,
            self.wheels,
            self.debug,
        ))
    }
}
