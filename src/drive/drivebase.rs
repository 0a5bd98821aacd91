//! Two-motor drivebase.
//!
//! Owns the left and right motors and the delay provider. Every move is
//! governed, issued as a relative move on the motor(s) and then waited on
//! until the polled encoder(s) enter the tolerance window.

use core::fmt;

use embedded_hal::delay::DelayNs;
use tracing::{debug, warn};

use crate::config::units::Rpm;
use crate::config::{MotionSettings, MotorConfig, SpeedLimits, WaitOn, WheelGeometry};
use crate::error::{Error, MotorError, Result};
use crate::governor::SpeedGovernor;
use crate::motion::{wait_until_settled, ToleranceWindow};
use crate::motor::{Side, SmartMotor};

/// Positions observed when a move completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    /// Left encoder at the completing poll.
    pub left: i32,
    /// Right encoder at the completing poll, when it was polled.
    pub right: Option<i32>,
    /// Speed actually commanded.
    pub speed: Rpm,
    /// Position reads taken.
    pub polls: u32,
    /// Time spent polling.
    pub elapsed_ms: u32,
}

/// Left and right smart motors plus the delay used between polls.
pub struct Drivebase<L, R, D>
where
    L: SmartMotor,
    R: SmartMotor,
    D: DelayNs,
{
    left: L,
    right: R,
    delay: D,
    left_config: MotorConfig,
    right_config: MotorConfig,
    default_speed: Rpm,
    governor: SpeedGovernor,
    motion: MotionSettings,
    wheels: WheelGeometry,
    debug: bool,
}

impl<L, R, D> Drivebase<L, R, D>
where
    L: SmartMotor,
    R: SmartMotor,
    D: DelayNs,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        left: L,
        right: R,
        delay: D,
        left_config: MotorConfig,
        right_config: MotorConfig,
        speed: SpeedLimits,
        motion: MotionSettings,
        wheels: WheelGeometry,
        debug: bool,
    ) -> Self {
        Self {
            left,
            right,
            delay,
            left_config,
            right_config,
            default_speed: speed.default_speed,
            governor: SpeedGovernor::from_limits(&speed),
            motion,
            wheels,
            debug,
        }
    }

    /// Left motor.
    #[inline]
    pub fn left(&self) -> &L {
        &self.left
    }

    /// Right motor.
    #[inline]
    pub fn right(&self) -> &R {
        &self.right
    }

    /// Left motor, mutably.
    #[inline]
    pub fn left_mut(&mut self) -> &mut L {
        &mut self.left
    }

    /// Right motor, mutably.
    #[inline]
    pub fn right_mut(&mut self) -> &mut R {
        &mut self.right
    }

    /// Left motor construction parameters.
    #[inline]
    pub fn left_config(&self) -> &MotorConfig {
        &self.left_config
    }

    /// Right motor construction parameters.
    #[inline]
    pub fn right_config(&self) -> &MotorConfig {
        &self.right_config
    }

    /// Cruise speed routines start from and return to.
    #[inline]
    pub fn default_speed(&self) -> Rpm {
        self.default_speed
    }

    /// Speed governor applied to every move.
    #[inline]
    pub fn governor(&self) -> &SpeedGovernor {
        &self.governor
    }

    /// Tolerance and polling settings.
    #[inline]
    pub fn motion(&self) -> &MotionSettings {
        &self.motion
    }

    /// Wheel geometry.
    #[inline]
    pub fn wheels(&self) -> &WheelGeometry {
        &self.wheels
    }

    /// Whether debug logging is enabled.
    #[inline]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Release the motors and the delay provider.
    pub fn into_parts(self) -> (L, R, D) {
        (self.left, self.right, self.delay)
    }

    /// Zero both encoders.
    pub fn tare(&mut self) -> Result<()> {
        self.left.tare_position().map_err(command_failed(Side::Left))?;
        self.right.tare_position().map_err(command_failed(Side::Right))?;
        Ok(())
    }

    /// Read both encoders.
    pub fn positions(&mut self) -> Result<(i32, i32)> {
        let left = self.left.position().map_err(sample_failed(Side::Left))?;
        let right = self.right.position().map_err(sample_failed(Side::Right))?;
        Ok((left, right))
    }

    /// Move both motors `displacement` units and wait for completion.
    ///
    /// The right motor is commanded first. The wait polls the left motor, or
    /// both when the settings say [`WaitOn::Both`].
    pub fn drive_relative(&mut self, displacement: i32, speed: Rpm) -> Result<Moved> {
        let speed = self.governor.govern(speed)?.speed;
        debug!(displacement, rpm = speed.0, "drive relative");

        self.right
            .move_relative(displacement, speed)
            .map_err(command_failed(Side::Right))?;
        self.left
            .move_relative(displacement, speed)
            .map_err(command_failed(Side::Left))?;

        let window = ToleranceWindow::new(displacement, self.motion.tolerance);
        match self.motion.wait_on {
            WaitOn::Left => self.wait_left(window, speed),
            WaitOn::Both => {
                let left = &mut self.left;
                let right = &mut self.right;
                let settled = wait_until_settled(&mut self.delay, window, &self.motion, || {
                    let l = left.position().map_err(sample_failed(Side::Left))?;
                    let r = right.position().map_err(sample_failed(Side::Right))?;
                    Ok([l, r])
                })?;
                Ok(Moved {
                    left: settled.positions[0],
                    right: Some(settled.positions[1]),
                    speed,
                    polls: settled.polls,
                    elapsed_ms: settled.elapsed_ms,
                })
            }
        }
    }

    /// Move the left motor only, pivoting the robot, and wait for completion.
    pub fn turn(&mut self, displacement: i32, speed: Rpm) -> Result<Moved> {
        let speed = self.governor.govern(speed)?.speed;
        debug!(displacement, rpm = speed.0, "turn");

        self.left
            .move_relative(displacement, speed)
            .map_err(command_failed(Side::Left))?;

        let window = ToleranceWindow::new(displacement, self.motion.tolerance);
        self.wait_left(window, speed)
    }

    /// Command zero velocity on both motors.
    pub fn stop(&mut self) -> Result<()> {
        self.left
            .move_velocity(Rpm::ZERO)
            .map_err(command_failed(Side::Left))?;
        self.right
            .move_velocity(Rpm::ZERO)
            .map_err(command_failed(Side::Right))?;
        Ok(())
    }

    fn wait_left(&mut self, window: ToleranceWindow, speed: Rpm) -> Result<Moved> {
        let left = &mut self.left;
        let settled = wait_until_settled(&mut self.delay, window, &self.motion, || {
            Ok([left.position().map_err(sample_failed(Side::Left))?])
        })?;
        Ok(Moved {
            left: settled.positions[0],
            right: None,
            speed,
            polls: settled.polls,
            elapsed_ms: settled.elapsed_ms,
        })
    }
}

fn command_failed<E: fmt::Debug>(side: Side) -> impl FnOnce(E) -> Error {
    move |e| {
        warn!(%side, error = ?e, "motor command failed");
        MotorError::Command { side }.into()
    }
}

fn sample_failed<E: fmt::Debug>(side: Side) -> impl FnOnce(E) -> Error {
    move |e| {
        warn!(%side, error = ?e, "motor position read failed");
        MotorError::Sample { side }.into()
    }
}
