//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotionSettings, RobotConfig, SpeedLimits, WheelGeometry};

/// Validate a robot configuration.
///
/// Checks:
/// - The two drive motors use different ports
/// - Speeds are positive, default <= maximum <= slowest gearset limit
/// - Tolerance and poll interval are positive, deadlines cover a poll
/// - Wheel diameter and gear ratio are positive
/// - Every routine has at least one usable step
pub fn validate_config(config: &RobotConfig) -> Result<()> {
    if config.left.port == config.right.port {
        return Err(Error::Config(ConfigError::DuplicatePort(config.left.port.number())));
    }

    let gearset_max = config
        .left
        .gearset
        .max_rpm()
        .min(config.right.gearset.max_rpm());
    config.speed.validate(gearset_max)?;
    config.motion.validate()?;
    config.wheels.validate()?;

    for (name, routine) in config.routines.iter() {
        routine.validate(name.as_str())?;
    }

    Ok(())
}

pub(super) fn validate_speed(speed: &SpeedLimits, gearset_max: i32) -> Result<()> {
    if speed.max_speed.0 <= 0 {
        return Err(Error::Config(ConfigError::InvalidSpeed(speed.max_speed.0)));
    }

    if speed.default_speed.0 <= 0 {
        return Err(Error::Config(ConfigError::InvalidSpeed(speed.default_speed.0)));
    }

    if speed.default_speed > speed.max_speed {
        return Err(Error::Config(ConfigError::DefaultSpeedExceedsMax {
            default: speed.default_speed.0,
            max: speed.max_speed.0,
        }));
    }

    if speed.max_speed.0 > gearset_max {
        return Err(Error::Config(ConfigError::MaxSpeedExceedsGearset {
            max: speed.max_speed.0,
            gearset_max,
        }));
    }

    Ok(())
}

pub(super) fn validate_motion(motion: &MotionSettings) -> Result<()> {
    if motion.tolerance <= 0 {
        return Err(Error::Config(ConfigError::InvalidTolerance(motion.tolerance)));
    }

    if motion.poll_interval_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidPollInterval(0)));
    }

    // A deadline shorter than one poll could never observe the motor
    for deadline in [motion.timeout_ms, motion.stall_timeout_ms].into_iter().flatten() {
        if deadline < motion.poll_interval_ms {
            return Err(Error::Config(ConfigError::InvalidTimeout {
                timeout_ms: deadline,
                poll_interval_ms: motion.poll_interval_ms,
            }));
        }
    }

    Ok(())
}

pub(super) fn validate_wheels(wheels: &WheelGeometry) -> Result<()> {
    let diameter = wheels.wheel_diameter.0;
    if !diameter.is_finite() || diameter <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidWheelDiameter(diameter)));
    }

    if !wheels.gear_ratio.is_finite() || wheels.gear_ratio <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidGearRatio(wheels.gear_ratio)));
    }

    Ok(())
}
