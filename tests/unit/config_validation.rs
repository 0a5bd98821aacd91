//! Unit tests for configuration validation.

use drivebase_motion::config::{validate_config, Gearset, RobotConfig, RoutineConfig};
use drivebase_motion::error::{ConfigError, Error, RoutineError};
use drivebase_motion::{Centimeters, Rpm, Step};

#[test]
fn test_default_config_is_valid() {
    let config = RobotConfig::default();
    assert!(validate_config(&config).is_ok());
    assert!(config.debug);
    assert!(config.right.reversed);
}

#[test]
fn test_default_above_max() {
    let mut config = RobotConfig::default();
    config.speed.default_speed = Rpm(120);

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DefaultSpeedExceedsMax { default: 120, max: 100 }))
    );
}

#[test]
fn test_max_above_slowest_gearset() {
    let mut config = RobotConfig::default();
    config.left.gearset = Gearset::Blue;
    config.speed.max_speed = Rpm(200);

    // Right motor is still on the red cartridge
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::MaxSpeedExceedsGearset { max: 200, gearset_max: 100 }))
    );
}

#[test]
fn test_non_positive_tolerance() {
    let mut config = RobotConfig::default();
    config.motion.tolerance = 0;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidTolerance(0)))
    );
}

#[test]
fn test_zero_wheel_diameter() {
    let mut config = RobotConfig::default();
    config.wheels.wheel_diameter = Centimeters(0.0);

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidWheelDiameter(_)))
    ));
}

#[test]
fn test_routine_with_non_finite_distance() {
    let mut config = RobotConfig::default();
    let mut routine = RoutineConfig::default();
    routine.steps.push(Step::Tare).unwrap();
    routine
        .steps
        .push(Step::DriveDistance {
            distance_cm: Centimeters(f32::NAN),
            rpm: Rpm(50),
        })
        .unwrap();
    config
        .routines
        .insert(heapless::String::try_from("broken").unwrap(), routine)
        .unwrap();

    assert_eq!(
        validate_config(&config),
        Err(Error::Routine(RoutineError::InvalidStep { index: 1 }))
    );
}
