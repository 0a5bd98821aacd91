//! Unit tests for TOML configuration parsing.

use drivebase_motion::config::{
    load_config, parse_config, EncoderUnits, Gearset, RobotConfig, SpeedPolicy, WaitOn,
};
use drivebase_motion::error::{ConfigError, Error};
use drivebase_motion::{Centimeters, Rpm, Step};

/// Test parsing drive motors with every field set.
#[test]
fn test_parse_motor_config() {
    let toml_str = r#"
[left]
port = 2
gearset = "green"
reversed = false
encoder_units = "rotations"

[right]
port = 9
gearset = "green"
reversed = true
encoder_units = "rotations"
"#;

    let config: RobotConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.left.port.number(), 2);
    assert_eq!(config.right.port.number(), 9);
    assert_eq!(config.left.gearset, Gearset::Green);
    assert_eq!(config.left.encoder_units, EncoderUnits::Rotations);
    assert!(!config.left.reversed);
    assert!(config.right.reversed);
}

/// Test that omitted sections fall back to their defaults.
#[test]
fn test_defaults_for_omitted_sections() {
    let toml_str = r#"
[left]
port = 1

[right]
port = 10
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.speed.default_speed, Rpm(50));
    assert_eq!(config.speed.max_speed, Rpm(100));
    assert_eq!(config.speed.policy, SpeedPolicy::Clamp);
    assert_eq!(config.motion.tolerance, 5);
    assert_eq!(config.motion.poll_interval_ms, 2);
    assert_eq!(config.motion.timeout_ms, Some(10_000));
    assert_eq!(config.motion.wait_on, WaitOn::Left);
    assert_eq!(config.wheels.wheel_diameter, Centimeters(10.16));
    assert_eq!(config.routines.len(), 0);
    assert_eq!(config.debug, RobotConfig::default().debug);
    assert!(config.debug);
}

/// Test parsing a routine that uses every step kind.
#[test]
fn test_parse_routine_steps() {
    let toml_str = r#"
[left]
port = 1

[right]
port = 10

[routines.demo]
steps = [
    { set_speed = 25 },
    "tare",
    { drive = 1000 },
    { report = "After forward" },
    { turn = 1000 },
    "default_speed",
    "stop",
    { drive_distance = { distance_cm = 100.0, rpm = 65 } },
]
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");
    let routine = config.routine("demo").expect("Routine not found");

    assert_eq!(
        routine.steps.as_slice(),
        &[
            Step::SetSpeed(Rpm(25)),
            Step::Tare,
            Step::Drive(1000),
            Step::report("After forward"),
            Step::Turn(1000),
            Step::DefaultSpeed,
            Step::Stop,
            Step::DriveDistance {
                distance_cm: Centimeters(100.0),
                rpm: Rpm(65),
            },
        ]
    );
    assert_eq!(config.routine_names().collect::<Vec<_>>(), ["demo"]);
}

/// Test that an unknown step kind is a parse error.
#[test]
fn test_unknown_step_rejected() {
    let toml_str = r#"
[left]
port = 1

[right]
port = 10

[routines.bad]
steps = [{ jump = 3 }]
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test that a port outside 1-21 is a parse error.
#[test]
fn test_out_of_range_port() {
    let toml_str = r#"
[left]
port = 22

[right]
port = 10
"#;

    let err = parse_config(toml_str).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
}

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("drivebase_motion_load_config.toml");
    std::fs::write(
        &path,
        "[left]\nport = 4\n\n[right]\nport = 5\nreversed = true\n",
    )
    .expect("write temp config");

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.left.port.number(), 4);
    assert!(config.right.reversed);

    let _ = std::fs::remove_file(&path);
}

/// Test that a missing file surfaces as an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/drivebase/robot.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
