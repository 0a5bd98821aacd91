//! Scripted drive example.
//!
//! Runs the forward / turn / backward template on two simulated motors and
//! prints what each report step observed. Set `RUST_LOG=debug` to see every
//! move settle.
//!
//! Pass a TOML file and a routine name to run a configured routine instead:
//!
//! ```text
//! cargo run --example scripted_drive -- robot.toml square
//! ```

use drivebase_motion::{config::RobotConfig, motor::SimulatedMotor, DrivebaseBuilder, Routine};
use tracing_subscriber::EnvFilter;

/// Delay provider backed by the OS scheduler.
struct StdDelay;

impl embedded_hal::delay::DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Scripted Drive Example ===\n");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, routine) = match args.as_slice() {
        [path, name] => {
            let config = drivebase_motion::load_config(path)?;
            let routine = Routine::from_config(&config, name)?;
            (config, routine)
        }
        _ => (RobotConfig::default(), Routine::template()),
    };

    println!(
        "Left motor on port {}, right motor on port {}{}",
        config.left.port.number(),
        config.right.port.number(),
        if config.right.reversed { " (reversed)" } else { "" }
    );
    println!(
        "Default speed {}, max speed {}, tolerance ±{}\n",
        config.speed.default_speed, config.speed.max_speed, config.motion.tolerance
    );

    let mut drivebase = DrivebaseBuilder::new()
        .from_config(&config)
        .left(SimulatedMotor::new(config.left).with_step(20).with_undershoot(2))
        .right(SimulatedMotor::new(config.right).with_step(20))
        .delay(StdDelay)
        .build()?;

    let report = routine.run(&mut drivebase)?;

    println!("\n--- Report ---");
    for observation in &report.observations {
        println!("{:>24}: {}", observation.label, observation.position);
    }
    println!("Moves settled: {}", report.moves);
    println!("Final speed: {}", report.final_speed);

    Ok(())
}
