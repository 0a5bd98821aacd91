//! Routine construction and execution.

use embedded_hal::delay::DelayNs;
use heapless::{String, Vec};
use tracing::{info, warn};

use crate::config::units::{Centimeters, Rpm, UnitExt};
use crate::config::RobotConfig;
use crate::drive::{DistanceDrive, Drivebase};
use crate::error::{Error, MotorError, Result, RoutineError};
use crate::motor::{Side, SmartMotor};

use super::step::Step;
use super::MAX_STEPS;

/// A labelled position captured by a [`Step::Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Report label.
    pub label: String<32>,
    /// Left encoder position.
    pub position: i32,
}

/// What a completed routine observed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutineReport {
    /// Report steps in execution order.
    pub observations: Vec<Observation, MAX_STEPS>,
    /// Cruise speed when the routine ended.
    pub final_speed: Rpm,
    /// Relative moves that settled.
    pub moves: u32,
}

/// An ordered sequence of steps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Routine {
    steps: Vec<Step, MAX_STEPS>,
}

impl Routine {
    /// Create an empty routine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a routine from a list of steps.
    ///
    /// # Errors
    ///
    /// Returns `RoutineError::TooManySteps` beyond [`MAX_STEPS`] steps.
    pub fn from_steps(steps: &[Step]) -> Result<Self> {
        let mut routine = Self::new();
        for step in steps {
            routine.push(step.clone())?;
        }
        Ok(routine)
    }

    /// Look up a routine declared in configuration.
    ///
    /// # Errors
    ///
    /// Returns `RoutineError::NotFound` if no routine has that name.
    pub fn from_config(config: &RobotConfig, name: &str) -> Result<Self> {
        let declared = config.routine(name).ok_or_else(|| {
            Error::Routine(RoutineError::NotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })?;

        Ok(Self {
            steps: declared.steps.clone(),
        })
    }

    /// The forward / turn / backward template.
    ///
    /// Cruises at 25 RPM for the first leg, asks for 300 RPM for the turn
    /// (governed down to the configured maximum), drives back at the default
    /// speed, stops, and finishes with a 100 cm distance drive at 65 RPM.
    pub fn template() -> Self {
        let steps = [
            Step::SetSpeed(25.rpm()),
            Step::Tare,
            Step::Drive(1000),
            Step::report("After forward"),
            Step::Tare,
            Step::SetSpeed(300.rpm()),
            Step::Turn(1000),
            Step::report("After turn"),
            Step::DefaultSpeed,
            Step::Tare,
            Step::Drive(-1000),
            Step::report("After drive backwards"),
            Step::Stop,
            Step::DriveDistance {
                distance_cm: Centimeters(100.0),
                rpm: 65.rpm(),
            },
        ];

        let mut routine = Self::new();
        for step in steps {
            // 14 steps always fit
            let _ = routine.steps.push(step);
        }
        routine
    }

    /// Append a step.
    ///
    /// # Errors
    ///
    /// Returns `RoutineError::TooManySteps` when the routine is full.
    pub fn push(&mut self, step: Step) -> Result<()> {
        self.steps
            .push(step)
            .map_err(|_| Error::Routine(RoutineError::TooManySteps))
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the routine has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step on `drivebase`, using it for distance drives too.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn run<L, R, D>(&self, drivebase: &mut Drivebase<L, R, D>) -> Result<RoutineReport>
    where
        L: SmartMotor,
        R: SmartMotor,
        D: DelayNs,
    {
        self.execute(drivebase, None)
    }

    /// Run every step, handing distance drives to `distance`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn run_with<L, R, D, X>(
        &self,
        drivebase: &mut Drivebase<L, R, D>,
        distance: &mut X,
    ) -> Result<RoutineReport>
    where
        L: SmartMotor,
        R: SmartMotor,
        D: DelayNs,
        X: DistanceDrive,
    {
        self.execute(drivebase, Some(distance as &mut dyn DistanceDrive))
    }

    fn execute<L, R, D>(
        &self,
        drivebase: &mut Drivebase<L, R, D>,
        mut distance: Option<&mut dyn DistanceDrive>,
    ) -> Result<RoutineReport>
    where
        L: SmartMotor,
        R: SmartMotor,
        D: DelayNs,
    {
        let mut report = RoutineReport {
            final_speed: drivebase.default_speed(),
            ..RoutineReport::default()
        };
        let mut last_left: Option<i32> = None;

        for (index, step) in self.steps.iter().enumerate() {
            let outcome = match step {
                Step::Tare => drivebase.tare().map(|()| last_left = None),
                Step::Drive(displacement) => drivebase
                    .drive_relative(*displacement, report.final_speed)
                    .map(|moved| {
                        last_left = Some(moved.left);
                        report.moves += 1;
                    }),
                Step::Turn(displacement) => drivebase
                    .turn(*displacement, report.final_speed)
                    .map(|moved| {
                        last_left = Some(moved.left);
                        report.moves += 1;
                    }),
                Step::SetSpeed(rpm) => drivebase.governor().govern(*rpm).map(|governed| {
                    report.final_speed = governed.speed;
                    info!(rpm = governed.speed.0, "speed set");
                }),
                Step::DefaultSpeed => {
                    report.final_speed = drivebase.default_speed();
                    info!(rpm = report.final_speed.0, "speed set");
                    Ok(())
                }
                Step::Stop => drivebase.stop().map(|()| last_left = None),
                Step::DriveDistance { distance_cm, rpm } => {
                    if drivebase.debug() {
                        info!(distance_cm = distance_cm.0, rpm = rpm.0, "drive for distance");
                    }
                    let result = match distance.as_deref_mut() {
                        Some(collaborator) => collaborator.drive_for_distance(*distance_cm, *rpm),
                        None => drivebase.drive_for_distance(*distance_cm, *rpm),
                    };
                    result.map(|()| {
                        last_left = None;
                        info!(
                            distance_cm = distance_cm.0,
                            rpm = rpm.0,
                            "finished drive for distance"
                        );
                    })
                }
                Step::Report(label) => Self::observe(drivebase, last_left).map(|position| {
                    info!(label = label.as_str(), position, "encoder left");
                    // Capacity matches the step list
                    let _ = report.observations.push(Observation {
                        label: label.clone(),
                        position,
                    });
                }),
            };

            if let Err(e) = outcome {
                warn!(index, error = %e, "routine step failed");
                return Err(e);
            }
        }

        Ok(report)
    }

    /// Position from the last settled move, or a fresh read after a tare,
    /// stop or distance drive.
    fn observe<L, R, D>(
        drivebase: &mut Drivebase<L, R, D>,
        last_left: Option<i32>,
    ) -> Result<i32>
    where
        L: SmartMotor,
        R: SmartMotor,
        D: DelayNs,
    {
        match last_left {
            Some(position) => Ok(position),
            None => drivebase.left_mut().position().map_err(|e| {
                warn!(error = ?e, "left motor position read failed");
                MotorError::Sample { side: Side::Left }.into()
            }),
        }
    }
}
