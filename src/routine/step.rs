//! Routine steps and their configuration form.

use heapless::{String, Vec};
use serde::Deserialize;

use crate::config::units::{Centimeters, Rpm};
use crate::error::{Error, Result, RoutineError};

use super::MAX_STEPS;

/// One action of a routine.
///
/// In TOML, unit steps are plain strings and the others single-key tables:
/// `"tare"`, `{ drive = 1000 }`, `{ set_speed = 300 }`,
/// `{ drive_distance = { distance_cm = 100.0, rpm = 65 } }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Zero both encoders.
    Tare,
    /// Move both motors by a displacement and wait.
    Drive(i32),
    /// Move the left motor only by a displacement and wait.
    Turn(i32),
    /// Govern and adopt a new cruise speed.
    SetSpeed(Rpm),
    /// Return to the configured default speed.
    DefaultSpeed,
    /// Command zero velocity on both motors.
    Stop,
    /// Hand off to the distance drive collaborator.
    DriveDistance {
        /// Travel distance, negative to reverse
        distance_cm: Centimeters,
        /// Requested speed
        rpm: Rpm,
    },
    /// Log the left encoder position under a label.
    Report(String<32>),
}

impl Step {
    /// Create a report step, truncating the label to 32 bytes.
    pub fn report(label: &str) -> Self {
        let mut text = String::new();
        for c in label.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        Step::Report(text)
    }

    /// Check the step's parameters.
    pub fn is_valid(&self) -> bool {
        match self {
            Step::DriveDistance { distance_cm, .. } => distance_cm.0.is_finite(),
            _ => true,
        }
    }
}

/// A named routine as declared in configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutineConfig {
    /// Steps in execution order.
    pub steps: Vec<Step, MAX_STEPS>,
}

impl RoutineConfig {
    /// Validate the routine declared under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RoutineError::Empty` for a routine without steps and
    /// `RoutineError::InvalidStep` for the first unusable step.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::Routine(RoutineError::Empty(
                String::try_from(name).unwrap_or_default(),
            )));
        }

        if let Some(index) = self.steps.iter().position(|s| !s.is_valid()) {
            return Err(Error::Routine(RoutineError::InvalidStep { index }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_label_truncated() {
        let Step::Report(label) = Step::report("a label that is much longer than thirty-two bytes") else {
            panic!("expected a report step");
        };
        assert_eq!(label.len(), 32);
    }

    #[test]
    fn test_empty_routine_rejected() {
        let routine = RoutineConfig::default();
        assert!(matches!(
            routine.validate("nothing"),
            Err(Error::Routine(RoutineError::Empty(_)))
        ));
    }

    #[test]
    fn test_non_finite_distance_rejected() {
        let mut routine = RoutineConfig::default();
        routine.steps.push(Step::Tare).unwrap();
        routine
            .steps
            .push(Step::DriveDistance {
                distance_cm: Centimeters(f32::NAN),
                rpm: Rpm(65),
            })
            .unwrap();

        assert_eq!(
            routine.validate("bad"),
            Err(Error::Routine(RoutineError::InvalidStep { index: 1 }))
        );
    }
}
