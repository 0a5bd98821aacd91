//! Routine module for drivebase-motion.
//!
//! A routine is an ordered list of drive steps run one after another on a
//! single thread. The built-in template drives forward, turns, drives back
//! and finishes with a distance drive; further routines can be declared by
//! name in configuration.

mod runner;
mod step;

pub use runner::{Observation, Routine, RoutineReport};
pub use step::{RoutineConfig, Step};

/// Maximum number of steps in one routine.
pub const MAX_STEPS: usize = 32;
