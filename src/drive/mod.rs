//! Drive module for drivebase-motion.
//!
//! Provides the two-motor drivebase, its builder and the distance drive
//! collaborator interface.

mod builder;
mod distance;
mod drivebase;

pub use builder::DrivebaseBuilder;
pub use distance::DistanceDrive;
pub use drivebase::{Drivebase, Moved};
