//! Motion module for drivebase-motion.
//!
//! Provides the tolerance window and the sleep-poll wait that decides when a
//! relative move has completed.

mod window;
mod wait;

pub use wait::{wait_until_settled, Settled};
pub use window::ToleranceWindow;
