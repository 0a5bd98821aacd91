//! Move-completion settings.

use serde::Deserialize;

use crate::error::Result;

/// Which drive motors a straight move waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum WaitOn {
    /// Poll the left motor only.
    #[default]
    Left,
    /// Poll both motors; both must be inside the window at the same poll.
    Both,
}

/// Tolerance window and polling policy for move-completion waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MotionSettings {
    /// Half-width of the open tolerance window, in encoder units.
    #[serde(default = "default_tolerance")]
    pub tolerance: i32,

    /// Sleep between position reads.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,

    /// Give up after this long. `None` waits forever.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Option<u32>,

    /// Fail when no polled position changes for this long. `None` disables
    /// stall detection.
    #[serde(default = "default_stall_timeout_ms")]
    pub stall_timeout_ms: Option<u32>,

    /// Motors polled by straight moves.
    #[serde(default)]
    pub wait_on: WaitOn,
}

fn default_tolerance() -> i32 {
    5
}

fn default_poll_interval_ms() -> u32 {
    2
}

fn default_timeout_ms() -> Option<u32> {
    Some(10_000)
}

fn default_stall_timeout_ms() -> Option<u32> {
    Some(500)
}

impl MotionSettings {
    /// Settings that poll forever, as a bare sleep-poll loop would.
    pub fn unbounded() -> Self {
        Self {
            timeout_ms: None,
            stall_timeout_ms: None,
            ..Self::default()
        }
    }

    /// Check that a wait with these settings can settle and can give up.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTolerance` for a tolerance <= 0,
    /// `ConfigError::InvalidPollInterval` for a zero poll interval and
    /// `ConfigError::InvalidTimeout` for a deadline shorter than one poll.
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_motion(self)
    }
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
            stall_timeout_ms: default_stall_timeout_ms(),
            wait_on: WaitOn::Left,
        }
    }
}
