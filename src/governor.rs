//! Speed governor.
//!
//! Caps a requested cruise speed at the configured maximum before it reaches
//! a motor. Direction travels with the displacement, so there is no floor
//! and negative speeds pass through untouched.

use tracing::warn;

use crate::config::{Rpm, SpeedLimits, SpeedPolicy};
use crate::error::{Result, SpeedError};

/// Cap `requested` at `max`.
///
/// Returns `requested` when it is at most `max`, otherwise `max`.
#[inline]
pub fn clamp_speed(requested: Rpm, max: Rpm) -> Rpm {
    if requested > max {
        max
    } else {
        requested
    }
}

/// Result of governing a speed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Governed {
    /// Speed to command.
    pub speed: Rpm,
    /// Whether the request was lowered to the maximum.
    pub clamped: bool,
}

/// Applies a [`SpeedPolicy`] against a maximum speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedGovernor {
    max: Rpm,
    policy: SpeedPolicy,
}

impl SpeedGovernor {
    /// Create a governor.
    pub const fn new(max: Rpm, policy: SpeedPolicy) -> Self {
        Self { max, policy }
    }

    /// Create a governor from configured speed limits.
    pub const fn from_limits(limits: &SpeedLimits) -> Self {
        Self::new(limits.max_speed, limits.policy)
    }

    /// The ceiling.
    #[inline]
    pub const fn max(&self) -> Rpm {
        self.max
    }

    /// The policy applied above the ceiling.
    #[inline]
    pub const fn policy(&self) -> SpeedPolicy {
        self.policy
    }

    /// Govern a speed request.
    ///
    /// # Errors
    ///
    /// Returns `SpeedError::ExceedsLimit` when the request is above the
    /// maximum and the policy is [`SpeedPolicy::Reject`].
    pub fn govern(&self, requested: Rpm) -> Result<Governed> {
        if requested <= self.max {
            return Ok(Governed {
                speed: requested,
                clamped: false,
            });
        }

        match self.policy {
            SpeedPolicy::Clamp => {
                warn!(
                    requested = requested.0,
                    max = self.max.0,
                    "speed request clamped to maximum"
                );
                Ok(Governed {
                    speed: clamp_speed(requested, self.max),
                    clamped: true,
                })
            }
            SpeedPolicy::Reject => Err(SpeedError::ExceedsLimit {
                requested: requested.0,
                max: self.max.0,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_examples() {
        assert_eq!(clamp_speed(Rpm(300), Rpm(200)), Rpm(200));
        assert_eq!(clamp_speed(Rpm(150), Rpm(200)), Rpm(150));
        assert_eq!(clamp_speed(Rpm(200), Rpm(200)), Rpm(200));
    }

    #[test]
    fn test_no_floor() {
        assert_eq!(clamp_speed(Rpm(-50), Rpm(200)), Rpm(-50));
        assert_eq!(clamp_speed(Rpm::ZERO, Rpm(200)), Rpm::ZERO);
    }

    #[test]
    fn test_clamp_policy_flags_clamp() {
        let governor = SpeedGovernor::new(Rpm(100), SpeedPolicy::Clamp);

        let governed = governor.govern(Rpm(300)).unwrap();
        assert_eq!(governed, Governed { speed: Rpm(100), clamped: true });

        let governed = governor.govern(Rpm(25)).unwrap();
        assert_eq!(governed, Governed { speed: Rpm(25), clamped: false });
    }

    #[test]
    fn test_reject_policy() {
        let governor = SpeedGovernor::new(Rpm(200), SpeedPolicy::Reject);

        assert_eq!(
            governor.govern(Rpm(300)),
            Err(Error::Speed(SpeedError::ExceedsLimit { requested: 300, max: 200 }))
        );
        assert_eq!(governor.govern(Rpm(200)).unwrap().speed, Rpm(200));
    }

    #[test]
    fn test_from_limits() {
        let governor = SpeedGovernor::from_limits(&SpeedLimits::default());
        assert_eq!(governor.max(), Rpm(100));
        assert_eq!(governor.policy(), SpeedPolicy::Clamp);
    }

    proptest! {
        #[test]
        fn prop_clamp_matches_definition(s in any::<i32>(), m in any::<i32>()) {
            let expected = if s <= m { s } else { m };
            prop_assert_eq!(clamp_speed(Rpm(s), Rpm(m)), Rpm(expected));
        }

        #[test]
        fn prop_clamp_is_idempotent(s in -1000i32..1000, m in 1i32..600) {
            let once = clamp_speed(Rpm(s), Rpm(m));
            prop_assert_eq!(clamp_speed(once, Rpm(m)), once);

            let governor = SpeedGovernor::new(Rpm(m), SpeedPolicy::Clamp);
            let first = governor.govern(Rpm(s)).unwrap().speed;
            let second = governor.govern(first).unwrap();
            prop_assert_eq!(second.speed, first);
            prop_assert!(!second.clamped);
        }

        #[test]
        fn prop_governed_never_exceeds_max(s in any::<i32>(), m in 1i32..600) {
            let governor = SpeedGovernor::new(Rpm(m), SpeedPolicy::Clamp);
            prop_assert!(governor.govern(Rpm(s)).unwrap().speed <= Rpm(m));
        }
    }
}
