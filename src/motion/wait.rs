//! Move-completion wait.
//!
//! Polls encoder positions with a fixed sleep between reads until every
//! polled motor is inside the tolerance window at the same instant. The wait
//! gives up with an error once the deadline passes or the motors stop moving
//! outside the window, unless those checks are disabled in the settings.

use embedded_hal::delay::DelayNs;
use tracing::{debug, warn};

use crate::config::MotionSettings;
use crate::error::{ConfigError, MotionError, Result};

use super::window::ToleranceWindow;

/// Outcome of a successful wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled<const N: usize> {
    /// Positions read at the poll that found every motor inside the window.
    pub positions: [i32; N],
    /// Number of position reads, including the successful one.
    pub polls: u32,
    /// Time slept between reads.
    pub elapsed_ms: u32,
}

/// Block until every position returned by `sample` lies inside `window`.
///
/// `sample` reads the N polled motors. Between reads the caller is suspended
/// for `settings.poll_interval_ms` through `delay`. Elapsed time is counted
/// as the sum of those sleeps.
///
/// # Errors
///
/// - `ConfigError` when `settings` fail [`MotionSettings::validate`] or the
///   window has no width, since such a wait could never end.
/// - Any error returned by `sample`, unchanged.
/// - `MotionError::Stalled` once no position has changed for
///   `settings.stall_timeout_ms` while outside the window.
/// - `MotionError::Timeout` once `settings.timeout_ms` has elapsed.
///
/// With both deadlines set to `None` the wait only returns on success.
pub fn wait_until_settled<D, F, const N: usize>(
    delay: &mut D,
    window: ToleranceWindow,
    settings: &MotionSettings,
    mut sample: F,
) -> Result<Settled<N>>
where
    D: DelayNs,
    F: FnMut() -> Result<[i32; N]>,
{
    settings.validate()?;
    if window.tolerance() <= 0 {
        return Err(ConfigError::InvalidTolerance(window.tolerance()).into());
    }

    let mut polls: u32 = 0;
    let mut elapsed_ms: u32 = 0;
    let mut last: Option<[i32; N]> = None;
    let mut unchanged_since_ms: u32 = 0;

    loop {
        let positions = sample()?;
        polls = polls.saturating_add(1);

        if positions.iter().all(|&p| window.contains(p)) {
            debug!(
                displacement = window.target(),
                polls,
                elapsed_ms,
                "move settled"
            );
            return Ok(Settled {
                positions,
                polls,
                elapsed_ms,
            });
        }

        if last != Some(positions) {
            last = Some(positions);
            unchanged_since_ms = elapsed_ms;
        }

        let position = farthest(&window, &positions);

        if let Some(stall_ms) = settings.stall_timeout_ms {
            if elapsed_ms - unchanged_since_ms >= stall_ms {
                warn!(
                    displacement = window.target(),
                    position,
                    elapsed_ms,
                    "motor stalled outside tolerance window"
                );
                return Err(MotionError::Stalled {
                    target: window.target(),
                    position,
                    elapsed_ms,
                }
                .into());
            }
        }

        if let Some(timeout_ms) = settings.timeout_ms {
            if elapsed_ms >= timeout_ms {
                warn!(
                    displacement = window.target(),
                    position,
                    elapsed_ms,
                    "timed out waiting for move to settle"
                );
                return Err(MotionError::Timeout {
                    target: window.target(),
                    position,
                    elapsed_ms,
                }
                .into());
            }
        }

        delay.delay_ms(settings.poll_interval_ms);
        elapsed_ms = elapsed_ms.saturating_add(settings.poll_interval_ms);
    }
}

/// Position farthest from the target, or the target itself when nothing was
/// polled.
fn farthest(window: &ToleranceWindow, positions: &[i32]) -> i32 {
    positions
        .iter()
        .copied()
        .max_by_key(|&p| window.error(p))
        .unwrap_or(window.target())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, MotorError};
    use crate::motor::Side;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use proptest::prelude::*;

    /// Counts the milliseconds it was asked to sleep.
    #[derive(Default)]
    struct CountingDelay {
        total_ms: u64,
        calls: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += u64::from(ns) / 1_000_000;
            self.calls += 1;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += u64::from(ms);
            self.calls += 1;
        }
    }

    fn scripted<const N: usize>(readings: &[[i32; N]]) -> impl FnMut() -> Result<[i32; N]> + '_ {
        let mut index = 0;
        move || {
            let reading = readings[index.min(readings.len() - 1)];
            index += 1;
            Ok(reading)
        }
    }

    #[test]
    fn test_returns_on_first_in_window_poll() {
        let readings = [[0], [400], [800], [990], [995], [998], [1003]];
        let mut delay = CountingDelay::default();
        let settings = MotionSettings::default();

        let settled =
            wait_until_settled(&mut delay, ToleranceWindow::new(1000, 5), &settings, scripted(&readings))
                .unwrap();

        assert_eq!(settled.positions, [998]);
        assert_eq!(settled.polls, 6);
        assert_eq!(settled.elapsed_ms, 10);
        assert_eq!(delay.calls, 5);
        assert_eq!(delay.total_ms, 10);
    }

    #[test]
    fn test_reverse_target_uses_same_window() {
        let readings = [[0], [-500], [-1005], [-1002]];
        let settled = wait_until_settled(
            &mut NoopDelay::new(),
            ToleranceWindow::new(-1000, 5),
            &MotionSettings::default(),
            scripted(&readings),
        )
        .unwrap();

        assert!(settled.positions[0] > -1005 && settled.positions[0] < -995);
        assert_eq!(settled.positions, [-1002]);
    }

    #[test]
    fn test_both_motors_must_be_inside_at_once() {
        let readings = [[998, 900], [1010, 999], [1001, 997]];
        let settled = wait_until_settled(
            &mut NoopDelay::new(),
            ToleranceWindow::new(1000, 5),
            &MotionSettings::default(),
            scripted(&readings),
        )
        .unwrap();

        assert_eq!(settled.positions, [1001, 997]);
        assert_eq!(settled.polls, 3);
    }

    #[test]
    fn test_timeout_reports_last_position() {
        // Keeps creeping, so the stall check never fires
        let mut position = 0;
        let settings = MotionSettings {
            timeout_ms: Some(20),
            stall_timeout_ms: Some(10),
            ..MotionSettings::default()
        };

        let result = wait_until_settled(&mut NoopDelay::new(), ToleranceWindow::new(1000, 5), &settings, || {
            position += 1;
            Ok([position])
        });

        assert_eq!(
            result,
            Err(Error::Motion(MotionError::Timeout {
                target: 1000,
                position: 11,
                elapsed_ms: 20,
            }))
        );
    }

    #[test]
    fn test_stall_detected() {
        let readings = [[0], [300], [600], [640]];
        let settings = MotionSettings {
            timeout_ms: None,
            stall_timeout_ms: Some(6),
            ..MotionSettings::default()
        };

        let result = wait_until_settled(
            &mut NoopDelay::new(),
            ToleranceWindow::new(1000, 5),
            &settings,
            scripted(&readings),
        );

        // 640 first seen at 6 ms, unchanged through 12 ms
        assert_eq!(
            result,
            Err(Error::Motion(MotionError::Stalled {
                target: 1000,
                position: 640,
                elapsed_ms: 12,
            }))
        );
    }

    #[test]
    fn test_stall_reports_farthest_motor() {
        let readings = [[1000, 200]];
        let settings = MotionSettings {
            stall_timeout_ms: Some(4),
            ..MotionSettings::default()
        };

        let result = wait_until_settled(
            &mut NoopDelay::new(),
            ToleranceWindow::new(1000, 5),
            &settings,
            scripted(&readings),
        );

        assert!(matches!(
            result,
            Err(Error::Motion(MotionError::Stalled { position: 200, .. }))
        ));
    }

    #[test]
    fn test_zero_poll_interval_refused_before_sampling() {
        let settings = MotionSettings {
            poll_interval_ms: 0,
            ..MotionSettings::default()
        };
        let mut reads = 0u32;

        let result = wait_until_settled(&mut NoopDelay::new(), ToleranceWindow::new(1000, 5), &settings, || {
            reads += 1;
            Ok([0])
        });

        assert_eq!(result, Err(Error::Config(ConfigError::InvalidPollInterval(0))));
        assert_eq!(reads, 0);
    }

    #[test]
    fn test_empty_window_refused() {
        let result = wait_until_settled(
            &mut NoopDelay::new(),
            ToleranceWindow::new(1000, 0),
            &MotionSettings::default(),
            || Ok([1000]),
        );

        assert_eq!(result, Err(Error::Config(ConfigError::InvalidTolerance(0))));
    }

    #[test]
    fn test_sample_error_propagates() {
        let result: Result<Settled<1>> = wait_until_settled(
            &mut NoopDelay::new(),
            ToleranceWindow::new(1000, 5),
            &MotionSettings::default(),
            || Err(MotorError::Sample { side: Side::Left }.into()),
        );

        assert_eq!(result, Err(Error::Motor(MotorError::Sample { side: Side::Left })));
    }

    #[test]
    fn test_unbounded_wait_outlasts_default_deadlines() {
        // Motionless for far longer than the default stall window, then arrives
        let mut reads = 0u32;
        let settled = wait_until_settled(
            &mut NoopDelay::new(),
            ToleranceWindow::new(1000, 5),
            &MotionSettings::unbounded(),
            || {
                reads += 1;
                Ok([if reads > 20_000 { 1000 } else { 0 }])
            },
        )
        .unwrap();

        assert_eq!(settled.polls, 20_001);
    }

    proptest! {
        #[test]
        fn prop_returns_first_reading_inside_window(
            target in -5000i32..5000,
            readings in proptest::collection::vec(-6000i32..6000, 1..64),
        ) {
            let window = ToleranceWindow::new(target, 5);
            let mut trace = readings.clone();
            // Guarantee termination with a final in-window reading
            trace.push(target);

            let expected = trace.iter().position(|&p| window.contains(p)).unwrap();
            let mut index = 0;
            let settled = wait_until_settled(&mut NoopDelay::new(), window, &MotionSettings::unbounded(), || {
                let reading = trace[index];
                index += 1;
                Ok([reading])
            })
            .unwrap();

            prop_assert_eq!(settled.polls as usize, expected + 1);
            prop_assert_eq!(settled.positions[0], trace[expected]);
            prop_assert!(window.contains(settled.positions[0]));
        }
    }
}
