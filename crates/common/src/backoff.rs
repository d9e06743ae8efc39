//! Bounded exponential backoff schedules for polling loops.

use std::time::Duration;

use crate::config::BackoffSettings;

/// A bounded source of polling delays.
///
/// `next_delay` yields the delay to wait before the next attempt while the
/// attempt budget lasts, and `None` once it is exhausted. The consumer owns
/// the loop: sleep for the returned delay, act, repeat.
pub trait BackoffSchedule: Send {
    fn next_delay(&mut self) -> Option<Duration>;
}

/// Calculate the delay for an attempt with capped exponential growth.
pub fn delay_for_attempt(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    let multiplier = 2_u64.saturating_pow(attempt);
    let delay = base_ms.saturating_mul(multiplier);
    Duration::from_millis(delay.min(max_ms))
}

/// Deterministic doubling schedule: base, 2x, 4x, ... capped at
/// `max_delay_ms`, exhausted after `max_attempts` yielded delays.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    settings: BackoffSettings,
    attempt: u32,
}

impl ExponentialBackoff {
    pub fn new(settings: BackoffSettings) -> Self {
        Self {
            settings,
            attempt: 0,
        }
    }
}

impl BackoffSchedule for ExponentialBackoff {
    fn next_delay(&mut self) -> Option<Duration> {
        if self.attempt >= self.settings.max_attempts {
            return None;
        }
        let delay = delay_for_attempt(
            self.attempt,
            self.settings.initial_delay_ms,
            self.settings.max_delay_ms,
        );
        self.attempt += 1;
        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(initial: u64, max: u64, attempts: u32) -> BackoffSettings {
        BackoffSettings {
            initial_delay_ms: initial,
            max_delay_ms: max,
            max_attempts: attempts,
        }
    }

    fn drain(mut backoff: ExponentialBackoff) -> Vec<Duration> {
        std::iter::from_fn(move || backoff.next_delay()).collect()
    }

    #[test]
    fn doubles_until_capped() {
        let delays = drain(ExponentialBackoff::new(settings(1000, 5000, 6)));
        let millis: Vec<u64> = delays.iter().map(|d| d.as_millis() as u64).collect();
        assert_eq!(millis, vec![1000, 2000, 4000, 5000, 5000, 5000]);
    }

    #[test]
    fn exhausts_after_attempt_budget() {
        let mut backoff = ExponentialBackoff::new(settings(1, 5, 3));
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_none());
        assert!(backoff.next_delay().is_none());
    }

    #[test]
    fn default_budgets_bound_total_wait() {
        let queued: Duration = drain(ExponentialBackoff::new(BackoffSettings::queued()))
            .into_iter()
            .sum();
        assert_eq!(queued, Duration::from_secs(122));

        let running: Duration = drain(ExponentialBackoff::new(BackoffSettings::running()))
            .into_iter()
            .sum();
        assert_eq!(running, Duration::from_secs(62));
    }

    #[test]
    fn zero_delay_schedule_still_counts_attempts() {
        let delays = drain(ExponentialBackoff::new(settings(0, 0, 4)));
        assert_eq!(delays, vec![Duration::ZERO; 4]);
    }

    #[test]
    fn delay_for_attempt_saturates() {
        let delay = delay_for_attempt(63, u64::MAX, u64::MAX);
        assert_eq!(delay, Duration::from_millis(u64::MAX));
    }
}
