use std::sync::{Mutex, PoisonError};
use std::time::Duration;

// Outcome of a cooldown check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    Allowed,
    Denied { remaining_seconds: u64 },
}

/// Process-wide gate enforcing a minimum interval between forwarded generate
/// requests. Every caller shares the same slot; there is no per-client key.
///
/// Only valid for a single instance. Several replicas behind a load balancer
/// each keep their own timestamp.
pub struct CooldownGate {
    window_ms: i64,
    // epoch millis of the last allowed request, None until the first one
    last_success: Mutex<Option<i64>>,
}

impl CooldownGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window_ms: window.as_millis().min(i64::MAX as u128) as i64,
            last_success: Mutex::new(None),
        }
    }

    /// Check the window and, when it has passed, record `now_ms` as the new
    /// last success. Check and update happen under one lock.
    pub fn try_acquire(&self, now_ms: i64) -> Acquire {
        let mut last = self
            .last_success
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match remaining_ms(*last, now_ms, self.window_ms) {
            0 => {
                // never move the stored timestamp backwards
                *last = Some(last.map_or(now_ms, |prev| prev.max(now_ms)));
                Acquire::Allowed
            }
            remaining => Acquire::Denied {
                remaining_seconds: remaining.div_ceil(1000),
            },
        }
    }

    // Seconds until the next request would be allowed, without touching state
    pub fn remaining_seconds(&self, now_ms: i64) -> u64 {
        let last = self
            .last_success
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        remaining_ms(*last, now_ms, self.window_ms).div_ceil(1000)
    }

    pub fn last_success(&self) -> Option<i64> {
        *self
            .last_success
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn remaining_ms(last: Option<i64>, now_ms: i64, window_ms: i64) -> u64 {
    let Some(last) = last else {
        return 0;
    };
    // a timestamp earlier than the stored one counts as zero elapsed
    let elapsed = now_ms.saturating_sub(last).max(0);
    window_ms.saturating_sub(elapsed).max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn first_request_is_always_allowed() {
        let gate = CooldownGate::new(WINDOW);
        assert_eq!(gate.last_success(), None);
        assert_eq!(gate.try_acquire(0), Acquire::Allowed);
        assert_eq!(gate.last_success(), Some(0));
    }

    #[test]
    fn denies_inside_window_with_rounded_up_seconds() {
        let t1 = 1_700_000_000_000;
        for (delta, expected) in [(1, 60), (500, 60), (1_000, 59), (30_500, 30), (59_999, 1)] {
            let gate = CooldownGate::new(WINDOW);
            assert_eq!(gate.try_acquire(t1), Acquire::Allowed);
            assert_eq!(
                gate.try_acquire(t1 + delta),
                Acquire::Denied { remaining_seconds: expected },
                "delta {delta}"
            );
        }
    }

    #[test]
    fn allows_once_window_has_passed() {
        let gate = CooldownGate::new(WINDOW);
        let t1 = 1_700_000_000_000;
        assert_eq!(gate.try_acquire(t1), Acquire::Allowed);
        assert_eq!(gate.try_acquire(t1 + 60_000), Acquire::Allowed);
        assert_eq!(gate.last_success(), Some(t1 + 60_000));
        assert_eq!(gate.try_acquire(t1 + 180_000), Acquire::Allowed);
    }

    #[test]
    fn denial_leaves_timestamp_untouched() {
        let gate = CooldownGate::new(WINDOW);
        let t1 = 5_000_000;
        gate.try_acquire(t1);
        for offset in [10, 20_000, 59_000] {
            assert!(matches!(gate.try_acquire(t1 + offset), Acquire::Denied { .. }));
            assert_eq!(gate.last_success(), Some(t1));
        }
        // measured from t1, not from the denied attempts
        assert_eq!(gate.try_acquire(t1 + 60_000), Acquire::Allowed);
    }

    #[test]
    fn earlier_clock_reading_is_denied() {
        let gate = CooldownGate::new(WINDOW);
        gate.try_acquire(100_000);
        assert_eq!(
            gate.try_acquire(90_000),
            Acquire::Denied { remaining_seconds: 60 }
        );
        assert_eq!(gate.last_success(), Some(100_000));
    }

    #[test]
    fn remaining_seconds_does_not_acquire() {
        let gate = CooldownGate::new(WINDOW);
        assert_eq!(gate.remaining_seconds(10_000), 0);
        assert_eq!(gate.last_success(), None);

        gate.try_acquire(10_000);
        assert_eq!(gate.remaining_seconds(25_000), 45);
        assert_eq!(gate.last_success(), Some(10_000));
    }

    #[test]
    fn concurrent_callers_get_one_slot() {
        let gate = CooldownGate::new(WINDOW);
        let now = 42_000;

        let allowed = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| gate.try_acquire(now)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|r| *r == Acquire::Allowed)
                .count()
        });

        assert_eq!(allowed, 1);
    }
}
