use chrono::{DateTime, Duration, Utc};

/// Consecutive cancelled applications before the lockout opens.
pub const CANCELLATION_LIMIT: u32 = 3;
/// Length of the lockout window.
pub const LOCKOUT_SECS: i64 = 30;

/// Penalty state for application-cancellation spam. Session-local: the
/// lockout resets the counter rather than accumulating indefinitely.
#[derive(Debug, Default)]
pub struct CooldownPolicy {
    cancellations: u32,
    locked_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationOutcome {
    Warned { count: u32, limit: u32 },
    LockedOut { until: DateTime<Utc> },
}

impl CooldownPolicy {
    /// Remaining whole seconds of an active lockout, rounded up.
    ///
    /// Expiry is lazy: a passed lockout clears itself on read and resets the
    /// cancellation counter. There is no timer callback.
    pub fn check_active(&mut self, now: DateTime<Utc>) -> Option<i64> {
        let until = self.locked_until?;
        if now > until {
            self.locked_until = None;
            self.cancellations = 0;
            return None;
        }
        let millis = (until - now).num_milliseconds().max(0);
        Some((millis + 999) / 1000)
    }

    pub fn record_cancellation(&mut self, now: DateTime<Utc>) -> CancellationOutcome {
        self.cancellations += 1;
        if self.cancellations >= CANCELLATION_LIMIT {
            let until = now + Duration::seconds(LOCKOUT_SECS);
            self.locked_until = Some(until);
            CancellationOutcome::LockedOut { until }
        } else {
            CancellationOutcome::Warned {
                count: self.cancellations,
                limit: CANCELLATION_LIMIT,
            }
        }
    }

    pub fn cancellation_count(&self) -> u32 {
        self.cancellations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn warns_below_the_limit() {
        let mut policy = CooldownPolicy::default();
        assert_eq!(
            policy.record_cancellation(at(0)),
            CancellationOutcome::Warned { count: 1, limit: 3 }
        );
        assert_eq!(
            policy.record_cancellation(at(1)),
            CancellationOutcome::Warned { count: 2, limit: 3 }
        );
        assert_eq!(policy.check_active(at(2)), None);
    }

    #[test]
    fn third_cancellation_opens_a_thirty_second_lockout() {
        let mut policy = CooldownPolicy::default();
        policy.record_cancellation(at(0));
        policy.record_cancellation(at(1));
        let outcome = policy.record_cancellation(at(2));
        assert_eq!(
            outcome,
            CancellationOutcome::LockedOut {
                until: at(2) + Duration::seconds(30)
            }
        );
        assert_eq!(policy.check_active(at(2)), Some(30));
        assert_eq!(policy.check_active(at(12)), Some(20));
    }

    #[test]
    fn remaining_seconds_round_up() {
        let mut policy = CooldownPolicy::default();
        for _ in 0..3 {
            policy.record_cancellation(at(0));
        }
        // 29.5s left reads as 30.
        let now = at(0) + Duration::milliseconds(500);
        assert_eq!(policy.check_active(now), Some(30));
    }

    #[test]
    fn expiry_clears_lazily_and_resets_the_counter() {
        let mut policy = CooldownPolicy::default();
        for _ in 0..3 {
            policy.record_cancellation(at(0));
        }
        assert_eq!(policy.cancellation_count(), 3);
        assert_eq!(policy.check_active(at(31)), None);
        assert_eq!(policy.cancellation_count(), 0);
        // Next cancellation starts a fresh run.
        assert_eq!(
            policy.record_cancellation(at(32)),
            CancellationOutcome::Warned { count: 1, limit: 3 }
        );
    }
}
