//! Clock abstraction for determinism.

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Whole seconds elapsed between `earlier` and now, floored and never
    /// negative.
    fn seconds_since(&self, earlier: DateTime<Utc>) -> u64 {
        let elapsed = (self.now() - earlier).num_seconds();
        u64::try_from(elapsed).unwrap_or(0)
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    struct At(DateTime<Utc>);

    impl Clock for At {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_seconds_since_floors_partial_seconds() {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = At(start + Duration::milliseconds(61_900));

        assert_eq!(clock.seconds_since(start), 61);
    }

    #[test]
    fn test_seconds_since_clamps_future_start_to_zero() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = At(now);

        assert_eq!(clock.seconds_since(now + Duration::seconds(5)), 0);
    }
}
