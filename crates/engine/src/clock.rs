//! Wall-clock capability used to stamp `created_at`/`updated_at`.

use chrono::{DateTime, Utc};

/// Source of the current time, always in UTC.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real wall clock.
///
/// Full precision is kept in storage so rows created within the same second
/// still list in creation order; the wire form renders whole seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn system_clock_keeps_moving_forward() {
        let before = Utc::now();
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(first >= before);
        assert!(second >= first);
    }

    #[test]
    fn fixed_clock_is_stable() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }
}
