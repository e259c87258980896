//! Time source for note timestamps.

use crate::model::timestamp::{truncate_to_millis, Timestamp};
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Supplies the current instant to the store.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock, truncated to milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        truncate_to_millis(Utc::now())
    }
}

/// Manually driven clock for deterministic replays and tests.
///
/// Clones share the same instant, so a caller can keep one handle and
/// advance time while the store owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Arc::new(Mutex::new(truncate_to_millis(start))),
        }
    }

    pub fn set(&self, value: Timestamp) {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = truncate_to_millis(value);
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let handle = clock.clone();
        handle.advance(Duration::seconds(90));
        assert_eq!(
            clock.now(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 30).unwrap()
        );
    }

    #[test]
    fn system_clock_has_no_sub_millisecond_part() {
        let now = SystemClock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
