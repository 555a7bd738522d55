use std::sync::atomic::{AtomicI64, Ordering};

use docgraph_types::TimePoint;

/// Source of `created_date` values.
pub trait Clock: Send + Sync {
    fn now(&self) -> TimePoint;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimePoint {
        TimePoint::now()
    }
}

/// A clock that only moves when told to. Used by tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicI64,
}

impl ManualClock {
    pub fn new(start: TimePoint) -> Self {
        Self {
            micros: AtomicI64::new(start.micros()),
        }
    }

    pub fn set(&self, time: TimePoint) {
        self.micros.store(time.micros(), Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.micros.fetch_add(secs * 1_000_000, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimePoint {
        TimePoint::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_on_request() {
        let clock = ManualClock::new(TimePoint::from_secs(100));
        assert_eq!(clock.now(), TimePoint::from_secs(100));
        clock.advance_secs(5);
        assert_eq!(clock.now(), TimePoint::from_secs(105));
        clock.set(TimePoint::from_secs(1));
        assert_eq!(clock.now().sec_since_epoch(), 1);
    }

    #[test]
    fn system_clock_is_current() {
        assert!(SystemClock.now().sec_since_epoch() > 1_577_836_800);
    }
}
