//! Clock adapters.

use std::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that only moves when told to. For tests and simulations.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn set(&self, instant: Timestamp) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now = instant;
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now = now.plus_secs(secs);
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now = now.plus_days(days);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_tracks_wall_time() {
        let before = Timestamp::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let start = Timestamp::from_unix_secs(1_717_200_000);
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance_secs(90);
        assert_eq!(clock.now(), start.plus_secs(90));

        clock.advance_days(2);
        assert_eq!(clock.now(), start.plus_secs(90).plus_days(2));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
