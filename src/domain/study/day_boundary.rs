//! Study-day boundaries for daily caps.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

const MIN_OFFSET_MINUTES: i32 = -12 * 60;
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Where one study day ends and the next begins.
///
/// A day starts at `rollover_hour:00` local time, local time being UTC shifted
/// by a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    utc_offset_minutes: i32,
    rollover: NaiveTime,
}

impl DayBoundary {
    pub fn new(utc_offset_minutes: i32, rollover_hour: u32) -> Result<Self, ValidationError> {
        if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&utc_offset_minutes) {
            return Err(ValidationError::out_of_range(
                "utc_offset_minutes",
                f64::from(MIN_OFFSET_MINUTES),
                f64::from(MAX_OFFSET_MINUTES),
                f64::from(utc_offset_minutes),
            ));
        }
        let rollover = NaiveTime::from_hms_opt(rollover_hour, 0, 0).ok_or_else(|| {
            ValidationError::out_of_range("rollover_hour", 0.0, 23.0, f64::from(rollover_hour))
        })?;
        Ok(Self {
            utc_offset_minutes,
            rollover,
        })
    }

    /// UTC days starting at midnight.
    pub fn utc_midnight() -> Self {
        Self {
            utc_offset_minutes: 0,
            rollover: NaiveTime::MIN,
        }
    }

    /// The study day that contains `now`.
    pub fn window_containing(&self, now: Timestamp) -> DayWindow {
        let offset = Duration::minutes(i64::from(self.utc_offset_minutes));
        let local = now.as_datetime().naive_utc() + offset;

        let mut start_local = local.date().and_time(self.rollover);
        if start_local > local {
            start_local -= Duration::days(1);
        }

        let start = Timestamp::from_naive_utc(start_local - offset);
        DayWindow {
            start,
            end: start.plus_days(1),
        }
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc_midnight()
    }
}

/// Half-open interval `[start, end)` covering one study day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DayWindow {
    pub fn contains(&self, instant: Timestamp) -> bool {
        instant >= self.start && instant < self.end
    }
}
