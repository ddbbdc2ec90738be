//! Daily caps and what is left of them.

use serde::{Deserialize, Serialize};

use crate::domain::study::DailyProgress;

/// Configured per-day caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLimits {
    pub new_cards_per_day: u32,
    pub reviews_per_day: u32,
}

impl Default for DailyLimits {
    fn default() -> Self {
        Self {
            new_cards_per_day: 20,
            reviews_per_day: 100,
        }
    }
}

/// How many more cards of each kind may be shown today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAllowance {
    pub new_cards: u32,
    pub reviews: u32,
}

impl DailyAllowance {
    /// Caps minus the work already done in the current study day.
    pub fn remaining(limits: DailyLimits, progress: &DailyProgress) -> Self {
        Self {
            new_cards: limits
                .new_cards_per_day
                .saturating_sub(progress.new_cards_introduced),
            reviews: limits
                .reviews_per_day
                .saturating_sub(progress.reviews_completed),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.new_cards == 0 && self.reviews == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::study::DayBoundary;

    fn progress(new: u32, reviews: u32) -> DailyProgress {
        let window = DayBoundary::utc_midnight().window_containing(Timestamp::from_unix_secs(0));
        DailyProgress {
            new_cards_introduced: new,
            reviews_completed: reviews,
            ..DailyProgress::empty(window)
        }
    }

    #[test]
    fn subtracts_work_done_today() {
        let allowance = DailyAllowance::remaining(DailyLimits::default(), &progress(5, 40));
        assert_eq!(allowance.new_cards, 15);
        assert_eq!(allowance.reviews, 60);
        assert!(!allowance.is_exhausted());
    }

    #[test]
    fn never_goes_negative() {
        let limits = DailyLimits {
            new_cards_per_day: 3,
            reviews_per_day: 10,
        };
        let allowance = DailyAllowance::remaining(limits, &progress(7, 12));
        assert_eq!(allowance.new_cards, 0);
        assert_eq!(allowance.reviews, 0);
        assert!(allowance.is_exhausted());
    }
}
