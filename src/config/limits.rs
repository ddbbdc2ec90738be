//! Daily limits and study-day configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::queue::DailyLimits;
use crate::domain::study::DayBoundary;

/// Daily caps on cards shown
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Never-seen cards introduced per study day
    #[serde(default = "default_new_cards_per_day")]
    pub new_cards_per_day: u32,

    /// Reviews of already-seen cards per study day
    #[serde(default = "default_reviews_per_day")]
    pub reviews_per_day: u32,
}

impl LimitsConfig {
    pub fn to_daily_limits(&self) -> DailyLimits {
        DailyLimits {
            new_cards_per_day: self.new_cards_per_day,
            reviews_per_day: self.reviews_per_day,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            new_cards_per_day: default_new_cards_per_day(),
            reviews_per_day: default_reviews_per_day(),
        }
    }
}

fn default_new_cards_per_day() -> u32 {
    20
}

fn default_reviews_per_day() -> u32 {
    100
}

/// Where the study day rolls over
#[derive(Debug, Clone, Deserialize)]
pub struct DayBoundaryConfig {
    /// Fixed offset of the learner's local time from UTC, in minutes
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Local hour at which a new study day starts (0 = midnight)
    #[serde(default)]
    pub rollover_hour: u32,
}

impl DayBoundaryConfig {
    pub fn to_day_boundary(&self) -> Result<DayBoundary, ValidationError> {
        DayBoundary::new(self.utc_offset_minutes, self.rollover_hour)
            .map_err(ValidationError::DayBoundary)
    }

    /// Validate day boundary configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_day_boundary().map(|_| ())
    }
}

impl Default for DayBoundaryConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            rollover_hour: 0,
        }
    }
}
