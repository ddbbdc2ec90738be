//! Tunable scheduler parameters.
//!
//! Every coefficient of the memory model lives here instead of in the
//! formulas, so deployments can calibrate against their own review history.

use serde::{Deserialize, Serialize};

use super::card_state::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use super::Rating;
use crate::domain::foundation::ValidationError;

/// Upper bound for `max_interval_days`: one hundred years.
pub const MAX_INTERVAL_DAYS: f64 = 36_500.0;

/// One value per rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingWeights {
    pub again: f64,
    pub hard: f64,
    pub good: f64,
    pub easy: f64,
}

impl RatingWeights {
    pub const fn new(again: f64, hard: f64, good: f64, easy: f64) -> Self {
        Self {
            again,
            hard,
            good,
            easy,
        }
    }

    /// Returns the weight for a rating.
    pub fn get(&self, rating: Rating) -> f64 {
        match rating {
            Rating::Again => self.again,
            Rating::Hard => self.hard,
            Rating::Good => self.good,
            Rating::Easy => self.easy,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (Rating, f64)> + '_ {
        Rating::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

/// Parameters of the forgetting-curve scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerParameters {
    /// Probability of recall the schedule aims for at the due instant.
    pub target_retention: f64,
    /// Shortest interval ever scheduled, in days.
    pub min_interval_days: f64,
    /// Longest interval ever scheduled, in days.
    pub max_interval_days: f64,
    /// Floor applied to stability after a lapse.
    pub min_stability: f64,
    /// Stability assigned on the first rating of a card.
    pub initial_stability: RatingWeights,
    /// Difficulty assigned on the first rating of a card.
    pub initial_difficulty: RatingWeights,
    /// Additive difficulty change per rating on later reviews.
    pub difficulty_delta: RatingWeights,
    /// Fraction of stability kept after a lapse on the easiest card.
    pub lapse_decay_base: f64,
    /// How strongly difficulty deepens the post-lapse stability drop.
    pub lapse_difficulty_exponent: f64,
    /// Base stability growth on successful recall.
    pub recall_gain: f64,
    /// Extra growth for recalling a card whose retrievability had dropped.
    pub retrievability_weight: f64,
    /// Growth multiplier for `Hard`.
    pub hard_multiplier: f64,
    /// Growth multiplier for `Easy`.
    pub easy_multiplier: f64,
    /// Whether intervals are jittered.
    pub fuzz_enabled: bool,
    /// Maximum relative jitter, e.g. 0.05 for ±5%.
    pub fuzz_ratio: f64,
    /// Intervals shorter than this are never jittered.
    pub fuzz_min_days: f64,
}

impl Default for SchedulerParameters {
    fn default() -> Self {
        Self {
            target_retention: 0.9,
            min_interval_days: 1.0,
            max_interval_days: MAX_INTERVAL_DAYS,
            min_stability: 0.1,
            initial_stability: RatingWeights::new(0.4, 1.2, 3.1, 15.5),
            initial_difficulty: RatingWeights::new(7.5, 6.5, 5.0, 3.5),
            difficulty_delta: RatingWeights::new(1.2, 0.6, 0.0, -0.6),
            lapse_decay_base: 0.4,
            lapse_difficulty_exponent: 0.5,
            recall_gain: 1.5,
            retrievability_weight: 3.0,
            hard_multiplier: 0.5,
            easy_multiplier: 1.6,
            fuzz_enabled: true,
            fuzz_ratio: 0.05,
            fuzz_min_days: 2.5,
        }
    }
}

impl SchedulerParameters {
    /// Same parameters with fuzz switched off, for reproducible previews and tests.
    pub fn without_fuzz(mut self) -> Self {
        self.fuzz_enabled = false;
        self
    }

    /// Validates every coefficient against the ranges the memory model needs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        open_unit("target_retention", self.target_retention)?;

        if !(self.min_interval_days >= 1.0) {
            return Err(ValidationError::out_of_range(
                "min_interval_days",
                1.0,
                f64::MAX,
                self.min_interval_days,
            ));
        }
        if !(self.min_interval_days..=MAX_INTERVAL_DAYS).contains(&self.max_interval_days) {
            return Err(ValidationError::out_of_range(
                "max_interval_days",
                self.min_interval_days,
                MAX_INTERVAL_DAYS,
                self.max_interval_days,
            ));
        }
        positive("min_stability", self.min_stability)?;

        for (rating, value) in self.initial_stability.iter() {
            positive(&format!("initial_stability.{}", field_name(rating)), value)?;
        }
        for (rating, value) in self.initial_difficulty.iter() {
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&value) {
                return Err(ValidationError::out_of_range(
                    format!("initial_difficulty.{}", field_name(rating)),
                    MIN_DIFFICULTY,
                    MAX_DIFFICULTY,
                    value,
                ));
            }
        }

        let delta = &self.difficulty_delta;
        if !(delta.again > 0.0 && delta.hard > 0.0 && delta.hard < delta.again) {
            return Err(ValidationError::invalid_format(
                "difficulty_delta",
                "again and hard must be positive with hard < again",
            ));
        }
        if delta.good != 0.0 || !(delta.easy < 0.0) {
            return Err(ValidationError::invalid_format(
                "difficulty_delta",
                "good must be zero and easy negative",
            ));
        }

        open_unit("lapse_decay_base", self.lapse_decay_base)?;
        non_negative("lapse_difficulty_exponent", self.lapse_difficulty_exponent)?;
        positive("recall_gain", self.recall_gain)?;
        non_negative("retrievability_weight", self.retrievability_weight)?;
        if !(self.hard_multiplier > 0.0 && self.hard_multiplier <= 1.0) {
            return Err(ValidationError::out_of_range(
                "hard_multiplier",
                0.0,
                1.0,
                self.hard_multiplier,
            ));
        }
        if !(self.easy_multiplier >= 1.0) {
            return Err(ValidationError::out_of_range(
                "easy_multiplier",
                1.0,
                f64::MAX,
                self.easy_multiplier,
            ));
        }
        if !(0.0..0.5).contains(&self.fuzz_ratio) {
            return Err(ValidationError::out_of_range(
                "fuzz_ratio",
                0.0,
                0.5,
                self.fuzz_ratio,
            ));
        }
        non_negative("fuzz_min_days", self.fuzz_min_days)?;
        Ok(())
    }
}

fn field_name(rating: Rating) -> &'static str {
    match rating {
        Rating::Again => "again",
        Rating::Hard => "hard",
        Rating::Good => "good",
        Rating::Easy => "easy",
    }
}

fn open_unit(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, 0.0, 1.0, value))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, 0.0, f64::MAX, value))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, 0.0, f64::MAX, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SchedulerParameters::default().validate().is_ok());
    }

    #[test]
    fn without_fuzz_disables_only_fuzz() {
        let params = SchedulerParameters::default().without_fuzz();
        assert!(!params.fuzz_enabled);
        assert_eq!(params.target_retention, 0.9);
    }

    #[test]
    fn target_retention_must_be_strictly_inside_unit_interval() {
        for bad in [0.0, 1.0, 1.2, -0.1] {
            let params = SchedulerParameters {
                target_retention: bad,
                ..Default::default()
            };
            assert!(params.validate().is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn max_interval_below_min_is_rejected() {
        let params = SchedulerParameters {
            min_interval_days: 5.0,
            max_interval_days: 2.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn max_interval_beyond_a_century_is_rejected() {
        for bad in [MAX_INTERVAL_DAYS + 1.0, 1e9, f64::INFINITY, f64::NAN] {
            let params = SchedulerParameters {
                max_interval_days: bad,
                ..Default::default()
            };
            assert!(params.validate().is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn min_interval_below_one_day_is_rejected() {
        let params = SchedulerParameters {
            min_interval_days: 0.5,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn difficulty_delta_signs_are_enforced() {
        let params = SchedulerParameters {
            difficulty_delta: RatingWeights::new(-1.0, 0.5, 0.0, -0.5),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = SchedulerParameters {
            difficulty_delta: RatingWeights::new(1.0, 0.5, 0.1, -0.5),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn initial_difficulty_outside_scale_is_rejected() {
        let params = SchedulerParameters {
            initial_difficulty: RatingWeights::new(11.0, 6.0, 5.0, 3.0),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("initial_difficulty.again"));
    }

    #[test]
    fn weights_lookup_by_rating() {
        let w = RatingWeights::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(w.get(Rating::Again), 1.0);
        assert_eq!(w.get(Rating::Easy), 4.0);
    }
}
