//! Scheduler configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::scheduling::{RatingWeights, SchedulerParameters};

/// Memory-model coefficients and interval bounds.
///
/// Missing fields fall back to the defaults of `SchedulerParameters`. A
/// per-rating table (`initial_stability`, `initial_difficulty`,
/// `difficulty_delta`) is replaced as a whole, so all four ratings must be
/// given when one is overridden.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub target_retention: f64,
    pub min_interval_days: f64,
    pub max_interval_days: f64,
    pub min_stability: f64,
    pub initial_stability: RatingWeights,
    pub initial_difficulty: RatingWeights,
    pub difficulty_delta: RatingWeights,
    pub lapse_decay_base: f64,
    pub lapse_difficulty_exponent: f64,
    pub recall_gain: f64,
    pub retrievability_weight: f64,
    pub hard_multiplier: f64,
    pub easy_multiplier: f64,
    pub fuzz_enabled: bool,
    pub fuzz_ratio: f64,
    pub fuzz_min_days: f64,
}

impl SchedulerConfig {
    pub fn to_parameters(&self) -> SchedulerParameters {
        SchedulerParameters {
            target_retention: self.target_retention,
            min_interval_days: self.min_interval_days,
            max_interval_days: self.max_interval_days,
            min_stability: self.min_stability,
            initial_stability: self.initial_stability,
            initial_difficulty: self.initial_difficulty,
            difficulty_delta: self.difficulty_delta,
            lapse_decay_base: self.lapse_decay_base,
            lapse_difficulty_exponent: self.lapse_difficulty_exponent,
            recall_gain: self.recall_gain,
            retrievability_weight: self.retrievability_weight,
            hard_multiplier: self.hard_multiplier,
            easy_multiplier: self.easy_multiplier,
            fuzz_enabled: self.fuzz_enabled,
            fuzz_ratio: self.fuzz_ratio,
            fuzz_min_days: self.fuzz_min_days,
        }
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_parameters()
            .validate()
            .map_err(ValidationError::Scheduler)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        let p = SchedulerParameters::default();
        Self {
            target_retention: p.target_retention,
            min_interval_days: p.min_interval_days,
            max_interval_days: p.max_interval_days,
            min_stability: p.min_stability,
            initial_stability: p.initial_stability,
            initial_difficulty: p.initial_difficulty,
            difficulty_delta: p.difficulty_delta,
            lapse_decay_base: p.lapse_decay_base,
            lapse_difficulty_exponent: p.lapse_difficulty_exponent,
            recall_gain: p.recall_gain,
            retrievability_weight: p.retrievability_weight,
            hard_multiplier: p.hard_multiplier,
            easy_multiplier: p.easy_multiplier,
            fuzz_enabled: p.fuzz_enabled,
            fuzz_ratio: p.fuzz_ratio,
            fuzz_min_days: p.fuzz_min_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scheduler_defaults() {
        assert_eq!(
            SchedulerConfig::default().to_parameters(),
            SchedulerParameters::default()
        );
    }

    #[test]
    fn deserializes_partial_json_over_defaults() {
        let config: SchedulerConfig = serde_json::from_str(
            r#"{ "target_retention": 0.85, "initial_stability": { "again": 0.5, "hard": 1.0, "good": 2.0, "easy": 10.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.target_retention, 0.85);
        assert_eq!(config.initial_stability, RatingWeights::new(0.5, 1.0, 2.0, 10.0));
        assert_eq!(config.max_interval_days, 36_500.0);
    }

    #[test]
    fn validation_rejects_bad_retention() {
        let config = SchedulerConfig {
            target_retention: 1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::Scheduler(_))));
    }

    #[test]
    fn validation_accepts_defaults() {
        assert!(SchedulerConfig::default().validate().is_ok());
    }
}
