//! Forgetting-curve math.
//!
//! ## Core Formulas
//!
//! - Retrievability: `R(t, S) = (1 + t / (9S))^-1`
//! - Interval for target retention `r`: `t = 9S (1/r - 1)`
//! - Lapse: `S' = max(S * base * ((11 - D) / 10)^p, S_min)`
//! - Recall: `S' = S * (1 + gain * ((11 - D) / 10) * (1 + w * (1 - R)) * m(rating))`
//!
//! All functions are pure and total over validated parameters.

use super::card_state::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use super::{Rating, SchedulerParameters};

/// Curve constant; with it, `R(S, S) = 0.9`.
const DECAY_FACTOR: f64 = 9.0;

/// Probability of recall after `elapsed_days` for a memory of `stability`.
pub fn retrievability(elapsed_days: f64, stability: f64) -> f64 {
    let r = 1.0 / (1.0 + elapsed_days / (DECAY_FACTOR * stability));
    r.clamp(0.0, 1.0)
}

/// Days until retrievability falls to `target_retention`.
pub fn interval_for_retention(stability: f64, target_retention: f64) -> f64 {
    DECAY_FACTOR * stability * (1.0 / target_retention - 1.0)
}

/// Largest useful stability: the one whose interval is `max_interval_days`.
///
/// Never below `min_stability`.
pub fn stability_ceiling(params: &SchedulerParameters) -> f64 {
    let per_unit = interval_for_retention(1.0, params.target_retention);
    (params.max_interval_days / per_unit).max(params.min_stability)
}

/// Difficulty of a card rated for the first time.
pub fn initial_difficulty(params: &SchedulerParameters, rating: Rating) -> f64 {
    params
        .initial_difficulty
        .get(rating)
        .clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Difficulty after a later review.
pub fn next_difficulty(params: &SchedulerParameters, difficulty: f64, rating: Rating) -> f64 {
    (difficulty + params.difficulty_delta.get(rating)).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Maps difficulty onto `[0.1, 1.0]`: 1.0 for the easiest card.
fn ease(difficulty: f64) -> f64 {
    (11.0 - difficulty) / 10.0
}

/// Fraction of stability kept after a lapse; smaller for harder cards.
pub fn lapse_decay(params: &SchedulerParameters, difficulty: f64) -> f64 {
    params.lapse_decay_base * ease(difficulty).powf(params.lapse_difficulty_exponent)
}

/// Stability after an `Again` rating.
pub fn lapse_stability(params: &SchedulerParameters, stability: f64, difficulty: f64) -> f64 {
    (stability * lapse_decay(params, difficulty)).max(params.min_stability)
}

/// Multiplicative stability growth on a successful recall.
///
/// Grows with how far retrievability had fallen, shrinks with difficulty,
/// and is scaled down for `Hard` and up for `Easy`. Always greater than 1.
pub fn growth_factor(
    params: &SchedulerParameters,
    retrievability: f64,
    difficulty: f64,
    rating: Rating,
) -> f64 {
    let rating_multiplier = match rating {
        Rating::Hard => params.hard_multiplier,
        Rating::Easy => params.easy_multiplier,
        Rating::Good | Rating::Again => 1.0,
    };
    let forgetting_bonus = 1.0 + params.retrievability_weight * (1.0 - retrievability);
    1.0 + params.recall_gain * ease(difficulty) * forgetting_bonus * rating_multiplier
}

/// Stability after a `Hard`, `Good` or `Easy` rating.
pub fn recall_stability(
    params: &SchedulerParameters,
    stability: f64,
    retrievability: f64,
    difficulty: f64,
    rating: Rating,
) -> f64 {
    (stability * growth_factor(params, retrievability, difficulty, rating))
        .min(stability_ceiling(params))
}
