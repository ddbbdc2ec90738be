//! Scheduler - pure review update function.
//!
//! `advance` turns (previous state, rating, instant) into the next state.
//! It performs no I/O and reads no ambient clock, so the same inputs always
//! produce the same output.

use serde::{Deserialize, Serialize};

use super::fuzz::{fuzz_interval, fuzz_seed};
use super::memory_model::{
    initial_difficulty, interval_for_retention, lapse_stability, next_difficulty,
    recall_stability, retrievability, stability_ceiling,
};
use super::{CardReviewState, Rating, SchedulerParameters, SchedulingError};
use crate::domain::foundation::{CardId, ReviewerId, StateMachine, Timestamp, ValidationError};

/// Interval each rating would schedule, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalPreview {
    pub again: f64,
    pub hard: f64,
    pub good: f64,
    pub easy: f64,
}

impl IntervalPreview {
    /// Returns the previewed interval for a rating.
    pub fn get(&self, rating: Rating) -> f64 {
        match rating {
            Rating::Again => self.again,
            Rating::Hard => self.hard,
            Rating::Good => self.good,
            Rating::Easy => self.easy,
        }
    }
}

/// Forgetting-curve scheduler over validated parameters.
#[derive(Debug, Clone)]
pub struct Scheduler {
    params: SchedulerParameters,
}

impl Scheduler {
    /// Creates a scheduler, rejecting parameters the memory model cannot use.
    pub fn new(params: SchedulerParameters) -> Result<Self, ValidationError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Scheduler with the default parameters.
    pub fn with_defaults() -> Self {
        Self {
            params: SchedulerParameters::default(),
        }
    }

    /// Returns the parameters in use.
    pub fn parameters(&self) -> &SchedulerParameters {
        &self.params
    }

    /// Computes the state that follows rating `prev` with `rating` at `now`.
    ///
    /// # Errors
    ///
    /// - `ClockRegression` if `now` precedes `prev.last_review`
    /// - `InvariantViolation` if `prev` or the computed state is inconsistent
    ///
    /// On error the caller keeps `prev` as is.
    pub fn advance(
        &self,
        prev: &CardReviewState,
        rating: Rating,
        now: Timestamp,
    ) -> Result<CardReviewState, SchedulingError> {
        prev.check_invariants()?;

        let elapsed_days = match prev.last_review {
            Some(last) if now < last => {
                return Err(SchedulingError::ClockRegression {
                    last_review: last,
                    now,
                })
            }
            Some(last) => now.days_since(&last),
            None => 0.0,
        };

        let (difficulty, stability) = if prev.is_new() {
            (
                initial_difficulty(&self.params, rating),
                self.params
                    .initial_stability
                    .get(rating)
                    .min(stability_ceiling(&self.params)),
            )
        } else {
            let r = retrievability(elapsed_days, prev.stability);
            let difficulty = next_difficulty(&self.params, prev.difficulty, rating);
            let stability = if rating.is_success() {
                recall_stability(&self.params, prev.stability, r, difficulty, rating)
            } else {
                lapse_stability(&self.params, prev.stability, difficulty)
            };
            (difficulty, stability)
        };

        let (reps, lapses) = if rating.is_success() {
            (prev.reps.saturating_add(1), prev.lapses)
        } else {
            (0, prev.lapses.saturating_add(1))
        };

        let interval = self.next_interval(prev, rating, stability);
        let due = now
            .checked_plus_days(interval as i64)
            .ok_or_else(|| SchedulingError::invariant("due date out of range"))?;
        let status = prev
            .status
            .transition_to(prev.status.after(rating))
            .map_err(|e| SchedulingError::invariant(e.to_string()))?;

        let next = CardReviewState {
            card_id: prev.card_id.clone(),
            reviewer_id: prev.reviewer_id.clone(),
            status,
            stability,
            difficulty,
            elapsed_days,
            scheduled_days: interval,
            due,
            last_review: Some(now),
            reps,
            lapses,
            total_reviews: prev.total_reviews.saturating_add(1),
            total_correct: prev.total_correct.saturating_add(u32::from(rating.is_success())),
        };
        next.check_invariants()?;
        Ok(next)
    }

    /// Like `advance`, creating the unseen state when the card has none yet.
    pub fn advance_or_introduce(
        &self,
        prev: Option<&CardReviewState>,
        reviewer_id: &ReviewerId,
        card_id: &CardId,
        rating: Rating,
        now: Timestamp,
    ) -> Result<CardReviewState, SchedulingError> {
        match prev {
            Some(state) => self.advance(state, rating, now),
            None => {
                let unseen = CardReviewState::new(reviewer_id.clone(), card_id.clone(), now);
                self.advance(&unseen, rating, now)
            }
        }
    }

    /// Interval every rating would produce if the card were rated at `now`.
    pub fn preview(
        &self,
        prev: &CardReviewState,
        now: Timestamp,
    ) -> Result<IntervalPreview, SchedulingError> {
        Ok(IntervalPreview {
            again: self.advance(prev, Rating::Again, now)?.scheduled_days,
            hard: self.advance(prev, Rating::Hard, now)?.scheduled_days,
            good: self.advance(prev, Rating::Good, now)?.scheduled_days,
            easy: self.advance(prev, Rating::Easy, now)?.scheduled_days,
        })
    }

    /// Whole-day interval for the new stability.
    ///
    /// Pipeline: invert the forgetting curve, fuzz, round, keep `Good`/`Easy`
    /// ahead of the previous interval, clamp to the configured bounds.
    fn next_interval(&self, prev: &CardReviewState, rating: Rating, stability: f64) -> f64 {
        let raw = interval_for_retention(stability, self.params.target_retention);
        let mut interval = fuzz_interval(&self.params, raw, fuzz_seed(prev)).round();

        if matches!(rating, Rating::Good | Rating::Easy) && !prev.is_new() {
            interval = interval.max(prev.scheduled_days.round() + 1.0);
        }

        let lower = self.params.min_interval_days.ceil();
        let upper = self.params.max_interval_days.floor().max(lower);
        interval.clamp(lower, upper)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::with_defaults()
    }
}
