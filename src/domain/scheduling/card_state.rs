//! CardReviewState aggregate - the memory model of one card for one reviewer.

use serde::{Deserialize, Serialize};

use super::memory_model::retrievability;
use super::{ReviewStatus, SchedulingError};
use crate::domain::foundation::{CardId, ReviewerId, Timestamp};

/// Lower bound of the difficulty scale.
pub const MIN_DIFFICULTY: f64 = 1.0;

/// Upper bound of the difficulty scale.
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Placeholder stability carried by unseen cards. Never read by the scheduler.
pub const UNSEEN_STABILITY: f64 = 1.0;

/// Placeholder difficulty carried by unseen cards. Never read by the scheduler.
pub const UNSEEN_DIFFICULTY: f64 = 5.5;

/// Review state for one (reviewer, card) pair.
///
/// Created lazily in `New` the first time a reviewer meets a card and then
/// replaced wholesale by `Scheduler::advance` once per review.
///
/// # Invariants
///
/// - `stability > 0` and finite
/// - `difficulty` in `[1, 10]`
/// - `due >= last_review` when `last_review` is set
/// - `status == New` iff `last_review` is `None` iff `reps == 0 && lapses == 0`
/// - `total_correct <= total_reviews`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardReviewState {
    /// Flashcard being scheduled.
    pub card_id: CardId,

    /// Learner who owns this state.
    pub reviewer_id: ReviewerId,

    /// Position in the learning state machine.
    pub status: ReviewStatus,

    /// Days until retrievability decays to 90%.
    pub stability: f64,

    /// Intrinsic hardness on a 1-10 scale.
    pub difficulty: f64,

    /// Days between the previous review and the latest one.
    pub elapsed_days: f64,

    /// Interval chosen at the latest review.
    pub scheduled_days: f64,

    /// Instant at which the card re-enters the due queue.
    pub due: Timestamp,

    /// When the card was last rated; `None` only while `New`.
    pub last_review: Option<Timestamp>,

    /// Successful reviews since the last lapse.
    pub reps: u32,

    /// `Again` ratings ever recorded.
    pub lapses: u32,

    /// Lifetime review count.
    pub total_reviews: u32,

    /// Lifetime non-`Again` review count.
    pub total_correct: u32,
}

impl CardReviewState {
    /// Creates the unseen state for a card first encountered at `now`.
    pub fn new(reviewer_id: ReviewerId, card_id: CardId, now: Timestamp) -> Self {
        Self {
            card_id,
            reviewer_id,
            status: ReviewStatus::New,
            stability: UNSEEN_STABILITY,
            difficulty: UNSEEN_DIFFICULTY,
            elapsed_days: 0.0,
            scheduled_days: 0.0,
            due: now,
            last_review: None,
            reps: 0,
            lapses: 0,
            total_reviews: 0,
            total_correct: 0,
        }
    }

    /// Returns true while the card has never been rated.
    pub fn is_new(&self) -> bool {
        self.status.is_new()
    }

    /// Returns true for reviewed cards whose due instant has passed.
    pub fn is_due(&self, now: Timestamp) -> bool {
        !self.is_new() && self.due <= now
    }

    /// Estimated probability of recall at `now`.
    ///
    /// Always 1.0 for unseen cards.
    pub fn retrievability_at(&self, now: Timestamp) -> f64 {
        match self.last_review {
            None => 1.0,
            Some(last) => retrievability(now.days_since(&last).max(0.0), self.stability),
        }
    }

    /// Checks every invariant listed on the type.
    pub fn check_invariants(&self) -> Result<(), SchedulingError> {
        if !self.stability.is_finite() || self.stability <= 0.0 {
            return Err(SchedulingError::invariant(format!(
                "stability must be positive, got {}",
                self.stability
            )));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(SchedulingError::invariant(format!(
                "difficulty must be within [1, 10], got {}",
                self.difficulty
            )));
        }
        if !self.elapsed_days.is_finite() || self.elapsed_days < 0.0 {
            return Err(SchedulingError::invariant(format!(
                "elapsed_days must be non-negative, got {}",
                self.elapsed_days
            )));
        }
        if let Some(last) = self.last_review {
            if self.due < last {
                return Err(SchedulingError::invariant("due precedes last_review"));
            }
        }

        let unseen_counters = self.reps == 0 && self.lapses == 0;
        let new = self.is_new();
        if new != self.last_review.is_none() || new != unseen_counters {
            return Err(SchedulingError::invariant(format!(
                "status {} inconsistent with last_review/reps/lapses",
                self.status
            )));
        }
        if self.total_correct > self.total_reviews {
            return Err(SchedulingError::invariant(
                "total_correct exceeds total_reviews",
            ));
        }
        Ok(())
    }
}
