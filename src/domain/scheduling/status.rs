//! ReviewStatus enum: the per-card learning state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Rating;
use crate::domain::foundation::StateMachine;

/// Where a card sits in the learning lifecycle.
///
/// `Review` is the steady state; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Never reviewed.
    #[default]
    New,
    /// In initial learning phase.
    Learning,
    /// Regular spaced review.
    Review,
    /// Forgotten after reaching review, being re-learned.
    Relearning,
}

impl ReviewStatus {
    /// Target state after rating a card in this state.
    ///
    /// | From       | Again      | Hard       | Good   | Easy   |
    /// |------------|------------|------------|--------|--------|
    /// | New        | Learning   | Learning   | Learning | Review |
    /// | Learning   | Learning   | Learning   | Review | Review |
    /// | Review     | Relearning | Review     | Review | Review |
    /// | Relearning | Relearning | Relearning | Review | Review |
    ///
    /// Only `Easy` takes a new card straight to `Review`. A first `Good`
    /// lands in `Learning` and needs one more successful review to graduate,
    /// even though its first interval is already at least a day.
    pub fn after(&self, rating: Rating) -> ReviewStatus {
        use Rating::*;
        use ReviewStatus::*;
        match (self, rating) {
            (New, Easy) => Review,
            (New, _) => Learning,
            (Learning, Again | Hard) => Learning,
            (Learning, Good | Easy) => Review,
            (Review, Again) => Relearning,
            (Review, _) => Review,
            (Relearning, Again | Hard) => Relearning,
            (Relearning, Good | Easy) => Review,
        }
    }

    /// Returns true for cards that have never been rated.
    pub fn is_new(&self) -> bool {
        matches!(self, ReviewStatus::New)
    }
}

impl StateMachine for ReviewStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReviewStatus::*;
        matches!(
            (self, target),
            (New, Learning)
                | (New, Review)
                | (Learning, Learning)
                | (Learning, Review)
                | (Review, Review)
                | (Review, Relearning)
                | (Relearning, Relearning)
                | (Relearning, Review)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReviewStatus::*;
        match self {
            New => vec![Learning, Review],
            Learning => vec![Learning, Review],
            Review => vec![Review, Relearning],
            Relearning => vec![Relearning, Review],
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewStatus::New => "New",
            ReviewStatus::Learning => "Learning",
            ReviewStatus::Review => "Review",
            ReviewStatus::Relearning => "Relearning",
        };
        write!(f, "{}", s)
    }
}
