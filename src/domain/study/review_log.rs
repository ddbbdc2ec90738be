//! Review log entries.
//!
//! One entry per committed review, stamped with the instant it happened.
//! Daily caps count entries by that instant, so a review is charged to the
//! study day it was made in regardless of which session, if any, it
//! belonged to.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardId, ReviewerId, SessionId, Timestamp};
use crate::domain::scheduling::Rating;

/// A committed review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLogEntry {
    pub reviewer_id: ReviewerId,
    pub card_id: CardId,
    pub rating: Rating,
    pub reviewed_at: Timestamp,
    /// The card had never been reviewed before.
    pub first_exposure: bool,
    pub session_id: Option<SessionId>,
}

impl ReviewLogEntry {
    pub fn is_correct(&self) -> bool {
        self.rating.is_success()
    }
}
