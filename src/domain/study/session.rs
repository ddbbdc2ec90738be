//! StudySession aggregate.
//!
//! A bounded stretch of reviewing. Counters only move when the caller has
//! already committed the matching review to the store.

use serde::{Deserialize, Serialize};

use super::SessionError;
use crate::domain::foundation::{ReviewerId, SessionId, Timestamp};
use crate::domain::scheduling::Rating;

/// Result of asking a session to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    /// The session was open and is now closed.
    Ended { duration_seconds: i64 },
    /// The session had already been closed; nothing changed.
    AlreadyEnded { duration_seconds: i64 },
}

impl EndOutcome {
    pub fn duration_seconds(&self) -> i64 {
        match self {
            EndOutcome::Ended { duration_seconds } | EndOutcome::AlreadyEnded { duration_seconds } => {
                *duration_seconds
            }
        }
    }

    pub fn was_noop(&self) -> bool {
        matches!(self, EndOutcome::AlreadyEnded { .. })
    }
}

/// Study session aggregate.
///
/// # Invariants
///
/// - `cards_correct <= cards_reviewed`
/// - `new_cards_introduced <= cards_reviewed`
/// - `ended_at >= started_at` once set; immutable afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub session_id: SessionId,
    pub reviewer_id: ReviewerId,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub cards_reviewed: u32,
    pub cards_correct: u32,
    /// Reviews that were the card's first exposure.
    pub new_cards_introduced: u32,
}

impl StudySession {
    /// Opens a session at `now`.
    pub fn start(session_id: SessionId, reviewer_id: ReviewerId, now: Timestamp) -> Self {
        Self {
            session_id,
            reviewer_id,
            started_at: now,
            ended_at: None,
            cards_reviewed: 0,
            cards_correct: 0,
            new_cards_introduced: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Counts one committed review.
    ///
    /// # Errors
    ///
    /// `AlreadyEnded` if the session was closed.
    pub fn record(&mut self, rating: Rating, first_exposure: bool) -> Result<(), SessionError> {
        if !self.is_open() {
            return Err(SessionError::already_ended(self.session_id));
        }
        self.cards_reviewed += 1;
        if rating.is_success() {
            self.cards_correct += 1;
        }
        if first_exposure {
            self.new_cards_introduced += 1;
        }
        Ok(())
    }

    /// Closes the session. Ending twice is a reported no-op.
    ///
    /// # Errors
    ///
    /// `ClockRegression` if `now` precedes `started_at` on an open session.
    pub fn end(&mut self, now: Timestamp) -> Result<EndOutcome, SessionError> {
        if let Some(ended_at) = self.ended_at {
            return Ok(EndOutcome::AlreadyEnded {
                duration_seconds: ended_at.duration_since(&self.started_at).num_seconds(),
            });
        }
        if now < self.started_at {
            return Err(SessionError::ClockRegression {
                started_at: self.started_at,
                now,
            });
        }
        self.ended_at = Some(now);
        Ok(EndOutcome::Ended {
            duration_seconds: now.duration_since(&self.started_at).num_seconds(),
        })
    }

    /// Length of a closed session; `None` while open.
    pub fn duration_seconds(&self) -> Option<i64> {
        self.ended_at
            .map(|ended| ended.duration_since(&self.started_at).num_seconds())
    }

    /// Reviews of cards the reviewer had already seen before.
    pub fn reviews_completed(&self) -> u32 {
        self.cards_reviewed - self.new_cards_introduced
    }

    /// Share of reviews not rated `Again`; `None` before the first review.
    pub fn accuracy(&self) -> Option<f64> {
        if self.cards_reviewed == 0 {
            None
        } else {
            Some(f64::from(self.cards_correct) / f64::from(self.cards_reviewed))
        }
    }
}
