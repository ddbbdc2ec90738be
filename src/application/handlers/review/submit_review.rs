//! SubmitReviewHandler - Command handler that applies one rating to a card.
//!
//! Read, advance and write form one optimistic transaction per
//! (reviewer, card) key. When another writer commits first, the handler
//! re-reads the fresh state and recomputes, up to a bounded number of
//! retries. The review log and the session counters move only after the
//! write committed. Once it has, the review stands: a failure in that
//! follow-up bookkeeping is logged and returned alongside the result, never
//! as an error, so callers do not resubmit a review that already counted.

use std::sync::Arc;

use tracing::{debug, warn};

use super::ReviewError;
use crate::application::handlers::study::{RecordReviewCommand, RecordReviewHandler};
use crate::domain::foundation::{CardId, DomainError, ReviewerId, SessionId};
use crate::domain::scheduling::{CardReviewState, Rating, Scheduler};
use crate::domain::study::{ReviewLogEntry, SessionError, StudySession};
use crate::ports::{
    Clock, ReviewLog, ReviewStateStore, StateVersion, StoreError, StudySessionRepository,
};

/// Command to rate one card.
#[derive(Debug, Clone)]
pub struct SubmitReviewCommand {
    pub reviewer_id: ReviewerId,
    pub card_id: CardId,
    pub rating: Rating,
    /// Session to count the review in, if any.
    pub session_id: Option<SessionId>,
}

/// Result of a committed review.
#[derive(Debug, Clone)]
pub struct SubmitReviewResult {
    pub state: CardReviewState,
    pub version: StateVersion,
    /// The card had never been reviewed before this rating.
    pub first_exposure: bool,
    /// Store writes attempted, including the one that committed.
    pub attempts: u32,
    /// The session after counting this review.
    pub session: Option<StudySession>,
    /// Counting the review in its session failed after the commit.
    pub session_error: Option<SessionError>,
    /// Appending to the review log failed after the commit.
    pub log_error: Option<DomainError>,
}

impl SubmitReviewResult {
    /// True when the session and the review log both took the review.
    pub fn is_fully_recorded(&self) -> bool {
        self.session_error.is_none() && self.log_error.is_none()
    }
}

/// Handler for rating cards.
pub struct SubmitReviewHandler {
    store: Arc<dyn ReviewStateStore>,
    review_log: Arc<dyn ReviewLog>,
    recorder: RecordReviewHandler,
    clock: Arc<dyn Clock>,
    scheduler: Scheduler,
    conflict_retries: u32,
}

impl SubmitReviewHandler {
    pub fn new(
        store: Arc<dyn ReviewStateStore>,
        sessions: Arc<dyn StudySessionRepository>,
        review_log: Arc<dyn ReviewLog>,
        clock: Arc<dyn Clock>,
        scheduler: Scheduler,
        conflict_retries: u32,
    ) -> Self {
        Self {
            store,
            review_log,
            recorder: RecordReviewHandler::new(sessions),
            clock,
            scheduler,
            conflict_retries,
        }
    }

    pub async fn handle(&self, cmd: SubmitReviewCommand) -> Result<SubmitReviewResult, ReviewError> {
        if let Some(session_id) = &cmd.session_id {
            self.recorder.ensure_open(session_id, &cmd.reviewer_id).await?;
        }

        let max_attempts = self.conflict_retries.saturating_add(1);
        let mut attempt = 0;

        let (state, version, first_exposure, reviewed_at) = loop {
            attempt += 1;

            let current = self.store.get(&cmd.reviewer_id, &cmd.card_id).await?;
            let (prev, expected) = match &current {
                Some(stored) => (Some(&stored.state), Some(stored.version)),
                None => (None, None),
            };
            let first_exposure = prev.map_or(true, CardReviewState::is_new);

            let now = self.clock.now();
            let next = self
                .scheduler
                .advance_or_introduce(prev, &cmd.reviewer_id, &cmd.card_id, cmd.rating, now)
                .map_err(|e| {
                    warn!(
                        reviewer_id = %cmd.reviewer_id,
                        card_id = %cmd.card_id,
                        error = %e,
                        "Review rejected by scheduler"
                    );
                    e
                })?;

            match self.store.put(&next, expected).await {
                Ok(version) => break (next, version, first_exposure, now),
                Err(StoreError::Conflict { expected, actual }) if attempt < max_attempts => {
                    warn!(
                        reviewer_id = %cmd.reviewer_id,
                        card_id = %cmd.card_id,
                        attempt,
                        ?expected,
                        ?actual,
                        "Concurrent review detected, retrying with fresh state"
                    );
                }
                Err(StoreError::Conflict { .. }) => {
                    warn!(
                        reviewer_id = %cmd.reviewer_id,
                        card_id = %cmd.card_id,
                        attempts = attempt,
                        "Giving up after repeated review conflicts"
                    );
                    return Err(ReviewError::ConflictRetriesExhausted { attempts: attempt });
                }
                Err(e) => return Err(e.into()),
            }
        };

        debug!(
            reviewer_id = %cmd.reviewer_id,
            card_id = %cmd.card_id,
            rating = %cmd.rating,
            status = %state.status,
            scheduled_days = state.scheduled_days,
            %version,
            "Review committed"
        );

        let entry = ReviewLogEntry {
            reviewer_id: cmd.reviewer_id.clone(),
            card_id: cmd.card_id.clone(),
            rating: cmd.rating,
            reviewed_at,
            first_exposure,
            session_id: cmd.session_id,
        };
        let log_error = match self.review_log.append(&entry).await {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    reviewer_id = %cmd.reviewer_id,
                    card_id = %cmd.card_id,
                    error = %e,
                    "Committed review missing from review log"
                );
                Some(e)
            }
        };

        let (session, session_error) = match cmd.session_id {
            Some(session_id) => {
                let recorded = self
                    .recorder
                    .handle(RecordReviewCommand {
                        session_id,
                        reviewer_id: cmd.reviewer_id.clone(),
                        card_id: cmd.card_id.clone(),
                        rating: cmd.rating,
                        first_exposure,
                    })
                    .await;
                match recorded {
                    Ok(session) => (Some(session), None),
                    Err(e) => {
                        warn!(
                            session_id = %session_id,
                            card_id = %cmd.card_id,
                            error = %e,
                            "Committed review not counted in session"
                        );
                        (None, Some(e))
                    }
                }
            }
            None => (None, None),
        };

        Ok(SubmitReviewResult {
            state,
            version,
            first_exposure,
            attempts: attempt,
            session,
            session_error,
            log_error,
        })
    }
}
