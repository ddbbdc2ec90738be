//! GetReviewStatsHandler - Query handler for a reviewer's collection overview.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ReviewerId};
use crate::domain::study::{DailyProgress, DayBoundary, ReviewStats};
use crate::ports::{Clock, ReviewLog, ReviewStateStore, StoreError, StudySessionRepository};

/// Errors from statistics queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("Review state store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Session store unavailable: {0}")]
    SessionStoreUnavailable(String),

    #[error("Review log unavailable: {0}")]
    ReviewLogUnavailable(String),
}

impl StatsError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::StoreUnavailable
    }
}

impl From<StoreError> for StatsError {
    fn from(err: StoreError) -> Self {
        StatsError::StoreUnavailable(err.to_string())
    }
}

impl From<DomainError> for StatsError {
    fn from(err: DomainError) -> Self {
        StatsError::SessionStoreUnavailable(err.to_string())
    }
}

/// Query for a reviewer's stats at the current instant.
#[derive(Debug, Clone)]
pub struct GetReviewStatsQuery {
    pub reviewer_id: ReviewerId,
}

/// Handler for stats queries.
pub struct GetReviewStatsHandler {
    store: Arc<dyn ReviewStateStore>,
    sessions: Arc<dyn StudySessionRepository>,
    review_log: Arc<dyn ReviewLog>,
    clock: Arc<dyn Clock>,
    day_boundary: DayBoundary,
}

impl GetReviewStatsHandler {
    pub fn new(
        store: Arc<dyn ReviewStateStore>,
        sessions: Arc<dyn StudySessionRepository>,
        review_log: Arc<dyn ReviewLog>,
        clock: Arc<dyn Clock>,
        day_boundary: DayBoundary,
    ) -> Self {
        Self {
            store,
            sessions,
            review_log,
            clock,
            day_boundary,
        }
    }

    pub async fn handle(&self, query: GetReviewStatsQuery) -> Result<ReviewStats, StatsError> {
        let now = self.clock.now();
        let window = self.day_boundary.window_containing(now);

        let (states, sessions, reviews) = futures::try_join!(
            async {
                self.store
                    .list_for_reviewer(&query.reviewer_id)
                    .await
                    .map_err(StatsError::from)
            },
            async {
                self.sessions
                    .find_started_between(&query.reviewer_id, window.start, window.end)
                    .await
                    .map_err(StatsError::from)
            },
            async {
                self.review_log
                    .entries_between(&query.reviewer_id, window.start, window.end)
                    .await
                    .map_err(|e| StatsError::ReviewLogUnavailable(e.to_string()))
            },
        )?;

        let progress = DailyProgress::from_activity(window, &sessions, &reviews);
        Ok(ReviewStats::compute(&states, now, progress))
    }
}
