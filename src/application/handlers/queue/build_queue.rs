//! BuildQueueHandler - Query handler producing a reviewer's next cards.
//!
//! Fetches due states, known states, the catalog, today's sessions and
//! today's review log concurrently. Any failed fetch fails the whole query so a queue is never
//! silently shortened by an outage.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode, ReviewerId, Timestamp};
use crate::domain::queue::{DailyAllowance, DailyLimits, QueuePlanner, ReviewQueue};
use crate::domain::study::{DailyProgress, DayBoundary};
use crate::ports::{
    CardCatalog, CatalogError, Clock, ReviewLog, ReviewStateStore, StoreError,
    StudySessionRepository,
};

/// Why no queue was produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueueError {
    #[error("Review state store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Card catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Session store unavailable: {0}")]
    SessionStoreUnavailable(String),

    #[error("Review log unavailable: {0}")]
    ReviewLogUnavailable(String),
}

impl QueueError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QueueError::StoreUnavailable(_)
            | QueueError::SessionStoreUnavailable(_)
            | QueueError::ReviewLogUnavailable(_) => ErrorCode::StoreUnavailable,
            QueueError::CatalogUnavailable(_) => ErrorCode::CatalogUnavailable,
        }
    }
}

impl From<StoreError> for QueueError {
    fn from(err: StoreError) -> Self {
        QueueError::StoreUnavailable(err.to_string())
    }
}

impl From<CatalogError> for QueueError {
    fn from(err: CatalogError) -> Self {
        QueueError::CatalogUnavailable(err.to_string())
    }
}

impl From<DomainError> for QueueError {
    fn from(err: DomainError) -> Self {
        QueueError::SessionStoreUnavailable(err.to_string())
    }
}

/// Query for a reviewer's queue.
#[derive(Debug, Clone)]
pub struct BuildQueueQuery {
    pub reviewer_id: ReviewerId,
    /// Overrides the configured daily caps for this query.
    pub limits: Option<DailyLimits>,
}

impl BuildQueueQuery {
    pub fn new(reviewer_id: ReviewerId) -> Self {
        Self {
            reviewer_id,
            limits: None,
        }
    }

    pub fn with_limits(mut self, new_limit: u32, review_limit: u32) -> Self {
        self.limits = Some(DailyLimits {
            new_cards_per_day: new_limit,
            reviews_per_day: review_limit,
        });
        self
    }
}

/// Queue plus the figures it was derived from.
#[derive(Debug, Clone)]
pub struct BuildQueueResult {
    pub queue: ReviewQueue,
    pub allowance: DailyAllowance,
    pub progress: DailyProgress,
    pub generated_at: Timestamp,
}

/// Handler for queue queries.
pub struct BuildQueueHandler {
    store: Arc<dyn ReviewStateStore>,
    catalog: Arc<dyn CardCatalog>,
    sessions: Arc<dyn StudySessionRepository>,
    review_log: Arc<dyn ReviewLog>,
    clock: Arc<dyn Clock>,
    limits: DailyLimits,
    day_boundary: DayBoundary,
}

impl BuildQueueHandler {
    pub fn new(
        store: Arc<dyn ReviewStateStore>,
        catalog: Arc<dyn CardCatalog>,
        sessions: Arc<dyn StudySessionRepository>,
        review_log: Arc<dyn ReviewLog>,
        clock: Arc<dyn Clock>,
        limits: DailyLimits,
        day_boundary: DayBoundary,
    ) -> Self {
        Self {
            store,
            catalog,
            sessions,
            review_log,
            clock,
            limits,
            day_boundary,
        }
    }

    pub async fn handle(&self, query: BuildQueueQuery) -> Result<BuildQueueResult, QueueError> {
        let now = self.clock.now();
        let window = self.day_boundary.window_containing(now);
        let reviewer_id = &query.reviewer_id;

        let (due, known, catalog, sessions, reviews) = futures::try_join!(
            async {
                self.store
                    .due_before(reviewer_id, now)
                    .await
                    .map_err(QueueError::from)
            },
            async {
                self.store
                    .list_for_reviewer(reviewer_id)
                    .await
                    .map_err(QueueError::from)
            },
            async { self.catalog.ordered_card_ids().await.map_err(QueueError::from) },
            async {
                self.sessions
                    .find_started_between(reviewer_id, window.start, window.end)
                    .await
                    .map_err(QueueError::from)
            },
            async {
                self.review_log
                    .entries_between(reviewer_id, window.start, window.end)
                    .await
                    .map_err(|e| QueueError::ReviewLogUnavailable(e.to_string()))
            },
        )?;

        let progress = DailyProgress::from_activity(window, &sessions, &reviews);
        let allowance = DailyAllowance::remaining(query.limits.unwrap_or(self.limits), &progress);
        let queue = QueuePlanner::plan(due, &known, &catalog, now, allowance);

        debug!(
            reviewer_id = %reviewer_id,
            reviews = queue.reviews.len(),
            new_cards = queue.new_cards.len(),
            remaining_reviews = allowance.reviews,
            remaining_new = allowance.new_cards,
            "Queue built"
        );

        Ok(BuildQueueResult {
            queue,
            allowance,
            progress,
            generated_at: now,
        })
    }
}
