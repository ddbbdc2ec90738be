//! Study session repository port.
//!
//! Persists `StudySession` aggregates and answers the day-window query used
//! for daily caps.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReviewerId, SessionId, Timestamp};
use crate::domain::study::StudySession;

/// Repository port for StudySession persistence.
#[async_trait]
pub trait StudySessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` on persistence failure
    async fn save(&self, session: &StudySession) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `StoreUnavailable` on persistence failure
    async fn update(&self, session: &StudySession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<StudySession>, DomainError>;

    /// Sessions of a reviewer with `from <= started_at < until`.
    async fn find_started_between(
        &self,
        reviewer_id: &ReviewerId,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<StudySession>, DomainError>;
}
