//! Review log port.
//!
//! Append-only record of committed reviews, queried by day window for the
//! daily caps.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReviewerId, Timestamp};
use crate::domain::study::ReviewLogEntry;

#[async_trait]
pub trait ReviewLog: Send + Sync {
    /// Appends one committed review.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` on persistence failure
    async fn append(&self, entry: &ReviewLogEntry) -> Result<(), DomainError>;

    /// Entries of a reviewer with `from <= reviewed_at < until`, oldest first.
    async fn entries_between(
        &self,
        reviewer_id: &ReviewerId,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<ReviewLogEntry>, DomainError>;
}
