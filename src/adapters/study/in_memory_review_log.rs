//! In-Memory Review Log

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ReviewerId, Timestamp};
use crate::domain::study::ReviewLogEntry;
use crate::ports::ReviewLog;

/// In-memory append-only review log
#[derive(Debug, Clone)]
pub struct InMemoryReviewLog {
    entries: Arc<RwLock<Vec<ReviewLogEntry>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryReviewLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate an outage; every call fails while false.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::StoreUnavailable,
                "Review log is offline",
            ))
        }
    }
}

impl Default for InMemoryReviewLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewLog for InMemoryReviewLog {
    async fn append(&self, entry: &ReviewLogEntry) -> Result<(), DomainError> {
        self.ensure_available()?;
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn entries_between(
        &self,
        reviewer_id: &ReviewerId,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<ReviewLogEntry>, DomainError> {
        self.ensure_available()?;
        let entries = self.entries.read().await;
        let mut found: Vec<ReviewLogEntry> = entries
            .iter()
            .filter(|e| &e.reviewer_id == reviewer_id)
            .filter(|e| e.reviewed_at >= from && e.reviewed_at < until)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.reviewed_at);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CardId;
    use crate::domain::scheduling::Rating;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_717_200_000)
    }

    fn entry(reviewer: &str, reviewed_at: Timestamp) -> ReviewLogEntry {
        ReviewLogEntry {
            reviewer_id: ReviewerId::new(reviewer).unwrap(),
            card_id: CardId::new("femur").unwrap(),
            rating: Rating::Good,
            reviewed_at,
            first_exposure: false,
            session_id: None,
        }
    }

    #[tokio::test]
    async fn window_is_half_open_and_per_reviewer() {
        let log = InMemoryReviewLog::new();
        let until = t0().plus_days(1);
        for e in [
            entry("a", t0().plus_secs(60)),
            entry("a", t0()),
            entry("a", until),
            entry("b", t0()),
        ] {
            log.append(&e).await.unwrap();
        }

        let found = log
            .entries_between(&ReviewerId::new("a").unwrap(), t0(), until)
            .await
            .unwrap();

        assert_eq!(found, vec![entry("a", t0()), entry("a", t0().plus_secs(60))]);
        assert_eq!(log.entry_count().await, 4);
    }

    #[tokio::test]
    async fn outage_fails_calls() {
        let log = InMemoryReviewLog::new();
        log.set_available(false);
        let err = log.append(&entry("a", t0())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);
    }
}
