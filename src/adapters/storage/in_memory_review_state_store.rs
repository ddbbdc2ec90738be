//! In-Memory Review State Store Adapter
//!
//! Keeps versioned review states in a map guarded by an async lock.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::next_version;
use crate::domain::foundation::{CardId, ReviewerId, Timestamp};
use crate::domain::scheduling::CardReviewState;
use crate::ports::{ReviewStateStore, StateVersion, StoreError, VersionedState};

type Key = (ReviewerId, CardId);

/// In-memory storage for review states
#[derive(Debug, Clone)]
pub struct InMemoryReviewStateStore {
    states: Arc<RwLock<HashMap<Key, VersionedState>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryReviewStateStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            states: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate an outage; every call fails with `Unavailable` while false.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.states.write().await.clear();
    }

    /// Get the number of stored states
    pub async fn state_count(&self) -> usize {
        self.states.read().await.len()
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::unavailable("in-memory store is offline"))
        }
    }
}

impl Default for InMemoryReviewStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewStateStore for InMemoryReviewStateStore {
    async fn get(
        &self,
        reviewer_id: &ReviewerId,
        card_id: &CardId,
    ) -> Result<Option<VersionedState>, StoreError> {
        self.ensure_available()?;
        let states = self.states.read().await;
        Ok(states
            .get(&(reviewer_id.clone(), card_id.clone()))
            .cloned())
    }

    async fn put(
        &self,
        state: &CardReviewState,
        expected: Option<StateVersion>,
    ) -> Result<StateVersion, StoreError> {
        self.ensure_available()?;
        let key = (state.reviewer_id.clone(), state.card_id.clone());
        let mut states = self.states.write().await;

        let version = next_version(states.get(&key).map(|v| v.version), expected)?;
        states.insert(
            key,
            VersionedState {
                state: state.clone(),
                version,
            },
        );
        Ok(version)
    }

    async fn due_before(
        &self,
        reviewer_id: &ReviewerId,
        instant: Timestamp,
    ) -> Result<Vec<CardReviewState>, StoreError> {
        self.ensure_available()?;
        let states = self.states.read().await;
        Ok(states
            .values()
            .filter(|v| &v.state.reviewer_id == reviewer_id && v.state.is_due(instant))
            .map(|v| v.state.clone())
            .collect())
    }

    async fn list_for_reviewer(
        &self,
        reviewer_id: &ReviewerId,
    ) -> Result<Vec<CardReviewState>, StoreError> {
        self.ensure_available()?;
        let states = self.states.read().await;
        Ok(states
            .values()
            .filter(|v| &v.state.reviewer_id == reviewer_id)
            .map(|v| v.state.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::{Rating, Scheduler};

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_717_200_000)
    }

    fn reviewer(id: &str) -> ReviewerId {
        ReviewerId::new(id).unwrap()
    }

    fn reviewed(reviewer_id: &str, card: &str, rating: Rating) -> CardReviewState {
        Scheduler::with_defaults()
            .advance_or_introduce(
                None,
                &reviewer(reviewer_id),
                &CardId::new(card).unwrap(),
                rating,
                t0(),
            )
            .unwrap()
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_key() {
        let store = InMemoryReviewStateStore::new();
        let found = store
            .get(&reviewer("a"), &CardId::new("x").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn put_then_get_returns_versioned_state() {
        let store = InMemoryReviewStateStore::new();
        let state = reviewed("a", "femur", Rating::Good);

        let version = store.put(&state, None).await.unwrap();
        let found = store.get(&state.reviewer_id, &state.card_id).await.unwrap().unwrap();

        assert_eq!(version, StateVersion::FIRST);
        assert_eq!(found.version, version);
        assert_eq!(found.state, state);
    }

    #[tokio::test]
    async fn stale_write_is_rejected_and_keeps_current_value() {
        let store = InMemoryReviewStateStore::new();
        let first = reviewed("a", "femur", Rating::Good);
        store.put(&first, None).await.unwrap();

        let other = reviewed("a", "femur", Rating::Again);
        let err = store.put(&other, None).await.unwrap_err();

        assert!(err.is_conflict());
        let found = store.get(&first.reviewer_id, &first.card_id).await.unwrap().unwrap();
        assert_eq!(found.state, first);
    }

    #[tokio::test]
    async fn due_before_filters_reviewer_status_and_instant() {
        let store = InMemoryReviewStateStore::new();
        let mine = reviewed("a", "femur", Rating::Good);
        let theirs = reviewed("b", "femur", Rating::Good);
        let unseen = CardReviewState::new(reviewer("a"), CardId::new("ulna").unwrap(), t0());
        store.put(&mine, None).await.unwrap();
        store.put(&theirs, None).await.unwrap();
        store.put(&unseen, None).await.unwrap();

        assert!(store.due_before(&reviewer("a"), t0()).await.unwrap().is_empty());
        let due = store.due_before(&reviewer("a"), mine.due).await.unwrap();
        assert_eq!(due, vec![mine]);
        assert_eq!(store.list_for_reviewer(&reviewer("a")).await.unwrap().len(), 2);
        assert_eq!(store.state_count().await, 3);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemoryReviewStateStore::new();
        store.set_available(false);

        let err = store.list_for_reviewer(&reviewer("a")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        store.set_available(true);
        assert!(store.list_for_reviewer(&reviewer("a")).await.is_ok());
    }
}
