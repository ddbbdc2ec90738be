//! Review State Store port.
//!
//! Persists one `CardReviewState` per (reviewer, card) key with per-key
//! optimistic concurrency: every stored state carries a `StateVersion`, and a
//! write only commits when the caller names the version it read.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardId, ErrorCode, ReviewerId, Timestamp};
use crate::domain::scheduling::CardReviewState;

/// Store-assigned revision of one key. Starts at 1 and grows by one per write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVersion(u64);

impl StateVersion {
    pub const FIRST: StateVersion = StateVersion(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for StateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A stored state and the version it was read at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedState {
    pub state: CardReviewState,
    pub version: StateVersion,
}

/// Errors that can occur during review-state storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The stored version differs from the one the writer read.
    #[error("Version conflict: expected {expected:?}, found {actual:?}")]
    Conflict {
        expected: Option<StateVersion>,
        actual: Option<StateVersion>,
    },

    #[error("Review state store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to (de)serialize review state: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Conflict { .. } => ErrorCode::VersionConflict,
            StoreError::Unavailable(_) | StoreError::Serialization(_) => {
                ErrorCode::StoreUnavailable
            }
        }
    }
}

/// Port for per-card review state persistence.
///
/// Implementations must make `put` atomic per key: the version check and the
/// write happen together, and a write either fully commits or leaves the
/// previous value in place.
#[async_trait]
pub trait ReviewStateStore: Send + Sync {
    /// Load the state for one card.
    ///
    /// Returns `None` if the reviewer has never reviewed the card.
    async fn get(
        &self,
        reviewer_id: &ReviewerId,
        card_id: &CardId,
    ) -> Result<Option<VersionedState>, StoreError>;

    /// Write `state` under its (reviewer, card) key.
    ///
    /// `expected` is the version the caller read, or `None` when it read
    /// nothing. Returns the new version.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the stored version differs from `expected`
    /// - `Unavailable` / `Serialization` on persistence failure
    async fn put(
        &self,
        state: &CardReviewState,
        expected: Option<StateVersion>,
    ) -> Result<StateVersion, StoreError>;

    /// All non-new states of the reviewer with `due <= instant`.
    ///
    /// Order is unspecified; callers sort.
    async fn due_before(
        &self,
        reviewer_id: &ReviewerId,
        instant: Timestamp,
    ) -> Result<Vec<CardReviewState>, StoreError>;

    /// Every state the reviewer has, in any status.
    async fn list_for_reviewer(
        &self,
        reviewer_id: &ReviewerId,
    ) -> Result<Vec<CardReviewState>, StoreError>;
}
