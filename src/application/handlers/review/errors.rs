//! Errors returned by the review submission flow.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::scheduling::SchedulingError;
use crate::domain::study::SessionError;
use crate::ports::StoreError;

/// Why a review was not recorded. In every case the stored state is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    /// Concurrent writers kept winning the race for this card.
    #[error("Review not recorded after {attempts} conflicting attempts")]
    ConflictRetriesExhausted { attempts: u32 },

    #[error("Review state store unavailable: {0}")]
    StoreUnavailable(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ReviewError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::Scheduling(e) => e.code(),
            ReviewError::ConflictRetriesExhausted { .. } => ErrorCode::VersionConflict,
            ReviewError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            ReviewError::Session(e) => e.code(),
        }
    }

    /// Whether the caller may simply try the same review again later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReviewError::ConflictRetriesExhausted { .. } | ReviewError::StoreUnavailable(_)
        )
    }
}

impl From<StoreError> for ReviewError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { .. } => ReviewError::ConflictRetriesExhausted { attempts: 1 },
            other => ReviewError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<ReviewError> for DomainError {
    fn from(err: ReviewError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
