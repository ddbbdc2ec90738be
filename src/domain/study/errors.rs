//! Study-session error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Session was already closed and no longer accepts reviews.
    AlreadyEnded(SessionId),
    /// End instant precedes the start instant.
    ClockRegression { started_at: Timestamp, now: Timestamp },
    /// Session belongs to a different reviewer.
    ReviewerMismatch(SessionId),
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn already_ended(id: SessionId) -> Self {
        SessionError::AlreadyEnded(id)
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::AlreadyEnded(_) => ErrorCode::SessionEnded,
            SessionError::ClockRegression { .. } => ErrorCode::ClockRegression,
            SessionError::ReviewerMismatch(_) => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::StoreUnavailable,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Study session not found: {}", id),
            SessionError::AlreadyEnded(id) => format!("Study session already ended: {}", id),
            SessionError::ClockRegression { started_at, now } => format!(
                "Session end {} precedes its start {}",
                now.as_datetime(),
                started_at.as_datetime()
            ),
            SessionError::ReviewerMismatch(id) => {
                format!("Study session {} belongs to another reviewer", id)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        SessionError::Infrastructure(err.to_string())
    }
}
