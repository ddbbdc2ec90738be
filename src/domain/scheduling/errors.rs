//! Scheduling error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

/// Errors raised by `Scheduler::advance`.
///
/// Either variant means the previous card state must be kept unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulingError {
    #[error("Clock regression: review at {now:?} precedes last review at {last_review:?}")]
    ClockRegression {
        last_review: Timestamp,
        now: Timestamp,
    },

    #[error("Invariant violation: {reason}")]
    InvariantViolation { reason: String },
}

impl SchedulingError {
    pub fn invariant(reason: impl Into<String>) -> Self {
        SchedulingError::InvariantViolation {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SchedulingError::ClockRegression { .. } => ErrorCode::ClockRegression,
            SchedulingError::InvariantViolation { .. } => ErrorCode::InvariantViolation,
        }
    }
}

impl From<SchedulingError> for DomainError {
    fn from(err: SchedulingError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_regression_maps_to_code() {
        let err = SchedulingError::ClockRegression {
            last_review: Timestamp::from_unix_secs(200),
            now: Timestamp::from_unix_secs(100),
        };
        assert_eq!(err.code(), ErrorCode::ClockRegression);
        assert!(err.to_string().starts_with("Clock regression"));
    }

    #[test]
    fn invariant_violation_converts_to_domain_error() {
        let err: DomainError = SchedulingError::invariant("stability must be positive").into();
        assert_eq!(err.code, ErrorCode::InvariantViolation);
        assert!(err.message.contains("stability must be positive"));
    }
}
