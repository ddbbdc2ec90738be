//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::ValidationError as FieldError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Failed to initialize tracing: {0}")]
    TracingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid scheduler setting: {0}")]
    Scheduler(FieldError),

    #[error("Invalid day boundary: {0}")]
    DayBoundary(FieldError),

    #[error("Storage data_dir must not be empty for the file backend")]
    EmptyDataDir,

    #[error("conflict_retries must be at most {max}, got {actual}")]
    TooManyConflictRetries { max: u32, actual: u32 },

    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidLogFilter { directive: String, reason: String },
}
