//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ANATOMY_REVIEW` prefix and nested values use double underscores as separators.
//! Every field has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use anatomy_review::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging).expect("Failed to initialize tracing");
//!
//! println!("Target retention: {}", config.scheduler.target_retention);
//! ```

mod error;
mod limits;
mod logging;
mod scheduler;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use limits::{DayBoundaryConfig, LimitsConfig};
pub use logging::{init_tracing, LoggingConfig, LOG_ENV_VAR};
pub use scheduler::SchedulerConfig;
pub use storage::{StorageBackend, StorageConfig, MAX_CONFLICT_RETRIES};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Memory-model coefficients and interval bounds
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Daily caps on new cards and reviews
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Study-day rollover
    #[serde(default)]
    pub day_boundary: DayBoundaryConfig,

    /// Review state persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ANATOMY_REVIEW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ANATOMY_REVIEW__SCHEDULER__TARGET_RETENTION=0.85` -> `scheduler.target_retention = 0.85`
    /// - `ANATOMY_REVIEW__LIMITS__NEW_CARDS_PER_DAY=10` -> `limits.new_cards_per_day = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ANATOMY_REVIEW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scheduler.validate()?;
        self.day_boundary.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
