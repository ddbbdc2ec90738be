//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Upper bound for `conflict_retries`.
pub const MAX_CONFLICT_RETRIES: u32 = 10;

/// Review state persistence backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which review state store to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Retries after a concurrent write to the same card
    #[serde(default = "default_conflict_retries")]
    pub conflict_retries: u32,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        if self.conflict_retries > MAX_CONFLICT_RETRIES {
            return Err(ValidationError::TooManyConflictRetries {
                max: MAX_CONFLICT_RETRIES,
                actual: self.conflict_retries,
            });
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            conflict_retries: default_conflict_retries(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/reviews")
}

fn default_conflict_retries() -> u32 {
    3
}
