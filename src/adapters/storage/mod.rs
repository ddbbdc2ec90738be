//! Storage Adapters
//!
//! Implementations of the ReviewStateStore port.
//!
//! ## Available Adapters
//!
//! - **FileReviewStateStore** - One JSON document per reviewer on disk
//! - **InMemoryReviewStateStore** - Stores state in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileReviewStateStore, InMemoryReviewStateStore};
//!
//! // Production: file-based storage
//! let store = FileReviewStateStore::new("./data/reviews");
//!
//! // Testing: in-memory storage
//! let store = InMemoryReviewStateStore::new();
//! ```

mod file_review_state_store;
mod in_memory_review_state_store;

pub use file_review_state_store::FileReviewStateStore;
pub use in_memory_review_state_store::InMemoryReviewStateStore;

use crate::ports::{StateVersion, StoreError};

/// Version check shared by the stores. Returns the version to write.
fn next_version(
    current: Option<StateVersion>,
    expected: Option<StateVersion>,
) -> Result<StateVersion, StoreError> {
    if current != expected {
        return Err(StoreError::Conflict {
            expected,
            actual: current,
        });
    }
    Ok(current.map_or(StateVersion::FIRST, |v| v.next()))
}
