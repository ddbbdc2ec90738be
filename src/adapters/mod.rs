//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Review state stores (in-memory, JSON files)
//! - `study` - Study session repositories and the review log
//! - `catalog` - Card catalogs
//! - `clock` - System and manual clocks
//! - `ids` - Session id generators

pub mod catalog;
pub mod clock;
pub mod ids;
pub mod storage;
pub mod study;

pub use catalog::StaticCardCatalog;
pub use clock::{ManualClock, SystemClock};
pub use ids::{SequentialSessionIdGenerator, UuidSessionIdGenerator};
pub use storage::{FileReviewStateStore, InMemoryReviewStateStore};
pub use study::{InMemoryReviewLog, InMemoryStudySessionRepository};
