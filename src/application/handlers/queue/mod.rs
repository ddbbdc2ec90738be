//! Queue query handlers.

mod build_queue;

pub use build_queue::{BuildQueueHandler, BuildQueueQuery, BuildQueueResult, QueueError};
