//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod queue;
pub mod review;
pub mod study;

pub use queue::{BuildQueueHandler, BuildQueueQuery, BuildQueueResult, QueueError};
pub use review::{ReviewError, SubmitReviewCommand, SubmitReviewHandler, SubmitReviewResult};
pub use study::{
    EndSessionCommand, EndSessionHandler, EndSessionResult, GetRetentionHandler,
    GetRetentionQuery, GetReviewStatsHandler, GetReviewStatsQuery, RecordReviewCommand,
    RecordReviewHandler, StartSessionCommand, StartSessionHandler, StatsError,
};
