//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

mod app_state;
pub mod handlers;

pub use app_state::{review_state_store, ReviewAppState};
pub use handlers::{
    // Review handlers
    ReviewError, SubmitReviewCommand, SubmitReviewHandler, SubmitReviewResult,
    // Queue handlers
    BuildQueueHandler, BuildQueueQuery, BuildQueueResult, QueueError,
    // Study handlers
    EndSessionCommand, EndSessionHandler, EndSessionResult,
    GetRetentionHandler, GetRetentionQuery,
    GetReviewStatsHandler, GetReviewStatsQuery, StatsError,
    RecordReviewCommand, RecordReviewHandler,
    StartSessionCommand, StartSessionHandler,
};
