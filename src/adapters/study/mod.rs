//! Study session and review log adapters.

mod in_memory_review_log;
mod in_memory_session_repository;

pub use in_memory_review_log::InMemoryReviewLog;
pub use in_memory_session_repository::InMemoryStudySessionRepository;
