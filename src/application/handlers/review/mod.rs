//! Review command handlers.

mod errors;
mod submit_review;

pub use errors::ReviewError;
pub use submit_review::{SubmitReviewCommand, SubmitReviewHandler, SubmitReviewResult};
