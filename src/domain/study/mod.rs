//! Study domain module.
//!
//! Sessions, the review log, study-day windows and the progress figures
//! derived from them.

mod day_boundary;
mod errors;
mod review_log;
mod session;
mod statistics;

pub use day_boundary::{DayBoundary, DayWindow};
pub use errors::SessionError;
pub use review_log::ReviewLogEntry;
pub use session::{EndOutcome, StudySession};
pub use statistics::{DailyProgress, RetentionReport, ReviewStats};
