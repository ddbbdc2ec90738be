//! Scheduling domain module.
//!
//! The per-card state machine and the forgetting-curve update that decides
//! when a card is next due.
//!
//! # Flow
//!
//! ```text
//! CardReviewState --(Rating, Timestamp)--> Scheduler::advance --> CardReviewState'
//! ```
//!
//! `Scheduler::advance` is pure: the current instant is a parameter and fuzz
//! is seeded from the card itself.

mod card_state;
mod errors;
mod format;
mod fuzz;
pub mod memory_model;
mod parameters;
mod rating;
mod scheduler;
mod status;

pub use card_state::{CardReviewState, MAX_DIFFICULTY, MIN_DIFFICULTY};
pub use errors::SchedulingError;
pub use format::format_interval;
pub use parameters::{RatingWeights, SchedulerParameters, MAX_INTERVAL_DAYS};
pub use rating::Rating;
pub use scheduler::{IntervalPreview, Scheduler};
pub use status::ReviewStatus;
