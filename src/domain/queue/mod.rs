//! Queue domain module.
//!
//! Decides which cards a reviewer sees next: due reviews first, oldest due
//! first, then never-seen cards in catalog order, each capped by what is left
//! of today's allowance.

mod allowance;
mod planner;

pub use allowance::{DailyAllowance, DailyLimits};
pub use planner::{QueuePlanner, ReviewQueue};
