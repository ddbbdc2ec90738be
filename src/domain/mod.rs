//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `scheduling` - Card review state machine and forgetting-curve scheduler
//! - `queue` - Selection of due reviews and new cards under daily caps
//! - `study` - Study sessions, study-day windows and progress figures

pub mod foundation;
pub mod queue;
pub mod scheduling;
pub mod study;
