//! Clock port.
//!
//! Handlers ask the clock for the current instant once per operation and pass
//! it down; domain code never reads time on its own.

use crate::domain::foundation::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
