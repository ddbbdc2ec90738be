//! Session id generators.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::foundation::SessionId;
use crate::ports::SessionIdGenerator;

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSessionIdGenerator;

impl SessionIdGenerator for UuidSessionIdGenerator {
    fn next_id(&self) -> SessionId {
        SessionId::new()
    }
}

/// Predictable ids `00000000-0000-0000-0000-000000000001`, `...02`, and so on.
#[derive(Debug, Default)]
pub struct SequentialSessionIdGenerator {
    counter: AtomicU64,
}

impl SequentialSessionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionIdGenerator for SequentialSessionIdGenerator {
    fn next_id(&self) -> SessionId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        SessionId::from_uuid(Uuid::from_u128(u128::from(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up_from_one() {
        let ids = SequentialSessionIdGenerator::new();
        assert_eq!(
            ids.next_id().to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
        assert_eq!(
            ids.next_id().to_string(),
            "00000000-0000-0000-0000-000000000002"
        );
    }

    #[test]
    fn uuid_ids_are_unique() {
        let ids = UuidSessionIdGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
