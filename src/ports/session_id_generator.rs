//! Session id allocation port.

use crate::domain::foundation::SessionId;

/// Allocates ids for new study sessions.
pub trait SessionIdGenerator: Send + Sync {
    fn next_id(&self) -> SessionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_generator_is_object_safe() {
        fn _accepts_dyn(_ids: &dyn SessionIdGenerator) {}
    }
}
