//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ReviewStateStore` - Per-card review state with compare-and-swap writes
//! - `StudySessionRepository` - Study session aggregates
//! - `ReviewLog` - Committed reviews by instant, for daily caps
//!
//! ## Collaborator Ports
//!
//! - `CardCatalog` - Ordered flashcard ids for new-card candidacy
//! - `Clock` - Current instant
//! - `SessionIdGenerator` - Session id allocation

mod card_catalog;
mod clock;
mod review_log;
mod review_state_store;
mod session_id_generator;
mod study_session_repository;

pub use card_catalog::{CardCatalog, CatalogError};
pub use clock::Clock;
pub use review_log::ReviewLog;
pub use review_state_store::{ReviewStateStore, StateVersion, StoreError, VersionedState};
pub use session_id_generator::SessionIdGenerator;
pub use study_session_repository::StudySessionRepository;
