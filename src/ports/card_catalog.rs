//! Card catalog port.
//!
//! Supplies the known flashcard ids in a stable order for new-card
//! candidacy. The scheduler never sees card content.

use async_trait::async_trait;

use crate::domain::foundation::CardId;

/// Errors from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Card catalog unavailable: {0}")]
    Unavailable(String),
}

/// Port for the flashcard catalog.
#[async_trait]
pub trait CardCatalog: Send + Sync {
    /// Every known card id, in presentation order.
    ///
    /// Must return the same order on every call while the catalog is
    /// unchanged.
    async fn ordered_card_ids(&self) -> Result<Vec<CardId>, CatalogError>;
}
