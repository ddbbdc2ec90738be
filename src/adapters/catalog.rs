//! Fixed, in-process card catalog.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::foundation::{CardId, ValidationError};
use crate::ports::{CardCatalog, CatalogError};

/// Catalog backed by a list supplied at construction.
#[derive(Debug)]
pub struct StaticCardCatalog {
    card_ids: Vec<CardId>,
    available: AtomicBool,
}

impl StaticCardCatalog {
    pub fn new(card_ids: Vec<CardId>) -> Self {
        Self {
            card_ids,
            available: AtomicBool::new(true),
        }
    }

    /// Builds the catalog from raw ids, rejecting blank ones.
    pub fn from_ids<I, S>(ids: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let card_ids = ids
            .into_iter()
            .map(CardId::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(card_ids))
    }

    /// Simulate an outage.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

#[async_trait]
impl CardCatalog for StaticCardCatalog {
    async fn ordered_card_ids(&self) -> Result<Vec<CardId>, CatalogError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("static catalog is offline".into()));
        }
        Ok(self.card_ids.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_ids_in_given_order() {
        let catalog = StaticCardCatalog::from_ids(["tibia", "femur", "ulna"]).unwrap();
        let ids = catalog.ordered_card_ids().await.unwrap();
        let names: Vec<&str> = ids.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["tibia", "femur", "ulna"]);
    }

    #[test]
    fn rejects_blank_ids() {
        assert!(StaticCardCatalog::from_ids(["femur", " "]).is_err());
    }

    #[tokio::test]
    async fn offline_catalog_errors() {
        let catalog = StaticCardCatalog::from_ids(["femur"]).unwrap();
        catalog.set_available(false);
        assert!(catalog.ordered_card_ids().await.is_err());
    }
}
