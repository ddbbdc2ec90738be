//! GetRetentionHandler - Query handler for a reviewer's lifetime recall rate.
//!
//! Recomputed from every stored card state on each call.

use std::sync::Arc;

use crate::domain::foundation::ReviewerId;
use crate::domain::study::RetentionReport;
use crate::ports::{ReviewStateStore, StoreError};

/// Query for a reviewer's retention.
#[derive(Debug, Clone)]
pub struct GetRetentionQuery {
    pub reviewer_id: ReviewerId,
}

/// Handler for retention queries.
pub struct GetRetentionHandler {
    store: Arc<dyn ReviewStateStore>,
}

impl GetRetentionHandler {
    pub fn new(store: Arc<dyn ReviewStateStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetRetentionQuery) -> Result<RetentionReport, StoreError> {
        let states = self.store.list_for_reviewer(&query.reviewer_id).await?;
        Ok(RetentionReport::from_states(&states))
    }
}
