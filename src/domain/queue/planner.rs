//! Pure queue selection over already-fetched data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::DailyAllowance;
use crate::domain::foundation::{CardId, Timestamp};
use crate::domain::scheduling::CardReviewState;

/// Cards to present, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewQueue {
    /// Due cards, oldest due first.
    pub reviews: Vec<CardId>,
    /// Never-reviewed cards in catalog order.
    pub new_cards: Vec<CardId>,
}

impl ReviewQueue {
    /// Presentation order: every due review before any new card.
    pub fn ordered(&self) -> Vec<CardId> {
        self.reviews
            .iter()
            .chain(self.new_cards.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reviews.len() + self.new_cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty() && self.new_cards.is_empty()
    }
}

/// Builds a `ReviewQueue` from store and catalog snapshots.
pub struct QueuePlanner;

impl QueuePlanner {
    /// Selects due reviews and new cards within `allowance`.
    ///
    /// `due` may contain extra rows; anything new or not yet due at `now` is
    /// ignored. `known` is every state the reviewer has, used to decide which
    /// catalog cards have already been seen.
    pub fn plan(
        due: Vec<CardReviewState>,
        known: &[CardReviewState],
        catalog: &[CardId],
        now: Timestamp,
        allowance: DailyAllowance,
    ) -> ReviewQueue {
        ReviewQueue {
            reviews: Self::select_reviews(due, now, allowance.reviews as usize),
            new_cards: Self::select_new(known, catalog, allowance.new_cards as usize),
        }
    }

    fn select_reviews(mut due: Vec<CardReviewState>, now: Timestamp, limit: usize) -> Vec<CardId> {
        due.retain(|s| s.is_due(now));
        due.sort_by(|a, b| a.due.cmp(&b.due).then_with(|| a.card_id.cmp(&b.card_id)));
        due.into_iter().take(limit).map(|s| s.card_id).collect()
    }

    fn select_new(known: &[CardReviewState], catalog: &[CardId], limit: usize) -> Vec<CardId> {
        let seen: HashSet<&CardId> = known
            .iter()
            .filter(|s| !s.is_new())
            .map(|s| &s.card_id)
            .collect();
        let mut offered: HashSet<&CardId> = HashSet::new();

        catalog
            .iter()
            .filter(|id| !seen.contains(id) && offered.insert(*id))
            .take(limit)
            .cloned()
            .collect()
    }
}
