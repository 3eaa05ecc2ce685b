use crate::{Card, CardId};

/// Hand cards currently marked for play, in the order they were picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<CardId>,
    limit: usize,
}

impl Selection {
    pub fn new(limit: usize) -> Self {
        Self {
            ids: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn ids(&self) -> &[CardId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.limit
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns false when already selected or at the limit.
    pub fn insert(&mut self, id: CardId) -> bool {
        if self.contains(id) || self.is_full() {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: CardId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops entries whose card is no longer in `hand`.
    pub fn retain_in(&mut self, hand: &[Card]) {
        self.ids
            .retain(|id| hand.iter().any(|card| card.id() == *id));
    }

    /// The selected cards, cloned out of `hand` in selection order.
    pub fn cards_in(&self, hand: &[Card]) -> Vec<Card> {
        self.ids
            .iter()
            .filter_map(|id| hand.iter().find(|card| card.id() == *id).cloned())
            .collect()
    }
}
