use super::*;
use crate::*;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardMode {
    Selected,
    All,
}

impl DiscardMode {
    /// Selected cards when there are any, otherwise the whole hand.
    pub fn selected_or_all(selection: &Selection) -> Self {
        if selection.is_empty() {
            DiscardMode::All
        } else {
            DiscardMode::Selected
        }
    }
}

impl Battle {
    /// Deals up to `count` more cards, bounded by hand capacity.
    pub fn deal(&mut self, count: usize, events: &mut EventBus) -> Result<usize, BattleError> {
        self.ensure_unlocked()?;
        Ok(self.deck.deal_to_hand(count, &mut self.rng, events))
    }

    /// Draws a single card into the hand.
    pub fn draw_one(&mut self, events: &mut EventBus) -> Result<CardId, BattleError> {
        self.ensure_unlocked()?;
        Ok(self.deck.draw(&mut self.rng, events)?)
    }

    pub fn select(&mut self, id: CardId) -> Result<(), BattleError> {
        self.ensure_unlocked()?;
        if self.deck.hand_card(id).is_none() {
            return Err(BattleError::CardNotInHand(id));
        }
        if self.selection.contains(id) {
            return Ok(());
        }
        if !self.selection.insert(id) {
            return Err(BattleError::SelectionFull(self.selection.len()));
        }
        debug!("selected {id} ({} of {})", self.selection.len(), self.selection.limit());
        Ok(())
    }

    pub fn deselect(&mut self, id: CardId) -> Result<bool, BattleError> {
        self.ensure_unlocked()?;
        Ok(self.selection.remove(id))
    }

    /// Flips selection of `id`. Returns whether it ends up selected.
    pub fn toggle(&mut self, id: CardId) -> Result<bool, BattleError> {
        if self.selection.contains(id) {
            self.deselect(id).map(|_| false)
        } else {
            self.select(id).map(|_| true)
        }
    }

    /// Sends cards to the discard pile and refills the hand.
    pub fn discard(
        &mut self,
        mode: DiscardMode,
        events: &mut EventBus,
    ) -> Result<Vec<CardId>, BattleError> {
        self.ensure_unlocked()?;
        let moved = match mode {
            DiscardMode::Selected => {
                if self.selection.is_empty() {
                    return Err(BattleError::InvalidSelection { count: 0 });
                }
                let ids = self.selection.ids().to_vec();
                self.deck.discard_from_hand(&ids, events)
            }
            DiscardMode::All => self.deck.discard_hand(events),
        };
        self.selection.retain_in(self.deck.hand());
        debug!("discarded {} cards", moved.len());
        self.deck.refill_hand(&mut self.rng, events);
        Ok(moved)
    }

    pub fn sort_hand(&mut self, by: SortBy, events: &mut EventBus) -> Result<(), BattleError> {
        if self.turn.phase.is_terminal() {
            return Err(BattleError::ActionWhileLocked {
                phase: self.turn.phase,
            });
        }
        self.deck.sort_hand(by, events);
        Ok(())
    }

    /// Marks a hand card enhanced and raises its multiplier.
    pub fn enhance(&mut self, id: CardId, multiplier_bonus: u32) -> Result<(), BattleError> {
        if self.turn.phase.is_terminal() {
            return Err(BattleError::ActionWhileLocked {
                phase: self.turn.phase,
            });
        }
        if !self.deck.enhance(id, multiplier_bonus) {
            return Err(BattleError::CardNotInHand(id));
        }
        Ok(())
    }

    pub fn remove_permanently(&mut self, id: CardId, events: &mut EventBus) -> bool {
        self.deck.remove_permanently(id, events)
    }
}
