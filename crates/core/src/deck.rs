use crate::{Card, CardId, Edition, Event, EventBus, Rank, RngState, Suit};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("no cards left in the draw or discard pile")]
    EmptyDeck,
    #[error("hand is at capacity")]
    HandFull,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortBy {
    Rank,
    Suit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Draw,
    Discard,
    Hand,
    Removed,
}

/// The four card collections of a battle. A card lives in exactly one of them.
#[derive(Debug, Clone)]
pub struct Deck {
    draw: VecDeque<Card>,
    discard: Vec<Card>,
    hand: Vec<Card>,
    removed: Vec<Card>,
    hand_capacity: usize,
    auto_reshuffle: bool,
}

impl Deck {
    pub fn new(hand_capacity: usize, auto_reshuffle: bool) -> Self {
        Self {
            draw: VecDeque::with_capacity(52),
            discard: Vec::new(),
            hand: Vec::with_capacity(hand_capacity),
            removed: Vec::new(),
            hand_capacity,
            auto_reshuffle,
        }
    }

    /// Rebuilds the 52-card universe in suit-major, rank-ascending order.
    pub fn initialize(&mut self, events: &mut EventBus) {
        self.draw.clear();
        self.discard.clear();
        self.hand.clear();
        self.removed.clear();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                self.draw.push_back(Card::standard(suit, rank));
            }
        }
        events.push(Event::DeckCountChanged {
            count: self.draw.len(),
        });
    }

    pub fn hand_capacity(&self) -> usize {
        self.hand_capacity
    }

    pub fn auto_reshuffle(&self) -> bool {
        self.auto_reshuffle
    }

    pub fn set_auto_reshuffle(&mut self, enabled: bool) {
        self.auto_reshuffle = enabled;
    }

    pub fn draw_count(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard.len()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn draw_pile(&self) -> impl Iterator<Item = &Card> {
        self.draw.iter()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn removed(&self) -> &[Card] {
        &self.removed
    }

    pub fn hand_card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|card| card.id() == id)
    }

    pub fn locate(&self, id: CardId) -> Option<Zone> {
        if self.draw.iter().any(|card| card.id() == id) {
            Some(Zone::Draw)
        } else if self.discard.iter().any(|card| card.id() == id) {
            Some(Zone::Discard)
        } else if self.hand.iter().any(|card| card.id() == id) {
            Some(Zone::Hand)
        } else if self.removed.iter().any(|card| card.id() == id) {
            Some(Zone::Removed)
        } else {
            None
        }
    }

    /// Every card across all four collections, in no particular order.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.draw
            .iter()
            .chain(self.discard.iter())
            .chain(self.hand.iter())
            .chain(self.removed.iter())
    }

    pub fn shuffle(&mut self, rng: &mut RngState, events: &mut EventBus) {
        rng.shuffle(self.draw.make_contiguous());
        events.push(Event::DeckShuffled);
    }

    /// Moves the discard pile under the draw pile and shuffles. Does nothing
    /// unless auto-reshuffle is enabled and the discard pile has cards.
    pub fn reshuffle(&mut self, rng: &mut RngState, events: &mut EventBus) -> bool {
        if !self.auto_reshuffle || self.discard.is_empty() {
            return false;
        }
        debug!(
            "reshuffling {} discarded cards into {} remaining",
            self.discard.len(),
            self.draw.len()
        );
        self.draw.extend(self.discard.drain(..));
        self.shuffle(rng, events);
        events.push(Event::DeckCountChanged {
            count: self.draw.len(),
        });
        events.push(Event::DiscardCountChanged { count: 0 });
        true
    }

    /// Draws the front card of the draw pile into the hand.
    pub fn draw(&mut self, rng: &mut RngState, events: &mut EventBus) -> Result<CardId, DeckError> {
        if self.hand.len() >= self.hand_capacity {
            return Err(DeckError::HandFull);
        }
        let card = self.take_front(rng, events)?;
        let id = card.id();
        self.hand.push(card);
        Ok(id)
    }

    /// Removes the front of the draw pile, reshuffling the discard pile in
    /// first when the draw pile is empty and that is allowed. Nothing moves
    /// on `EmptyDeck`.
    fn take_front(&mut self, rng: &mut RngState, events: &mut EventBus) -> Result<Card, DeckError> {
        if self.draw.is_empty() && !self.reshuffle(rng, events) {
            warn!("draw attempted with no cards available");
            return Err(DeckError::EmptyDeck);
        }
        let card = self.draw.pop_front().ok_or(DeckError::EmptyDeck)?;
        events.push(Event::DeckCountChanged {
            count: self.draw.len(),
        });
        events.push(Event::CardDrawn { card: card.clone() });
        Ok(card)
    }

    /// Draws up to `count` cards into the hand, never past hand capacity.
    /// Stops quietly when both piles run dry. Returns how many were dealt.
    pub fn deal_to_hand(
        &mut self,
        count: usize,
        rng: &mut RngState,
        events: &mut EventBus,
    ) -> usize {
        let room = self.hand_capacity.saturating_sub(self.hand.len());
        let count = count.min(room);
        if count == 0 {
            return 0;
        }
        if self.draw.len() < count {
            self.reshuffle(rng, events);
        }
        let mut dealt = Vec::with_capacity(count);
        for _ in 0..count {
            match self.take_front(rng, events) {
                Ok(card) => dealt.push(card),
                Err(_) => break,
            }
        }
        let total = dealt.len();
        if total > 0 {
            debug!("dealt {total} cards, draw pile at {}", self.draw.len());
            events.push(Event::HandDealt {
                cards: dealt.clone(),
            });
            self.hand.append(&mut dealt);
        }
        total
    }

    /// Tops the hand back up to capacity.
    pub fn refill_hand(&mut self, rng: &mut RngState, events: &mut EventBus) -> usize {
        let needed = self.hand_capacity.saturating_sub(self.hand.len());
        self.deal_to_hand(needed, rng, events)
    }

    /// Moves the listed hand cards to the discard pile. Ids not in hand are
    /// skipped. Returns the cards moved, in hand order.
    pub fn discard_from_hand(&mut self, ids: &[CardId], events: &mut EventBus) -> Vec<CardId> {
        let mut moved = Vec::with_capacity(ids.len());
        let mut kept = Vec::with_capacity(self.hand.len());
        for card in self.hand.drain(..) {
            if ids.contains(&card.id()) {
                moved.push(card.id());
                self.discard.push(card);
            } else {
                kept.push(card);
            }
        }
        self.hand = kept;
        if !moved.is_empty() {
            events.push(Event::DiscardCountChanged {
                count: self.discard.len(),
            });
        }
        moved
    }

    pub fn discard_hand(&mut self, events: &mut EventBus) -> Vec<CardId> {
        let ids: Vec<CardId> = self.hand.iter().map(Card::id).collect();
        self.discard_from_hand(&ids, events)
    }

    /// Takes a card out of the draw pile for good. Silent no-op when the card
    /// is not in the draw pile.
    pub fn remove_permanently(&mut self, id: CardId, events: &mut EventBus) -> bool {
        let Some(index) = self.draw.iter().position(|card| card.id() == id) else {
            return false;
        };
        let Some(card) = self.draw.remove(index) else {
            return false;
        };
        debug!("removed {id} from the deck");
        self.removed.push(card);
        events.push(Event::DeckCountChanged {
            count: self.draw.len(),
        });
        true
    }

    pub fn enhance(&mut self, id: CardId, multiplier_bonus: u32) -> bool {
        match self.hand_card_mut(id) {
            Some(card) => {
                card.enhance(multiplier_bonus);
                true
            }
            None => false,
        }
    }

    pub fn seal(&mut self, id: CardId) -> bool {
        match self.hand_card_mut(id) {
            Some(card) => {
                card.sealed = true;
                true
            }
            None => false,
        }
    }

    pub fn set_edition(&mut self, id: CardId, edition: Edition) -> bool {
        match self.hand_card_mut(id) {
            Some(card) => {
                card.edition = edition;
                true
            }
            None => false,
        }
    }

    pub fn sort_hand(&mut self, by: SortBy, events: &mut EventBus) {
        match by {
            SortBy::Rank => self.hand.sort_by_key(|card| card.rank),
            SortBy::Suit => self.hand.sort_by_key(|card| (card.suit, card.rank)),
        }
        events.push(Event::HandSorted { by });
    }

    fn hand_card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.hand.iter_mut().find(|card| card.id() == id)
    }
}
