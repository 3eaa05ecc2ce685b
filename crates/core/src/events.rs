use crate::{Card, CombatantKind, ComboKind, Phase, SortBy};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    DeckCountChanged { count: usize },
    DiscardCountChanged { count: usize },
    HandDealt { cards: Vec<Card> },
    CardDrawn { card: Card },
    DeckShuffled,
    HandSorted { by: SortBy },
    ComboPlayed {
        combo: ComboKind,
        base_score: i64,
        scoring: usize,
    },
    ScoreCalculated { score: i64, multiplier: i64 },
    CardScored {
        card: Card,
        bonus: i64,
        charge: i64,
    },
    Strike {
        attacker: CombatantKind,
        target: CombatantKind,
        damage: i64,
        hp_left: i64,
    },
    TurnCountdown { remaining: i32 },
    PhaseChanged { phase: Phase },
    BattleWon,
    BattleLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Event)>;

/// Queues events for draining and fans each one out to subscribers as it is
/// pushed. Subscribers stay registered until explicitly unsubscribed.
#[derive(Default)]
pub struct EventBus {
    queue: Vec<Event>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn pending(&self) -> &[Event] {
        &self.queue
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("queue", &self.queue)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
