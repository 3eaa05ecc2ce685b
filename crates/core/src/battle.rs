use crate::{
    BattleConfig, BattleStats, CardId, Combatant, ComboResult, ConfigError, Deck, DeckError,
    Phase, RngState, ScoreOutcome, ScoreTables, Selection, Session, StatsSink, TurnState,
};
use thiserror::Error;

mod hand;
mod state;
mod turn;

pub use hand::DiscardMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("invalid selection of {count} cards")]
    InvalidSelection { count: usize },
    #[error("action not allowed during {phase:?}")]
    ActionWhileLocked { phase: Phase },
    #[error("no hero is acting")]
    NoActingHero,
    #[error("{0} cannot act as hero")]
    UnfitHero(String),
    #[error("card {0} is not in hand")]
    CardNotInHand(CardId),
    #[error("selection already holds {0} cards")]
    SelectionFull(usize),
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Won,
    Lost,
}

/// What one accepted scoring action did.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayReport {
    pub combo: ComboResult,
    pub outcome: ScoreOutcome,
    pub rank_bonuses: Vec<i64>,
    pub attack_charge: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattleSummary {
    pub session: Session,
    pub outcome: Option<BattleOutcome>,
    pub stats: BattleStats,
}

/// Owns every piece of mutable battle state. Commands take `&mut self` plus
/// the caller's event bus; nothing here is shared.
pub struct Battle {
    pub config: BattleConfig,
    pub tables: ScoreTables,
    rng: RngState,
    deck: Deck,
    selection: Selection,
    turn: TurnState,
    countdown_reset: i32,
    hero: Option<Combatant>,
    enemy: Combatant,
    session: Session,
    stats: BattleStats,
    stats_sink: Option<Box<dyn StatsSink>>,
}
