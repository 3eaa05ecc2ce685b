use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    HeroTurn,
    HeroAttack,
    EnemyCountdown,
    EnemyTurn,
    BattleWon,
    BattleLost,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::BattleWon | Phase::BattleLost)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnState {
    pub phase: Phase,
    pub turns_until_enemy_action: i32,
    pub can_play_cards: bool,
}

impl TurnState {
    pub fn new(countdown: i32) -> Self {
        Self {
            phase: Phase::HeroTurn,
            turns_until_enemy_action: countdown,
            can_play_cards: true,
        }
    }

    /// Whether card commands are accepted right now.
    pub fn accepts_play(&self) -> bool {
        self.phase == Phase::HeroTurn && self.can_play_cards
    }
}
