use crate::{ComboKind, Rank};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboRule {
    pub kind: ComboKind,
    pub display_name: String,
    pub base_score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankBonusRule {
    pub rank: Rank,
    pub bonus: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleConfig {
    #[serde(default = "default_hand_capacity")]
    pub hand_capacity: usize,
    #[serde(default = "default_max_selection")]
    pub max_selection: usize,
    #[serde(default = "default_true")]
    pub auto_reshuffle: bool,
    #[serde(default = "default_enemy_turn_countdown")]
    pub enemy_turn_countdown: i32,
    #[serde(default = "default_hand_multiplier")]
    pub hand_multiplier: u32,
    #[serde(default)]
    pub combos: Vec<ComboRule>,
    #[serde(default)]
    pub rank_bonus: Vec<RankBonusRule>,
}

fn default_hand_capacity() -> usize {
    8
}

fn default_max_selection() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_enemy_turn_countdown() -> i32 {
    2
}

fn default_hand_multiplier() -> u32 {
    1
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            hand_capacity: default_hand_capacity(),
            max_selection: default_max_selection(),
            auto_reshuffle: true,
            enemy_turn_countdown: default_enemy_turn_countdown(),
            hand_multiplier: default_hand_multiplier(),
            combos: Vec::new(),
            rank_bonus: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("hand capacity must be at least 1")]
    ZeroHandCapacity,
    #[error("max selection must be between 1 and 5, got {0}")]
    SelectionLimit(usize),
    #[error("enemy turn countdown must be at least 1, got {0}")]
    Countdown(i32),
    #[error("hand multiplier must be at least 1")]
    ZeroHandMultiplier,
    #[error("negative base score for {0:?}")]
    NegativeScore(ComboKind),
    #[error("{higher:?} must score above {lower:?}")]
    ScoreOrdering { lower: ComboKind, higher: ComboKind },
}

impl BattleConfig {
    pub fn combo_rule(&self, kind: ComboKind) -> Option<&ComboRule> {
        self.combos.iter().find(|rule| rule.kind == kind)
    }

    /// Checks limits and that combo scores rise strictly with combo rank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_capacity == 0 {
            return Err(ConfigError::ZeroHandCapacity);
        }
        if !(1..=5).contains(&self.max_selection) {
            return Err(ConfigError::SelectionLimit(self.max_selection));
        }
        if self.enemy_turn_countdown < 1 {
            return Err(ConfigError::Countdown(self.enemy_turn_countdown));
        }
        if self.hand_multiplier == 0 {
            return Err(ConfigError::ZeroHandMultiplier);
        }
        let tables = crate::ScoreTables::from_config(self);
        for kind in ComboKind::ALL {
            if tables.combo_base(kind) < 0 {
                return Err(ConfigError::NegativeScore(kind));
            }
        }
        for pair in ComboKind::ALL.windows(2) {
            if tables.combo_base(pair[1]) <= tables.combo_base(pair[0]) {
                return Err(ConfigError::ScoreOrdering {
                    lower: pair[0],
                    higher: pair[1],
                });
            }
        }
        Ok(())
    }
}
