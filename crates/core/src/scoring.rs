use crate::{evaluate_combo, BattleConfig, Card, Combatant, ComboKind, ComboResult, Rank};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ScoreTables {
    combo_scores: HashMap<ComboKind, i64>,
    rank_bonus: HashMap<Rank, i64>,
}

impl ScoreTables {
    pub fn from_config(config: &BattleConfig) -> Self {
        let mut combo_scores = HashMap::new();
        for rule in &config.combos {
            combo_scores.insert(rule.kind, rule.base_score);
        }
        let mut rank_bonus = HashMap::new();
        for rule in &config.rank_bonus {
            rank_bonus.insert(rule.rank, rule.bonus);
        }
        Self {
            combo_scores,
            rank_bonus,
        }
    }

    pub fn combo_base(&self, kind: ComboKind) -> i64 {
        self.combo_scores
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_combo_base(kind))
    }

    pub fn rank_bonus(&self, rank: Rank) -> i64 {
        self.rank_bonus
            .get(&rank)
            .copied()
            .unwrap_or_else(|| default_rank_bonus(rank))
    }
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self::from_config(&BattleConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreOutcome {
    pub base_score: i64,
    pub combo_multiplier: f64,
    pub hand_multiplier: u32,
    pub final_score: i64,
    /// `round(combo_multiplier * hand_multiplier)`, the figure shown next to
    /// the score.
    pub display_multiplier: i64,
}

/// Multiplies the combo's base score by the enhancement multiplier and the
/// hand multiplier. Every enhanced card in `selected` adds `0.1 * multiplier`,
/// whether or not it is part of the combo.
///
/// The product is kept in tenths so the rounding step sees exact values.
/// Halves round away from zero, not to even, so 137.5 scores 138.
pub fn compute_score(combo: &ComboResult, selected: &[Card], hand_multiplier: u32) -> ScoreOutcome {
    let tenths: i64 = 10 + selected
        .iter()
        .filter(|card| card.enhanced)
        .map(|card| i64::from(card.multiplier))
        .sum::<i64>();
    let hand = i64::from(hand_multiplier);
    let final_score = round_tenths(combo.base_score.saturating_mul(tenths).saturating_mul(hand));
    ScoreOutcome {
        base_score: combo.base_score,
        combo_multiplier: tenths as f64 / 10.0,
        hand_multiplier,
        final_score,
        display_multiplier: round_tenths(tenths.saturating_mul(hand)),
    }
}

fn round_tenths(value: i64) -> i64 {
    if value >= 0 {
        (value + 5) / 10
    } else {
        (value - 5) / 10
    }
}

/// Adds a resolved score onto the combatant's pending attack.
pub fn apply_score_to_attack(combatant: &mut Combatant, final_score: i64) -> i64 {
    combatant.attack_charge = combatant.attack_charge.saturating_add(final_score);
    combatant.attack_charge
}

/// Full preview of what playing `selected` would do, without touching state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub combo: ComboResult,
    pub outcome: ScoreOutcome,
    pub rank_bonuses: Vec<i64>,
    pub total_attack: i64,
}

pub fn score_selection(
    selected: &[Card],
    tables: &ScoreTables,
    hand_multiplier: u32,
) -> Option<ScoreBreakdown> {
    let combo = evaluate_combo(selected, tables)?;
    let outcome = compute_score(&combo, selected, hand_multiplier);
    let rank_bonuses: Vec<i64> = combo
        .scoring_cards
        .iter()
        .map(|card| tables.rank_bonus(card.rank))
        .collect();
    let total_attack = outcome.final_score + rank_bonuses.iter().sum::<i64>();
    Some(ScoreBreakdown {
        combo,
        outcome,
        rank_bonuses,
        total_attack,
    })
}

fn default_combo_base(kind: ComboKind) -> i64 {
    match kind {
        ComboKind::HighCard => 10,
        ComboKind::Pair => 20,
        ComboKind::TwoPair => 40,
        ComboKind::ThreeOfAKind => 80,
        ComboKind::Straight => 100,
        ComboKind::Flush => 125,
        ComboKind::FullHouse => 175,
        ComboKind::FourOfAKind => 400,
        ComboKind::StraightFlush => 600,
        ComboKind::RoyalFlush => 2000,
    }
}

fn default_rank_bonus(rank: Rank) -> i64 {
    match rank {
        Rank::Ace => 15,
        Rank::Jack | Rank::Queen | Rank::King => 12,
        other => i64::from(other.value()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Suit;

    fn straight() -> Vec<Card> {
        vec![
            Card::standard(Suit::Hearts, Rank::Five),
            Card::standard(Suit::Clubs, Rank::Six),
            Card::standard(Suit::Spades, Rank::Seven),
            Card::standard(Suit::Hearts, Rank::Eight),
            Card::standard(Suit::Diamonds, Rank::Nine),
        ]
    }

    #[test]
    fn plain_straight_scores_base() {
        let tables = ScoreTables::default();
        let cards = straight();
        let combo = evaluate_combo(&cards, &tables).expect("combo");
        let outcome = compute_score(&combo, &cards, 1);
        assert_eq!(outcome.final_score, 100);
        assert_eq!(outcome.display_multiplier, 1);
    }

    #[test]
    fn enhanced_card_raises_multiplier() {
        let tables = ScoreTables::default();
        let mut cards = straight();
        cards[0].enhanced = true;
        cards[0].multiplier = 2;
        let combo = evaluate_combo(&cards, &tables).expect("combo");
        let outcome = compute_score(&combo, &cards, 1);
        assert!((outcome.combo_multiplier - 1.2).abs() < 1e-9);
        assert_eq!(outcome.final_score, 120);
    }

    #[test]
    fn enhancement_counts_outside_scoring_cards() {
        let tables = ScoreTables::default();
        let mut cards = vec![
            Card::standard(Suit::Clubs, Rank::Three),
            Card::standard(Suit::Diamonds, Rank::Three),
            Card::standard(Suit::Hearts, Rank::King),
        ];
        cards[2].enhance(4);
        let combo = evaluate_combo(&cards, &tables).expect("combo");
        assert_eq!(combo.scoring_indices, vec![0, 1]);
        let outcome = compute_score(&combo, &cards, 2);
        // 20 * 1.5 * 2
        assert_eq!(outcome.final_score, 60);
        assert_eq!(outcome.display_multiplier, 3);
    }

    #[test]
    fn halves_round_up() {
        let tables = ScoreTables::default();
        let mut cards: Vec<Card> = vec![
            Card::standard(Suit::Hearts, Rank::Two),
            Card::standard(Suit::Hearts, Rank::Five),
            Card::standard(Suit::Hearts, Rank::Nine),
            Card::standard(Suit::Hearts, Rank::Jack),
            Card::standard(Suit::Hearts, Rank::King),
        ];
        cards[0].enhanced = true;
        let combo = evaluate_combo(&cards, &tables).expect("combo");
        assert_eq!(combo.kind, ComboKind::Flush);
        // 125 * 1.1 = 137.5
        assert_eq!(compute_score(&combo, &cards, 1).final_score, 138);
    }

    #[test]
    fn rank_bonus_table() {
        let tables = ScoreTables::default();
        assert_eq!(tables.rank_bonus(Rank::Ace), 15);
        assert_eq!(tables.rank_bonus(Rank::Queen), 12);
        assert_eq!(tables.rank_bonus(Rank::Seven), 7);
    }

    #[test]
    fn preview_adds_rank_bonuses() {
        let tables = ScoreTables::default();
        let cards = vec![
            Card::standard(Suit::Hearts, Rank::Ace),
            Card::standard(Suit::Spades, Rank::Ace),
        ];
        let breakdown = score_selection(&cards, &tables, 1).expect("breakdown");
        assert_eq!(breakdown.rank_bonuses, vec![15, 15]);
        assert_eq!(breakdown.total_attack, 50);
    }
}
