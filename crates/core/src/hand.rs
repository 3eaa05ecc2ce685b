use crate::{Card, Rank, ScoreTables, Suit};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComboKind {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl ComboKind {
    pub const ALL: [ComboKind; 10] = [
        ComboKind::HighCard,
        ComboKind::Pair,
        ComboKind::TwoPair,
        ComboKind::ThreeOfAKind,
        ComboKind::Straight,
        ComboKind::Flush,
        ComboKind::FullHouse,
        ComboKind::FourOfAKind,
        ComboKind::StraightFlush,
        ComboKind::RoyalFlush,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ComboKind::HighCard => "high_card",
            ComboKind::Pair => "pair",
            ComboKind::TwoPair => "two_pair",
            ComboKind::ThreeOfAKind => "three_of_a_kind",
            ComboKind::Straight => "straight",
            ComboKind::Flush => "flush",
            ComboKind::FullHouse => "full_house",
            ComboKind::FourOfAKind => "four_of_a_kind",
            ComboKind::StraightFlush => "straight_flush",
            ComboKind::RoyalFlush => "royal_flush",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        ComboKind::ALL.into_iter().find(|kind| kind.id() == value)
    }
}

/// Category plus the minimal set of selected cards that forms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboMatch {
    pub kind: ComboKind,
    /// Indices into the evaluated slice.
    pub scoring: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboResult {
    pub kind: ComboKind,
    pub scoring_indices: Vec<usize>,
    pub scoring_cards: Vec<Card>,
    pub base_score: i64,
}

pub fn evaluate_combo(cards: &[Card], tables: &ScoreTables) -> Option<ComboResult> {
    let found = classify(cards)?;
    let base_score = tables.combo_base(found.kind);
    let scoring_cards = found
        .scoring
        .iter()
        .map(|&idx| cards[idx].clone())
        .collect();
    debug!(
        "combo {} from {} cards, {} scoring, base {base_score}",
        found.kind.id(),
        cards.len(),
        found.scoring.len()
    );
    Some(ComboResult {
        kind: found.kind,
        scoring_indices: found.scoring,
        scoring_cards,
        base_score,
    })
}

/// Finds the highest combo in `cards`, checking categories top-down and
/// returning the first that matches. `None` for an empty slice.
pub fn classify(cards: &[Card]) -> Option<ComboMatch> {
    if cards.is_empty() {
        return None;
    }
    let all: Vec<usize> = (0..cards.len()).collect();
    let suit_groups = suit_groups(cards);

    for group in suit_groups.iter().filter(|group| group.len() >= 5) {
        if let Some(run) = find_straight(cards, group) {
            let kind = if is_royal(cards, &run) {
                ComboKind::RoyalFlush
            } else {
                ComboKind::StraightFlush
            };
            return Some(ComboMatch { kind, scoring: run });
        }
    }

    let quads = rank_groups_of(cards, |count| count == 4);
    if let Some(group) = quads.first() {
        return Some(ComboMatch {
            kind: ComboKind::FourOfAKind,
            scoring: group.clone(),
        });
    }

    let triples = rank_groups_of(cards, |count| count == 3);
    if let Some(three) = triples.first() {
        let three_rank = cards[three[0]].rank;
        let pair = rank_groups_of(cards, |count| count >= 2)
            .into_iter()
            .find(|group| cards[group[0]].rank != three_rank);
        if let Some(pair) = pair {
            let mut scoring = three.clone();
            scoring.extend(pair.into_iter().take(2));
            return Some(ComboMatch {
                kind: ComboKind::FullHouse,
                scoring,
            });
        }
    }

    if let Some(group) = suit_groups.iter().find(|group| group.len() >= 5) {
        return Some(ComboMatch {
            kind: ComboKind::Flush,
            scoring: group.iter().copied().take(5).collect(),
        });
    }

    if let Some(run) = find_straight(cards, &all) {
        return Some(ComboMatch {
            kind: ComboKind::Straight,
            scoring: run,
        });
    }

    if let Some(three) = triples.first() {
        return Some(ComboMatch {
            kind: ComboKind::ThreeOfAKind,
            scoring: three.clone(),
        });
    }

    let pairs = rank_groups_of(cards, |count| count == 2);
    if pairs.len() >= 2 {
        let mut scoring: Vec<usize> = pairs[..2].concat();
        scoring.sort_unstable();
        return Some(ComboMatch {
            kind: ComboKind::TwoPair,
            scoring,
        });
    }
    if let Some(pair) = pairs.first() {
        return Some(ComboMatch {
            kind: ComboKind::Pair,
            scoring: pair.clone(),
        });
    }

    highest_card_index(cards).map(|idx| ComboMatch {
        kind: ComboKind::HighCard,
        scoring: vec![idx],
    })
}

/// Rank groups whose size satisfies `keep`, highest rank first. Indices
/// inside a group stay in selection order.
fn rank_groups_of(cards: &[Card], keep: impl Fn(usize) -> bool) -> Vec<Vec<usize>> {
    let mut groups: Vec<(Rank, Vec<usize>)> = Vec::new();
    for (idx, card) in cards.iter().enumerate() {
        match groups.iter_mut().find(|(rank, _)| *rank == card.rank) {
            Some((_, members)) => members.push(idx),
            None => groups.push((card.rank, vec![idx])),
        }
    }
    groups.retain(|(_, members)| keep(members.len()));
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups.into_iter().map(|(_, members)| members).collect()
}

fn suit_groups(cards: &[Card]) -> Vec<Vec<usize>> {
    Suit::ALL
        .into_iter()
        .map(|suit| {
            cards
                .iter()
                .enumerate()
                .filter(|(_, card)| card.suit == suit)
                .map(|(idx, _)| idx)
                .collect::<Vec<usize>>()
        })
        .filter(|group| !group.is_empty())
        .collect()
}

/// First run of five strictly consecutive rank values among `indices`, after
/// dropping duplicate ranks. Returned in ascending rank order.
fn find_straight(cards: &[Card], indices: &[usize]) -> Option<Vec<usize>> {
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_by_key(|&idx| cards[idx].rank.value());
    sorted.dedup_by_key(|idx| cards[*idx].rank.value());
    if sorted.len() < 5 {
        return None;
    }
    sorted
        .windows(5)
        .find(|window| {
            window
                .windows(2)
                .all(|pair| cards[pair[1]].rank.value() == cards[pair[0]].rank.value() + 1)
        })
        .map(|window| window.to_vec())
}

fn is_royal(cards: &[Card], run: &[usize]) -> bool {
    let values: Vec<u8> = run.iter().map(|&idx| cards[idx].rank.value()).collect();
    values == [10, 11, 12, 13, 14]
}

fn highest_card_index(cards: &[Card]) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (idx, card) in cards.iter().enumerate() {
        let value = card.rank.value();
        if best.map(|(_, v)| value > v).unwrap_or(true) {
            best = Some((idx, value));
        }
    }
    best.map(|(idx, _)| idx)
}
