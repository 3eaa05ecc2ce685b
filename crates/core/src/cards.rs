use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    pub fn from_symbol(value: char) -> Option<Self> {
        match value {
            '♥' | 'h' | 'H' => Some(Suit::Hearts),
            '♦' | 'd' | 'D' => Some(Suit::Diamonds),
            '♣' | 'c' | 'C' => Some(Suit::Clubs),
            '♠' | 's' | 'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Card rank. Ordering follows [`Rank::value`], so Ace sorts highest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric rank, 2 through 14. Ace is only ever high.
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Rank::ALL
            .into_iter()
            .find(|rank| rank.label().eq_ignore_ascii_case(value))
            .or_else(|| match value {
                "T" | "t" => Some(Rank::Ten),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Edition {
    #[default]
    Base,
    Holographic,
    Polychrome,
    Negative,
}

/// Suit and rank. Unique within a standard deck, so it doubles as the card's
/// identity everywhere a card needs to be referenced without owning it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId {
    pub suit: Suit,
    pub rank: Rank,
}

impl CardId {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Parses compact labels such as `10h`, `Q♠` or `as`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let suit_char = value.chars().last()?;
        let suit = Suit::from_symbol(suit_char)?;
        let rank_part = &value[..value.len() - suit_char.len_utf8()];
        let rank = Rank::from_label(rank_part)?;
        Some(Self { suit, rank })
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    #[serde(default)]
    pub enhanced: bool,
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub edition: Edition,
}

fn default_multiplier() -> u32 {
    1
}

impl Card {
    pub fn standard(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            enhanced: false,
            multiplier: 1,
            sealed: false,
            edition: Edition::Base,
        }
    }

    pub fn id(&self) -> CardId {
        CardId::new(self.suit, self.rank)
    }

    pub fn enhance(&mut self, multiplier_bonus: u32) {
        self.enhanced = true;
        self.multiplier = self.multiplier.saturating_add(multiplier_bonus);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())?;
        if self.enhanced {
            write!(f, "+{}", self.multiplier)?;
        }
        Ok(())
    }
}
