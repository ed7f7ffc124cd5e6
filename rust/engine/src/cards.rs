use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DeckError;
use crate::rules::Rules;

/// Number of distinct (suit, rank) combinations in a standard deck.
pub const MAX_CARDS: usize = 52;

/// Separator used by the canonical `suit::rank` card key.
pub const KEY_SEPARATOR: &str = "::";

/// Represents one of the four suits in a standard 52-card deck.
/// Each suit carries a unique display symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Spades suit (♠)
    Spades,
    /// Hearts suit (♥)
    Hearts,
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
}

impl Suit {
    /// Sampling order used by the generator.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suit {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name() == s)
            .ok_or_else(|| DeckError::InvalidCardKey(format!("unknown suit '{}'", s)))
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Serialized by its face label (`"2"` .. `"10"`, `"J"`, `"Q"`, `"K"`, `"A"`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two = 2,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
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
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .into_iter()
            .find(|rank| rank.label() == s)
            .ok_or_else(|| DeckError::InvalidCardKey(format!("unknown rank '{}'", s)))
    }
}

/// Canonical identity of a card. Displays and parses as `suit::rank`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CardKey {
    pub suit: Suit,
    pub rank: Rank,
}

impl CardKey {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Materializes the key as a [`Card`] carrying a snapshot of `rules`.
    pub fn to_card(self, rules: &Rules) -> Card {
        Card {
            suit: self.suit,
            rank: self.rank,
            symbol: self.suit.symbol().to_string(),
            state: rules.state.clone(),
            rules: rules.clone(),
        }
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.suit, KEY_SEPARATOR, self.rank)
    }
}

impl FromStr for CardKey {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (suit, rank) = s
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| DeckError::InvalidCardKey(s.to_string()))?;
        Ok(Self {
            suit: suit.parse()?,
            rank: rank.parse()?,
        })
    }
}

/// A playing card as handed out to players.
/// `state` and `rules` are copies of the rules active when the card was
/// materialized, not live references.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub symbol: String,
    /// Face orientation, e.g. `face-down`
    pub state: String,
    pub rules: Rules,
}

impl Card {
    pub fn key(&self) -> CardKey {
        CardKey::new(self.suit, self.rank)
    }
}

/// Every (suit, rank) combination, suit-major in [`Suit::ALL`] order.
pub fn all_keys() -> Vec<CardKey> {
    let mut v = Vec::with_capacity(MAX_CARDS);
    for &s in &Suit::ALL {
        for &r in &Rank::ALL {
            v.push(CardKey::new(s, r));
        }
    }
    v
}
