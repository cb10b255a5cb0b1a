use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::LayoutError;

/// The thirteen ranks of a standard suit, in deck order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
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
}

pub const STANDARD_RANKS: [Rank; 13] = [
    Rank::Ace,
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
];

pub const NUMERIC_RANKS: [Rank; 9] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
];

impl Rank {
    /// Label used for numeral asset names and output file names.
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
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
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        STANDARD_RANKS
            .iter()
            .copied()
            .find(|rank| rank.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Number of pips a standard face shows; court cards carry none.
    pub fn pip_count(&self) -> usize {
        match self {
            Rank::Ace => 1,
            Rank::Jack | Rank::Queen | Rank::King => 0,
            other => other.label().parse().unwrap_or(0),
        }
    }

    pub fn is_court(&self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }
}

impl FromStr for Rank {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::from_label(s).ok_or_else(|| LayoutError::UnknownRank(s.to_string()))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
