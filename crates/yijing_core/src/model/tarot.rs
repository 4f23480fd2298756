//! Tarot card catalog and reading types.

use serde::{Deserialize, Serialize};

/// Structural class of a tarot card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arcana {
    Major,
    Minor,
}

/// Minor arcana suit, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];
}

/// One card of the 78-card catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TarotCard {
    /// Catalog ordinal in `0..78`.
    pub id: u8,
    /// Serialized as `type` to match the stored result schema.
    #[serde(rename = "type")]
    pub arcana: Arcana,
    /// Set only for minor arcana.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    /// Major: `0..=21`. Minor: rank `1..=14` within the suit.
    pub number: u8,
}

/// A named card layout with a fixed number of positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarotSpread {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub positions: usize,
}

/// Cards drawn for one spread.
///
/// `cards` and `positions` have the same length; `positions[i]` is `true`
/// when `cards[i]` is upright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarotReading {
    pub cards: Vec<TarotCard>,
    pub positions: Vec<bool>,
    pub spread: TarotSpread,
}
