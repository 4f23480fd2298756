//! Tarot deck catalog and spread drawing.
//!
//! # Invariants
//! - The catalog has 78 cards: ordinals `0..22` are major arcana numbered by
//!   ordinal, `22..78` are four 14-card suits in table order.
//! - A reading never repeats a card.

use crate::effects::RandomSource;
use crate::model::tarot::{Arcana, Suit, TarotCard, TarotReading, TarotSpread};

pub const DECK_SIZE: usize = 78;
pub const MAJOR_ARCANA_COUNT: usize = 22;
pub const SUIT_SIZE: usize = 14;

/// Builds the full catalog in ordinal order.
pub fn full_deck() -> Vec<TarotCard> {
    (0..DECK_SIZE).map(card_at).collect()
}

/// The built-in past/present/future spread.
pub fn three_card_spread() -> TarotSpread {
    TarotSpread {
        id: 1,
        name: "三张牌阵".to_string(),
        description: "过去、现在、未来".to_string(),
        positions: 3,
    }
}

/// Draws `spread.positions` distinct cards, each with an independent
/// orientation coin flip.
///
/// Spreads asking for more than [`DECK_SIZE`] positions draw the whole deck.
pub fn draw_reading(spread: &TarotSpread, random: &dyn RandomSource) -> TarotReading {
    let mut remaining = full_deck();
    let count = spread.positions.min(DECK_SIZE);
    let mut cards = Vec::with_capacity(count);
    let mut positions = Vec::with_capacity(count);

    for _ in 0..count {
        let index = random.below(remaining.len());
        // `remove` keeps the remaining order, so each draw stays uniform over
        // what is left.
        cards.push(remaining.remove(index));
        positions.push(random.coin());
    }

    TarotReading {
        cards,
        positions,
        spread: spread.clone(),
    }
}

fn card_at(ordinal: usize) -> TarotCard {
    if ordinal < MAJOR_ARCANA_COUNT {
        return TarotCard {
            id: ordinal as u8,
            arcana: Arcana::Major,
            suit: None,
            number: ordinal as u8,
        };
    }

    let minor_index = ordinal - MAJOR_ARCANA_COUNT;
    TarotCard {
        id: ordinal as u8,
        arcana: Arcana::Minor,
        suit: Some(Suit::ALL[minor_index / SUIT_SIZE]),
        number: (minor_index % SUIT_SIZE + 1) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::{full_deck, DECK_SIZE, MAJOR_ARCANA_COUNT};
    use crate::model::tarot::{Arcana, Suit};

    #[test]
    fn catalog_layout_is_in_table_order() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        for (ordinal, card) in deck.iter().enumerate() {
            assert_eq!(card.id as usize, ordinal);
        }

        assert_eq!(deck[0].arcana, Arcana::Major);
        assert_eq!(deck[21].number, 21);
        assert_eq!(deck[21].suit, None);

        assert_eq!(deck[MAJOR_ARCANA_COUNT].suit, Some(Suit::Wands));
        assert_eq!(deck[MAJOR_ARCANA_COUNT].number, 1);
        assert_eq!(deck[35].number, 14);
        assert_eq!(deck[36].suit, Some(Suit::Cups));
        assert_eq!(deck[77].suit, Some(Suit::Pentacles));
        assert_eq!(deck[77].number, 14);
    }

    #[test]
    fn each_suit_has_fourteen_cards() {
        let deck = full_deck();
        for suit in Suit::ALL {
            let count = deck.iter().filter(|card| card.suit == Some(suit)).count();
            assert_eq!(count, 14, "suit {suit:?}");
        }
    }
}
