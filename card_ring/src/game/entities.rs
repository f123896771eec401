//! Leaf value types shared across the game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cards in a player's hand.
pub const HAND_SIZE: usize = 4;

/// Pack cards contributed per player: a hand of four plus a deck seed of four.
pub const CARDS_PER_PLAYER: usize = 2 * HAND_SIZE;

/// Placeholder for card face values.
pub type Value = u32;

/// One-based player identifier, unique within a game.
pub type PlayerNumber = usize;

/// One-based deck ordinal; deck i is player i's draw source.
pub type DeckNumber = usize;

/// A card is a bare non-negative denomination. Only value-equality matters;
/// two cards with the same value are interchangeable.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value);

impl Card {
    pub fn value(self) -> Value {
        self.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A player's four privately owned cards.
pub type Hand = [Card; HAND_SIZE];

/// Space-separated rendering of a hand, used by events and output files.
pub fn fmt_hand(hand: &Hand) -> String {
    hand.iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_compare_by_value() {
        assert_eq!(Card(3), Card(3));
        assert_ne!(Card(3), Card(4));
        assert!(Card(3) < Card(4));
    }

    #[test]
    fn hand_formatting() {
        let hand = [Card(1), Card(12), Card(3), Card(4)];
        assert_eq!(fmt_hand(&hand), "1 12 3 4");
    }
}
