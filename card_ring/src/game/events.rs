//! Semantic game events.
//!
//! Players emit events describing what happened; how they get rendered is the
//! runner's business. Delivery is best-effort through an unbounded channel: a
//! dropped receiver never affects gameplay.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

use super::entities::{Card, DeckNumber, Hand, PlayerNumber, fmt_hand};

/// Events that occur during gameplay.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    Discard {
        player: PlayerNumber,
        card: Card,
        deck: DeckNumber,
    },
    Draw {
        player: PlayerNumber,
        card: Card,
        deck: DeckNumber,
    },
    HandSnapshot {
        player: PlayerNumber,
        hand: Hand,
    },
    Win {
        player: PlayerNumber,
    },
    LossNotified {
        player: PlayerNumber,
        winner: PlayerNumber,
    },
}

impl GameEvent {
    /// The player this event belongs to, used to route per-player output.
    pub fn player(&self) -> PlayerNumber {
        match self {
            Self::Discard { player, .. }
            | Self::Draw { player, .. }
            | Self::HandSnapshot { player, .. }
            | Self::Win { player }
            | Self::LossNotified { player, .. } => *player,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discard { player, card, deck } => {
                write!(f, "player {player} discards a {card} to deck {deck}")
            }
            Self::Draw { player, card, deck } => {
                write!(f, "player {player} draws a {card} from deck {deck}")
            }
            Self::HandSnapshot { player, hand } => {
                write!(f, "player {player} current hand is {}", fmt_hand(hand))
            }
            Self::Win { player } => write!(f, "player {player} wins"),
            Self::LossNotified { player, winner } => write!(
                f,
                "player {winner} has informed player {player} that player {winner} has won"
            ),
        }
    }
}

/// Cloneable sending half handed to each player.
#[derive(Clone, Debug)]
pub struct EventSink {
    sender: mpsc::UnboundedSender<GameEvent>,
}

impl EventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Sends an event, ignoring a closed channel: events are observability,
    /// never control flow.
    pub fn emit(&self, event: GameEvent) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_original_log_phrasing() {
        let discard = GameEvent::Discard {
            player: 1,
            card: Card(3),
            deck: 2,
        };
        assert_eq!(discard.to_string(), "player 1 discards a 3 to deck 2");

        let snapshot = GameEvent::HandSnapshot {
            player: 2,
            hand: [Card(2), Card(2), Card(2), Card(2)],
        };
        assert_eq!(snapshot.to_string(), "player 2 current hand is 2 2 2 2");

        let loss = GameEvent::LossNotified {
            player: 2,
            winner: 1,
        };
        assert_eq!(
            loss.to_string(),
            "player 1 has informed player 2 that player 1 has won"
        );
    }

    #[test]
    fn emit_survives_a_dropped_receiver() {
        let (sink, receiver) = EventSink::channel();
        drop(receiver);
        sink.emit(GameEvent::Win { player: 1 });
    }
}
