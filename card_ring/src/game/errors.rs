//! Error types for game setup and play.

use thiserror::Error;

use super::entities::{DeckNumber, PlayerNumber};

/// Returned to the loser of a `declare_win` race. This is an expected
/// outcome, absorbed by the player loop, never a fatal condition.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("player {winner} has already declared a win")]
pub struct AlreadyWon {
    pub winner: PlayerNumber,
}

/// Errors raised by deck operations.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DeckError {
    /// A draw was attempted on an empty deck outside the wait protocol.
    /// Transient: resolved by waiting and retrying.
    #[error("deck {deck} is empty")]
    Empty { deck: DeckNumber },
}

/// Configuration errors, fatal at setup before any player task is spawned.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GameError {
    #[error("player count must be larger than 0")]
    InvalidPlayerCount,
    #[error("pack was validated for {pack} players but the game expects {config}")]
    PlayerCountMismatch { pack: usize, config: usize },
}
