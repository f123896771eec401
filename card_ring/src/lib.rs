//! # Card Ring
//!
//! A simulation of n players arranged in a ring, circulating cards through
//! shared deck buffers until one of them assembles a winning hand.
//!
//! Each player runs as an independent task that repeatedly discards a card to
//! its right-hand deck and draws a replacement from its left-hand deck. All
//! inter-player communication goes through the decks (each shared by exactly
//! one producer and one consumer), and a single shared [`game::GameState`]
//! arbitrates the win: exactly one player ever latches it, and everyone else
//! observes the flag and terminates promptly.
//!
//! ## Core Modules
//!
//! - [`game`]: decks, players, win arbitration, and ring wiring
//! - [`pack`]: pack generation, validation, and file I/O
//!
//! ## Example
//!
//! ```
//! use card_ring::{GameConfig, Pack, Ring};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Player 1 is dealt four 1s and declares immediately.
//! let values = [1, 2, 1, 2, 1, 2, 1, 2, 2, 1, 2, 1, 2, 1, 2, 1];
//! let pack = Pack::from_values(&values, 2)?;
//! let config = GameConfig {
//!     players: 2,
//!     ..GameConfig::default()
//! };
//! let outcome = Ring::new(&config, &pack)?.run().await;
//! assert_eq!(outcome.winner, Some(1));
//! # Ok(())
//! # }
//! ```

/// Core game logic: entities, decks, players, and ring coordination.
pub mod game;
pub use game::{
    GameConfig, GameOutcome, Ring,
    entities::{CARDS_PER_PLAYER, Card, HAND_SIZE, Hand, PlayerNumber},
    errors::{AlreadyWon, DeckError, GameError},
    events::GameEvent,
};

/// Pack generation, validation, and file I/O.
pub mod pack;
pub use pack::{Pack, errors::PackError};
