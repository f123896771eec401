//! Ring card game core.
//!
//! This module provides the concurrent heart of the simulation:
//! - [`deck::Deck`]: FIFO buffers shared by one producer/consumer pair
//! - [`state::GameState`]: first-winner arbitration shared by every player
//! - [`player::Player`]: the per-player discard/draw state machine
//! - [`ring::Ring`]: pack dealing, deck wiring, and task coordination
//! - [`events::GameEvent`]: semantic events for the logging collaborator

pub mod config;
pub mod deck;
pub mod entities;
pub mod errors;
pub mod events;
pub mod player;
pub mod ring;
pub mod state;

pub use config::{DEFAULT_WAIT_TIMEOUT_MS, GameConfig};
pub use ring::{GameOutcome, Ring};
