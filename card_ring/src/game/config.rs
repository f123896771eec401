//! Game configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::GameError;

/// How long a player waits on its left deck before re-polling the win flag.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 200;

/// Game configuration, validated before any player task is spawned.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameConfig {
    /// Number of players (and decks) in the ring.
    pub players: usize,

    /// Bounded wait used by every player when its left deck is empty. This
    /// is the sole cancellation mechanism: shorter timeouts mean losers
    /// notice the win flag sooner, at the cost of more wakeups.
    pub wait_timeout_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 4,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        }
    }
}

impl GameConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.players == 0 {
            return Err(GameError::InvalidPlayerCount);
        }
        Ok(())
    }
}
