//! Win arbitration shared by every player.

use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use super::{entities::PlayerNumber, errors::AlreadyWon};

/// Process-wide arbitration object, constructed once at setup and handed to
/// every player behind an `Arc`; there is no implicit global.
///
/// The check-then-set in [`GameState::declare_win`] runs under the winner
/// mutex, so exactly one caller ever latches. The winner is written before
/// `won` is stored with `Release`; a reader that observes `won` and then asks
/// [`GameState::won_by`] is guaranteed to see the published winner.
#[derive(Debug, Default)]
pub struct GameState {
    won: AtomicBool,
    winner: Mutex<Option<PlayerNumber>>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    fn winner(&self) -> MutexGuard<'_, Option<PlayerNumber>> {
        self.winner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Non-blocking read of the win flag, polled continuously by players.
    pub fn is_won(&self) -> bool {
        self.won.load(Ordering::Acquire)
    }

    /// The latched winner, if any. Never changes once set.
    pub fn won_by(&self) -> Option<PlayerNumber> {
        *self.winner()
    }

    /// Latches `player` as the winner if nobody beat them to it.
    ///
    /// Losing the race yields [`AlreadyWon`] naming the recorded winner;
    /// callers absorb it and terminate.
    pub fn declare_win(&self, player: PlayerNumber) -> Result<(), AlreadyWon> {
        let mut winner = self.winner();
        if let Some(winner) = *winner {
            return Err(AlreadyWon { winner });
        }
        *winner = Some(player);
        self.won.store(true, Ordering::Release);
        Ok(())
    }
}
