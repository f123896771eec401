//! Thread-safe FIFO deck buffers.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{sync::Notify, time};

use super::{
    entities::{Card, DeckNumber},
    errors::DeckError,
};

/// A FIFO card buffer positioned between two players in the ring.
///
/// Each deck is shared (behind an `Arc`) by exactly one consumer, the player
/// who draws from it, and one producer, the ring-predecessor who discards
/// into it. There is no capacity bound; growth is naturally limited because
/// every discard into a deck is paired with a draw out of another.
#[derive(Debug)]
pub struct Deck {
    number: DeckNumber,
    cards: Mutex<VecDeque<Card>>,
    /// Wakes the consumer blocked in [`Deck::wait_for_card`]. `notify_one`
    /// stores a permit when nobody is waiting, so a wake that lands between
    /// the consumer's emptiness check and its wait is never lost.
    available: Notify,
}

impl Deck {
    pub fn new(number: DeckNumber, seed: impl IntoIterator<Item = Card>) -> Self {
        Self {
            number,
            cards: Mutex::new(seed.into_iter().collect()),
            available: Notify::new(),
        }
    }

    pub fn number(&self) -> DeckNumber {
        self.number
    }

    fn cards(&self) -> MutexGuard<'_, VecDeque<Card>> {
        // A panic while holding the lock leaves the buffer itself intact.
        self.cards.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a card to the tail of the deck. Never blocks.
    pub fn add_card(&self, card: Card) {
        self.cards().push_back(card);
        self.available.notify_one();
    }

    /// Removes and returns the head of the deck.
    ///
    /// Callers are expected to have excluded emptiness first, either via
    /// [`Deck::wait_for_card`] or by construction; an empty deck yields
    /// [`DeckError::Empty`].
    pub fn draw_card(&self) -> Result<Card, DeckError> {
        self.cards()
            .pop_front()
            .ok_or(DeckError::Empty { deck: self.number })
    }

    /// Waits up to `timeout` for the deck to become non-empty and reports
    /// whether it is *still* empty afterwards.
    ///
    /// Returning `true` on timeout (rather than blocking unboundedly) lets
    /// the consumer re-check the global win flag between waits; a losing
    /// player's deck may never receive another card.
    pub async fn wait_for_card(&self, timeout: Duration) -> bool {
        if !self.is_empty() {
            return false;
        }
        let _ = time::timeout(timeout, self.available.notified()).await;
        self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    /// Non-destructive copy of the current contents, head first.
    pub fn snapshot(&self) -> Vec<Card> {
        self.cards().iter().copied().collect()
    }
}
