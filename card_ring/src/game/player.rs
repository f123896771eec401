//! The per-player discard/draw state machine.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use super::{
    deck::Deck,
    entities::{Card, HAND_SIZE, Hand, PlayerNumber},
    errors::DeckError,
    events::{EventSink, GameEvent},
    state::GameState,
};

/// How a player's run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlayerOutcome {
    Won,
    Lost { winner: PlayerNumber },
}

/// Final report returned by [`Player::run`]. Carries the final hand so
/// callers can audit card conservation across the whole ring.
#[derive(Clone, Debug)]
pub struct PlayerExit {
    pub number: PlayerNumber,
    pub outcome: PlayerOutcome,
    pub hand: Hand,
}

/// An autonomous worker owning a fixed-size hand, wired to one left deck
/// (draw source) and one right deck (discard sink).
///
/// The hand and discard queue are exclusively owned: [`Player::run`] consumes
/// the player, so nothing else can touch them once the task starts. All
/// cross-player traffic goes through the decks and the shared [`GameState`].
#[derive(Debug)]
pub struct Player {
    number: PlayerNumber,
    hand: Hand,

    /// Hand entries equal to `number`. The hand is winning when this reaches
    /// [`HAND_SIZE`].
    preferred_count: usize,

    /// Non-preferred hand slots in discovery order. Discards pop the front,
    /// so the discard policy is deterministic FIFO.
    pending_discards: VecDeque<usize>,

    left_deck: Arc<Deck>,
    right_deck: Arc<Deck>,
    state: Arc<GameState>,
    events: EventSink,
    wait_timeout: Duration,
}

impl Player {
    pub fn new(
        number: PlayerNumber,
        left_deck: Arc<Deck>,
        right_deck: Arc<Deck>,
        hand: Hand,
        state: Arc<GameState>,
        events: EventSink,
        wait_timeout: Duration,
    ) -> Self {
        let mut player = Self {
            number,
            hand,
            preferred_count: 0,
            pending_discards: VecDeque::with_capacity(HAND_SIZE),
            left_deck,
            right_deck,
            state,
            events,
            wait_timeout,
        };
        for slot in 0..HAND_SIZE {
            player.check_preferred(player.hand[slot], slot);
        }
        player
    }

    /// Updates the preferred count and discard queue for a card sitting in
    /// `slot`: preferred cards are kept out of the queue for good, everything
    /// else lines up to be discarded.
    fn check_preferred(&mut self, card: Card, slot: usize) {
        if card.value() as usize == self.number {
            self.preferred_count += 1;
        } else {
            self.pending_discards.push_back(slot);
        }
    }

    /// A hand wins when it is entirely one denomination: all preferred, or
    /// degenerate four-of-a-kind in a denomination the player doesn't collect.
    fn is_winning_hand(&self) -> bool {
        if self.preferred_count == HAND_SIZE {
            return true;
        }
        self.preferred_count == 0 && self.hand.iter().all(|card| *card == self.hand[0])
    }

    /// Discards the card in `slot` to the right deck, then draws its
    /// replacement from the left deck into the freed slot.
    ///
    /// Discard-then-draw keeps the total held cards constant and, with one
    /// producer and one consumer per deck, makes a cyclic wait impossible.
    fn discard_and_draw(&mut self, slot: usize) -> Result<(), DeckError> {
        let discarded = self.hand[slot];
        self.right_deck.add_card(discarded);

        let drawn = match self.left_deck.draw_card() {
            Ok(card) => card,
            Err(err) => {
                // Only reachable if the caller skipped the wait protocol;
                // requeue the slot so the hand bookkeeping stays coherent.
                self.pending_discards.push_front(slot);
                return Err(err);
            }
        };
        self.hand[slot] = drawn;
        self.check_preferred(drawn, slot);

        self.events.emit(GameEvent::Discard {
            player: self.number,
            card: discarded,
            deck: self.right_deck.number(),
        });
        self.events.emit(GameEvent::Draw {
            player: self.number,
            card: drawn,
            deck: self.left_deck.number(),
        });
        self.events.emit(GameEvent::HandSnapshot {
            player: self.number,
            hand: self.hand,
        });
        Ok(())
    }

    /// Runs the draw-discard loop until a win is observed, then terminates.
    ///
    /// The win check runs strictly before any discard/draw, so a dealt
    /// winning hand declares without playing a card. Every wait on the left
    /// deck is bounded, which makes the win-flag poll at the top of the loop
    /// the cancellation mechanism for losers.
    pub async fn run(mut self) -> PlayerExit {
        log::debug!("player {} starting", self.number);

        let outcome = loop {
            if let Some(winner) = self.state.won_by() {
                self.events.emit(GameEvent::LossNotified {
                    player: self.number,
                    winner,
                });
                break PlayerOutcome::Lost { winner };
            }

            if self.is_winning_hand() {
                match self.state.declare_win(self.number) {
                    Ok(()) => {
                        log::info!("player {} wins", self.number);
                        self.events.emit(GameEvent::Win {
                            player: self.number,
                        });
                        break PlayerOutcome::Won;
                    }
                    Err(already_won) => {
                        // Lost the race; expected, not fatal.
                        log::debug!("player {}: {already_won}", self.number);
                        self.events.emit(GameEvent::LossNotified {
                            player: self.number,
                            winner: already_won.winner,
                        });
                        break PlayerOutcome::Lost {
                            winner: already_won.winner,
                        };
                    }
                }
            }

            if self.left_deck.wait_for_card(self.wait_timeout).await {
                // Still empty; loop around and re-poll the win flag.
                continue;
            }

            if let Some(slot) = self.pending_discards.pop_front() {
                if let Err(err) = self.discard_and_draw(slot) {
                    log::warn!("player {}: {err}", self.number);
                }
            }
        };

        log::debug!("player {} terminating: {outcome:?}", self.number);
        PlayerExit {
            number: self.number,
            outcome,
            hand: self.hand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::errors::AlreadyWon;

    fn fixture(number: PlayerNumber, hand: Hand, left: Vec<Card>, right: Vec<Card>) -> Player {
        // The receiver is dropped; emission to a closed channel is a no-op.
        let (sink, _) = EventSink::channel();
        Player::new(
            number,
            Arc::new(Deck::new(1, left)),
            Arc::new(Deck::new(2, right)),
            hand,
            Arc::new(GameState::new()),
            sink,
            Duration::from_millis(50),
        )
    }

    #[test]
    fn initial_scan_counts_preferred_and_queues_the_rest() {
        let player = fixture(1, [Card(1), Card(2), Card(1), Card(3)], vec![], vec![]);
        assert_eq!(player.preferred_count, 2);
        assert_eq!(player.pending_discards, VecDeque::from([1, 3]));
    }

    #[test]
    fn check_preferred_bookkeeping() {
        let mut player = fixture(1, [Card(1), Card(1), Card(1), Card(1)], vec![], vec![]);
        assert_eq!(player.preferred_count, 4);
        assert!(player.pending_discards.is_empty());

        player.check_preferred(Card(1), 0);
        assert_eq!(player.preferred_count, 5);

        player.check_preferred(Card(2), 3);
        assert_eq!(player.preferred_count, 5);
        assert_eq!(player.pending_discards, VecDeque::from([3]));
    }

    #[test]
    fn discard_and_draw_moves_cards_between_decks() {
        let mut player = fixture(
            1,
            [Card(2), Card(3), Card(4), Card(5)],
            vec![Card(6), Card(1)],
            vec![],
        );

        player.discard_and_draw(0).unwrap();
        assert_eq!(player.preferred_count, 0);
        assert_eq!(player.hand, [Card(6), Card(3), Card(4), Card(5)]);
        assert_eq!(player.right_deck.snapshot(), vec![Card(2)]);
        assert_eq!(player.left_deck.snapshot(), vec![Card(1)]);

        player.discard_and_draw(1).unwrap();
        assert_eq!(player.preferred_count, 1);
        assert_eq!(player.hand, [Card(6), Card(1), Card(4), Card(5)]);
        assert_eq!(player.right_deck.snapshot(), vec![Card(2), Card(3)]);
        assert!(player.left_deck.is_empty());
    }

    #[test]
    fn winning_hand_predicate() {
        let preferred = fixture(1, [Card(1), Card(1), Card(1), Card(1)], vec![], vec![]);
        assert!(preferred.is_winning_hand());

        let degenerate = fixture(1, [Card(4), Card(4), Card(4), Card(4)], vec![], vec![]);
        assert!(degenerate.is_winning_hand());

        let mixed = fixture(1, [Card(4), Card(4), Card(4), Card(1)], vec![], vec![]);
        assert!(!mixed.is_winning_hand());
    }

    #[tokio::test]
    async fn dealt_winner_declares_without_drawing() {
        let (sink, mut events) = EventSink::channel();
        let state = Arc::new(GameState::new());
        let left = Arc::new(Deck::new(1, [Card(9)]));
        let player = Player::new(
            1,
            left.clone(),
            Arc::new(Deck::new(2, [])),
            [Card(1), Card(1), Card(1), Card(1)],
            state.clone(),
            sink,
            Duration::from_millis(50),
        );

        let exit = player.run().await;
        assert_eq!(exit.outcome, PlayerOutcome::Won);
        assert_eq!(state.won_by(), Some(1));
        // No card was played: the left deck is untouched.
        assert_eq!(left.len(), 1);
        assert_eq!(events.recv().await, Some(GameEvent::Win { player: 1 }));
    }

    #[tokio::test]
    async fn loser_terminates_on_peer_win_without_blocking() {
        let (sink, mut events) = EventSink::channel();
        let state = Arc::new(GameState::new());
        state.declare_win(2).unwrap();

        let player = Player::new(
            1,
            Arc::new(Deck::new(1, [])),
            Arc::new(Deck::new(2, [])),
            [Card(3), Card(4), Card(5), Card(6)],
            state,
            sink,
            Duration::from_millis(50),
        );

        let exit = player.run().await;
        assert_eq!(exit.outcome, PlayerOutcome::Lost { winner: 2 });
        assert_eq!(
            events.recv().await,
            Some(GameEvent::LossNotified {
                player: 1,
                winner: 2
            })
        );
    }

    #[tokio::test]
    async fn blocked_loser_notices_a_late_win_within_the_timeout() {
        let (sink, _receiver) = EventSink::channel();
        let state = Arc::new(GameState::new());

        // Empty left deck: the player can only sit in bounded waits.
        let player = Player::new(
            1,
            Arc::new(Deck::new(1, [])),
            Arc::new(Deck::new(2, [])),
            [Card(3), Card(4), Card(5), Card(6)],
            state.clone(),
            sink,
            Duration::from_millis(20),
        );

        let task = tokio::spawn(player.run());
        tokio::time::sleep(Duration::from_millis(40)).await;
        state.declare_win(3).unwrap();

        let exit = tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("player failed to observe the win flag")
            .unwrap();
        assert_eq!(exit.outcome, PlayerOutcome::Lost { winner: 3 });
    }

    #[tokio::test]
    async fn racing_declaration_is_absorbed() {
        let (sink, _receiver) = EventSink::channel();
        let state = Arc::new(GameState::new());

        let player = Player::new(
            1,
            Arc::new(Deck::new(1, [])),
            Arc::new(Deck::new(2, [])),
            [Card(1), Card(1), Card(1), Card(1)],
            state.clone(),
            sink,
            Duration::from_millis(50),
        );

        // A peer slips in first; the player's own declaration must lose
        // quietly rather than crash or overwrite.
        state.declare_win(2).unwrap();
        let exit = player.run().await;
        assert_eq!(exit.outcome, PlayerOutcome::Lost { winner: 2 });
        assert_eq!(state.declare_win(1), Err(AlreadyWon { winner: 2 }));
    }
}
