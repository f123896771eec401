//! Ring wiring and task coordination.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::{
    config::GameConfig,
    deck::Deck,
    entities::{Card, DeckNumber, Hand, PlayerNumber},
    errors::GameError,
    events::{EventSink, GameEvent},
    player::{Player, PlayerOutcome},
    state::GameState,
};
use crate::pack::Pack;

/// Everything known once the last player task has terminated.
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// The latched winner. Present after any run in which at least one
    /// player terminated normally.
    pub winner: Option<PlayerNumber>,

    /// Each player's final hand.
    pub hands: Vec<(PlayerNumber, Hand)>,

    /// Each deck's final contents, head first.
    pub decks: Vec<(DeckNumber, Vec<Card>)>,

    /// Every emitted event, in global emission order.
    pub events: Vec<GameEvent>,
}

impl GameOutcome {
    /// Total cards across all hands and decks; 8n for the life of the game.
    pub fn total_cards(&self) -> usize {
        let in_hands: usize = self.hands.iter().map(|(_, hand)| hand.len()).sum();
        let in_decks: usize = self.decks.iter().map(|(_, cards)| cards.len()).sum();
        in_hands + in_decks
    }
}

/// A fully wired game: n decks, n players, one shared [`GameState`].
///
/// Construction deals the pack and wires the topology; nothing runs until
/// [`Ring::run`] spawns the player tasks. Deck i seeds player i's draw
/// source, and player i discards into deck i+1 (deck 1 for the last player),
/// so each deck has exactly one producer and one consumer.
#[derive(Debug)]
pub struct Ring {
    state: Arc<GameState>,
    decks: Vec<Arc<Deck>>,
    players: Vec<Player>,
    events: mpsc::UnboundedReceiver<GameEvent>,
}

impl Ring {
    /// Validates the configuration against the pack and builds the ring.
    ///
    /// Fails atomically: a rejected setup leaves no partial game state and
    /// spawns no tasks.
    pub fn new(config: &GameConfig, pack: &Pack) -> Result<Self, GameError> {
        config.validate()?;
        if pack.players() != config.players {
            return Err(GameError::PlayerCountMismatch {
                pack: pack.players(),
                config: config.players,
            });
        }

        let (hands, seeds) = pack.deal();
        let state = Arc::new(GameState::new());
        let (sink, events) = EventSink::channel();

        let decks: Vec<Arc<Deck>> = seeds
            .into_iter()
            .enumerate()
            .map(|(i, seed)| Arc::new(Deck::new(i + 1, seed)))
            .collect();

        let players = hands
            .into_iter()
            .enumerate()
            .map(|(i, hand)| {
                let left = Arc::clone(&decks[i]);
                let right = Arc::clone(&decks[(i + 1) % config.players]);
                Player::new(
                    i + 1,
                    left,
                    right,
                    hand,
                    Arc::clone(&state),
                    sink.clone(),
                    config.wait_timeout(),
                )
            })
            .collect();

        Ok(Self {
            state,
            decks,
            players,
            events,
        })
    }

    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    /// Spawns one task per player, joins them all, and assembles the outcome.
    ///
    /// Completion is driven entirely by the players: each terminates on
    /// self-win or on observing the win flag within one polling timeout.
    pub async fn run(self) -> GameOutcome {
        let Self {
            state,
            decks,
            players,
            mut events,
        } = self;

        let tasks: Vec<_> = players
            .into_iter()
            .map(|player| tokio::spawn(player.run()))
            .collect();

        let mut hands = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(exit) => {
                    if exit.outcome == PlayerOutcome::Won {
                        log::info!("game won by player {}", exit.number);
                    }
                    hands.push((exit.number, exit.hand));
                }
                Err(err) => log::error!("player task failed: {err}"),
            }
        }

        // All sinks are dropped with their players, so the drain terminates.
        let mut emitted = Vec::new();
        while let Ok(event) = events.try_recv() {
            emitted.push(event);
        }

        let decks = decks
            .iter()
            .map(|deck| (deck.number(), deck.snapshot()))
            .collect();

        GameOutcome {
            winner: state.won_by(),
            hands,
            decks,
            events: emitted,
        }
    }
}
