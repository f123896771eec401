//! The pack: the full ordered sequence of 8n cards distributed at setup.

pub mod errors;

use rand::Rng;
use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::Path,
};

use crate::game::entities::{CARDS_PER_PLAYER, Card, HAND_SIZE, Hand, Value};
use errors::PackError;

/// A validated pack of exactly 8n non-negative cards, remembered together
/// with the player count it was validated against.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pack {
    cards: Vec<Card>,
    players: usize,
}

impl Pack {
    /// Validates raw values into a pack: the player count must be positive,
    /// the length exactly 8n, and every entry a non-negative card value.
    pub fn from_values(values: &[i64], players: usize) -> Result<Self, PackError> {
        if players == 0 {
            return Err(PackError::InvalidPlayerCount);
        }
        let expected = players * CARDS_PER_PLAYER;
        if values.len() != expected {
            return Err(PackError::WrongLength {
                expected,
                actual: values.len(),
            });
        }
        let cards = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if value < 0 {
                    return Err(PackError::NegativeValue { index, value });
                }
                let value =
                    Value::try_from(value).map_err(|_| PackError::OutOfRange { index, value })?;
                Ok(Card(value))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { cards, players })
    }

    /// Generates a pack of 8n cards uniformly drawn from `1..=players`.
    pub fn generate(players: usize) -> Result<Self, PackError> {
        if players == 0 {
            return Err(PackError::InvalidPlayerCount);
        }
        let mut rng = rand::rng();
        let cards = (0..players * CARDS_PER_PLAYER)
            .map(|_| Card(rng.random_range(1..=players as Value)))
            .collect();
        Ok(Self { cards, players })
    }

    /// Reads a pack from a text file, one value per line.
    ///
    /// Reading stops with [`PackError::TooManyLines`] as soon as the 8n line
    /// budget is exceeded, so an oversized file is rejected without being
    /// slurped whole.
    pub fn read_from(path: impl AsRef<Path>, players: usize) -> Result<Self, PackError> {
        if players == 0 {
            return Err(PackError::InvalidPlayerCount);
        }
        let budget = players * CARDS_PER_PLAYER;
        let reader = BufReader::new(File::open(path)?);

        let mut values = Vec::with_capacity(budget);
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if i >= budget {
                return Err(PackError::TooManyLines { budget });
            }
            let value =
                line.trim()
                    .parse::<i64>()
                    .map_err(|_| PackError::NotAnInteger {
                        line: i + 1,
                        value: line.clone(),
                    })?;
            values.push(value);
        }
        Self::from_values(&values, players)
    }

    /// Writes the pack to a text file, one value per line.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), PackError> {
        let content: String = self
            .cards
            .iter()
            .map(|card| format!("{card}\n"))
            .collect();
        fs::write(path, content)?;
        Ok(())
    }

    pub fn players(&self) -> usize {
        self.players
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Partitions the pack by the fixed positional rule: the first 4n values
    /// round-robin into n hands of four, the remaining 4n round-robin into n
    /// deck seeds of four.
    pub fn deal(&self) -> (Vec<Hand>, Vec<Vec<Card>>) {
        let n = self.players;
        let half = HAND_SIZE * n;

        let mut hands = vec![[Card(0); HAND_SIZE]; n];
        for (i, &card) in self.cards[..half].iter().enumerate() {
            hands[i % n][i / n] = card;
        }

        let mut seeds = vec![Vec::with_capacity(HAND_SIZE); n];
        for (i, &card) in self.cards[half..].iter().enumerate() {
            seeds[i % n].push(card);
        }

        (hands, seeds)
    }
}
