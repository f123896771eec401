//! Pack validation and I/O errors.

use thiserror::Error;

/// Errors raised while generating, validating, or reading a pack. All of
/// them are fatal at setup; the game never starts on a bad pack.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("player count must be larger than 0")]
    InvalidPlayerCount,

    #[error("pack length must be 8 times the player count ({expected}), is instead {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("element {index} is not a non-negative integer: \"{value}\"")]
    NegativeValue { index: usize, value: i64 },

    #[error("element {index} does not fit a card value: \"{value}\"")]
    OutOfRange { index: usize, value: i64 },

    #[error("line {line} is not an integer: \"{value}\"")]
    NotAnInteger { line: usize, value: String },

    #[error("pack file exceeds the {budget}-line budget")]
    TooManyLines { budget: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
