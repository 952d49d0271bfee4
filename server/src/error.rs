//! The wire-facing error taxonomy (§7), wrapping [`GameError`] for the
//! cases the engine already detects and adding the participant/turn-order
//! checks only the game-state store can evaluate.

use scrabble::error::GameError;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// The result type used throughout the commit pipeline.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// An error returned to a client in response to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CoreError {
    /// The sender is not a current participant in the game.
    NotInGame,
    /// The sender is not the current player.
    NotYourTurn,
    /// The row/column in a `place-tile` request is out of range, or the
    /// cell is already occupied.
    InvalidPosition,
    /// A staged or exchanged tile is not in the sender's rack.
    TileNotOwned,
    /// An exchange was requested with too few tiles left in the bag.
    BagTooSmall,
    /// An error the engine detected on its own: occupied/duplicate
    /// positions, disconnected placement, non-linear placement, an
    /// invalid word, and similar local invariants.
    Game(GameError),
}

impl From<GameError> for CoreError {
    fn from(err: GameError) -> Self {
        CoreError::Game(err)
    }
}

impl Error for CoreError {}
impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::NotInGame => write!(f, "You are not a participant in this game"),
            CoreError::NotYourTurn => write!(f, "It is not your turn"),
            CoreError::InvalidPosition => write!(f, "That position is off the board or occupied"),
            CoreError::TileNotOwned => write!(f, "That tile is not on your rack"),
            CoreError::BagTooSmall => write!(f, "Not enough tiles remain in the bag to exchange"),
            CoreError::Game(err) => write!(f, "{err}"),
        }
    }
}
