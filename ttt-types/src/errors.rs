use serde::{Deserialize, Serialize};

use crate::GameId;

/// Per-interaction failures. None of these is fatal; each one is reported
/// back to the user who triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GameError {
    #[error("invalid opponent: {reason}")]
    InvalidOpponent { reason: OpponentRejection },
    #[error("not your turn")]
    NotYourTurn,
    #[error("cell {cell} is already taken")]
    CellOccupied { cell: usize },
    #[error("cell {cell} is not on the board")]
    CellOutOfRange { cell: usize },
    #[error("game already completed")]
    GameAlreadyCompleted,
    #[error("game {game_id} not found")]
    GameNotFound { game_id: GameId },
    #[error("rate limit exceeded")]
    RateLimitExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentRejection {
    Bot,
    SelfPlay,
}

impl std::fmt::Display for OpponentRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpponentRejection::Bot => write!(f, "opponent is a bot"),
            OpponentRejection::SelfPlay => write!(f, "cannot play against yourself"),
        }
    }
}
