use crate::UserId;
use serde::{Deserialize, Serialize};

pub const BOARD_CELLS: usize = 9;
pub const BOARD_SIDE: usize = 3;

pub const EMPTY_GLYPH: &str = "⬜";
pub const X_GLYPH: &str = "❌";
pub const O_GLYPH: &str = "⭕";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X, // challenger, moves first
    O,
}

impl Mark {
    pub fn glyph(self) -> &'static str {
        match self {
            Mark::X => X_GLYPH,
            Mark::O => O_GLYPH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Cell::Empty => EMPTY_GLYPH,
            Cell::Marked(mark) => mark.glyph(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    AwaitingMove { turn: UserId },
    Won { winner: UserId },
    Draw,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::AwaitingMove { .. })
    }
}

/// Terminal result of a session from one participant's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Continuing { next_turn: UserId },
    Won { winner: UserId, loser: UserId },
    Draw { players: [UserId; 2] },
}

impl MoveResult {
    /// Per-participant outcomes to record, empty while the game continues.
    pub fn outcomes(&self) -> Vec<(UserId, Outcome)> {
        match self {
            MoveResult::Continuing { .. } => Vec::new(),
            MoveResult::Won { winner, loser } => vec![
                (winner.clone(), Outcome::Win),
                (loser.clone(), Outcome::Loss),
            ],
            MoveResult::Draw { players } => players
                .iter()
                .map(|player| (player.clone(), Outcome::Draw))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub index: usize,
    pub glyph: String,
    pub interactive: bool,
}

/// Immutable 3×3 snapshot of a session board, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub rows: Vec<Vec<CellView>>,
}

impl BoardView {
    pub fn cell(&self, index: usize) -> Option<&CellView> {
        self.rows
            .get(index / BOARD_SIDE)
            .and_then(|row| row.get(index % BOARD_SIDE))
    }

    pub fn interactive_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.interactive).count()
    }
}
