//! Move intents and the errors raised when they are rejected.
//!
//! Moves are domain events, not side effects. A caller hands the session a
//! raw intent (cell coordinates or a column) and the owning engine decides
//! whether it is legal.

use super::position::Position;
use super::types::{Phase, Player};
use serde::{Deserialize, Serialize};

/// A raw move intent, shaped by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveIntent {
    /// Place on a flat 3x3 board (Classic, Sliding-Window).
    Cell {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
    },
    /// Drop into a column (Gravity).
    Column(usize),
    /// Place inside one sub-board of the meta grid (Ultimate).
    Meta {
        /// Row of the sub-board.
        big_row: usize,
        /// Column of the sub-board.
        big_col: usize,
        /// Row inside the sub-board.
        small_row: usize,
        /// Column inside the sub-board.
        small_col: usize,
    },
}

impl MoveIntent {
    /// Intent for a flat board position.
    pub fn cell(pos: Position) -> Self {
        MoveIntent::Cell {
            row: pos.row(),
            col: pos.col(),
        }
    }

    /// Intent for a cell inside an Ultimate sub-board.
    pub fn meta(board: Position, cell: Position) -> Self {
        MoveIntent::Meta {
            big_row: board.row(),
            big_col: board.col(),
            small_row: cell.row(),
            small_col: cell.col(),
        }
    }
}

impl std::fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveIntent::Cell { row, col } => write!(f, "cell ({}, {})", row, col),
            MoveIntent::Column(col) => write!(f, "column {}", col),
            MoveIntent::Meta {
                big_row,
                big_col,
                small_row,
                small_col,
            } => write!(
                f,
                "board ({}, {}) cell ({}, {})",
                big_row, big_col, small_row, small_col
            ),
        }
    }
}

/// Why an engine refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    /// A coordinate fell outside `[0, 3)`.
    #[display("coordinates out of range")]
    OutOfRange,

    /// The target square is already occupied.
    #[display("square {} is already occupied", _0)]
    Occupied(Position),

    /// The targeted Ultimate sub-board is already won or drawn.
    #[display("sub-board {} is already decided", _0)]
    SubBoardDecided(Position),

    /// The active constraint points at a different sub-board.
    #[display("must play in sub-board {}, not {}", expected, got)]
    WrongSubBoard {
        /// Sub-board the constraint requires.
        expected: Position,
        /// Sub-board the move targeted.
        got: Position,
    },

    /// The intent does not fit the variant's move shape.
    #[display("move shape does not match this variant")]
    WrongShape,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Occupied cell, out-of-range coordinate, wrong sub-board or wrong shape.
    #[display("Invalid move: {}", _0)]
    InvalidMove(MoveRejection),

    /// Gravity column has no empty row left.
    #[display("Column {} is full", _0)]
    ColumnFull(usize),

    /// Move attempted while the game is over, animating or waiting on the bot.
    #[display("Session is not accepting moves ({})", _0)]
    SessionNotPlaying(Phase),

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Player),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

impl From<MoveRejection> for GameError {
    fn from(rejection: MoveRejection) -> Self {
        GameError::InvalidMove(rejection)
    }
}
