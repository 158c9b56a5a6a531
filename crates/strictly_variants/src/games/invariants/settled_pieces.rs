//! Gravity invariant: committed pieces rest on the floor or another piece.

use super::super::{GravityEngine, Position};
use super::Invariant;

/// Invariant: no committed piece has an empty cell directly below it.
pub struct SettledPiecesInvariant;

impl Invariant<GravityEngine> for SettledPiecesInvariant {
    fn holds(engine: &GravityEngine) -> bool {
        let board = engine.board();
        Position::ALL.into_iter().all(|pos| {
            board.is_empty(pos)
                || Position::from_row_col(pos.row() + 1, pos.col())
                    .is_none_or(|below| !board.is_empty(below))
        })
    }

    fn description() -> &'static str {
        "Committed pieces never float above an empty cell"
    }
}
