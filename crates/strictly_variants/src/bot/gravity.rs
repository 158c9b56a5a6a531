//! Gravity bot: simulate a drop per column.

use super::owns_line;
use crate::games::{Board, Player, Position, Square, landing_row};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

const CENTER_COLUMN: usize = 1;

/// Winning drop, then blocking drop, then the center column, then any open column.
pub(super) fn choose(board: &Board, player: Player, rng: &mut StdRng) -> Option<usize> {
    let open: Vec<usize> = (0..3)
        .filter(|column| landing_row(board, *column).is_some())
        .collect();

    for marker in [player, player.opponent()] {
        if let Some(column) = open
            .iter()
            .copied()
            .find(|column| drop_completes_line(board, *column, marker))
        {
            return Some(column);
        }
    }

    if open.contains(&CENTER_COLUMN) {
        return Some(CENTER_COLUMN);
    }
    open.choose(rng).copied()
}

fn drop_completes_line(board: &Board, column: usize, player: Player) -> bool {
    let Some(pos) = landing_row(board, column).and_then(|row| Position::from_row_col(row, column))
    else {
        return false;
    };
    let mut simulated = board.clone();
    simulated.set(pos, Square::Occupied(player));
    owns_line(&simulated, player)
}
