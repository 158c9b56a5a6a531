//! Draw detection and sub-board classification.

use super::super::{Board, Square, SubOutcome};
use super::win::find_line;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Summarizes a sub-board: a line wins it, a full board without one draws it.
///
/// The sum check alone cannot tell a drawn board from an open one, so the
/// full-cell inspection is paired with it.
#[instrument(skip(board))]
pub fn classify_sub_board(board: &Board) -> SubOutcome {
    if let Some((player, _)) = find_line(&board.values()) {
        SubOutcome::WonBy(player)
    } else if is_full(board) {
        SubOutcome::Drawn
    } else {
        SubOutcome::Open
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::{Player, Position};
    use super::*;

    fn fill(board: &mut Board, layout: [Option<Player>; 9]) {
        for (pos, mark) in Position::ALL.into_iter().zip(layout) {
            if let Some(player) = mark {
                board.set(pos, Square::Occupied(player));
            }
        }
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
        assert_eq!(classify_sub_board(&board), SubOutcome::Open);
    }

    #[test]
    fn test_drawn_sub_board() {
        let (x, o) = (Some(Player::X), Some(Player::O));
        let mut board = Board::new();
        // X O X / O X X / O X O
        fill(&mut board, [x, o, x, o, x, x, o, x, o]);
        assert!(is_full(&board));
        assert_eq!(classify_sub_board(&board), SubOutcome::Drawn);
    }

    #[test]
    fn test_won_sub_board() {
        let (x, o) = (Some(Player::X), Some(Player::O));
        let mut board = Board::new();
        fill(&mut board, [o, x, None, None, o, x, None, None, o]);
        assert_eq!(classify_sub_board(&board), SubOutcome::WonBy(Player::O));
    }
}
