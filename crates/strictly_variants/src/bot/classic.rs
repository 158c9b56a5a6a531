//! Classic bot: take a win, block a win, else play anywhere.

use crate::games::{Board, Player, Position, rules::LINES};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Own win first, then block, then a uniformly random empty square.
pub(super) fn choose(board: &Board, player: Player, rng: &mut StdRng) -> Option<Position> {
    completing_cell(board, player)
        .or_else(|| completing_cell(board, player.opponent()))
        .or_else(|| Position::valid_moves(board).choose(rng).copied())
}

/// The empty cell of the first line holding two of `player`'s markers.
///
/// Lines are scanned rows first, then columns, then the main and anti
/// diagonals. A line summing to `2 * marker` has exactly one empty cell.
fn completing_cell(board: &Board, player: Player) -> Option<Position> {
    let target = 2 * i32::from(player.value());
    LINES
        .iter()
        .find(|line| {
            line.iter()
                .map(|pos| i32::from(board.get(*pos).value()))
                .sum::<i32>()
                == target
        })
        .and_then(|line| line.iter().copied().find(|pos| board.is_empty(*pos)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Square;
    use rand::SeedableRng;

    fn board_with(x: &[Position], o: &[Position]) -> Board {
        let mut board = Board::new();
        for pos in x {
            board.set(*pos, Square::Occupied(Player::X));
        }
        for pos in o {
            board.set(*pos, Square::Occupied(Player::O));
        }
        board
    }

    #[test]
    fn test_bot_prefers_own_win_over_block() {
        let board = board_with(
            &[Position::MiddleLeft, Position::Center],
            &[Position::TopLeft, Position::TopCenter],
        );
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(choose(&board, Player::O, &mut rng), Some(Position::TopRight));
    }

    #[test]
    fn test_bot_blocks_opponent() {
        let board = board_with(&[Position::TopLeft, Position::TopCenter], &[Position::Center]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(choose(&board, Player::O, &mut rng), Some(Position::TopRight));
    }

    #[test]
    fn test_random_move_is_empty() {
        let board = board_with(&[Position::Center], &[]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let pos = choose(&board, Player::O, &mut rng).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let (x, o) = (Player::X, Player::O);
        let mut board = Board::new();
        for (pos, p) in Position::ALL.into_iter().zip([x, o, x, o, x, x, o, x, o]) {
            board.set(pos, Square::Occupied(p));
        }
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(choose(&board, Player::O, &mut rng), None);
    }
}
