//! Ultimate bot: sub-board win, block, then positional play.

use super::owns_line;
use crate::games::{MetaBoard, Player, Position, Square, UltimateEngine, UltimateMove};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub(super) fn choose(
    engine: &UltimateEngine,
    player: Player,
    rng: &mut StdRng,
) -> Option<UltimateMove> {
    let meta = engine.meta();
    let boards = engine.playable_boards();

    for marker in [player, player.opponent()] {
        if let Some(mv) = sub_board_win(meta, &boards, marker) {
            return Some(mv);
        }
    }

    positional(meta, &boards, rng).or_else(|| first_open_cell(meta))
}

fn empty_cells(meta: &MetaBoard, board: Position) -> impl Iterator<Item = UltimateMove> + '_ {
    Position::valid_moves(meta.board(board))
        .into_iter()
        .map(move |cell| UltimateMove { board, cell })
}

fn sub_board_win(meta: &MetaBoard, boards: &[Position], player: Player) -> Option<UltimateMove> {
    boards
        .iter()
        .flat_map(|board| empty_cells(meta, *board))
        .find(|mv| {
            let mut simulated = meta.board(mv.board).clone();
            simulated.set(mv.cell, Square::Occupied(player));
            owns_line(&simulated, player)
        })
}

/// Corners then edges, each group shuffled.
///
/// The first pass only sends the opponent to an open sub-board outside the
/// current board's row and column. The second pass takes any corner or edge,
/// then the center.
fn positional(meta: &MetaBoard, boards: &[Position], rng: &mut StdRng) -> Option<UltimateMove> {
    let mut corners = Position::CORNERS;
    corners.shuffle(rng);
    let mut edges = Position::EDGES;
    edges.shuffle(rng);
    let preferred: Vec<Position> = corners.into_iter().chain(edges).collect();

    for &board in boards {
        let sub = meta.board(board);
        if let Some(&cell) = preferred.iter().find(|cell| {
            sub.is_empty(**cell)
                && meta.outcome(**cell).is_open()
                && cell.row() != board.row()
                && cell.col() != board.col()
        }) {
            return Some(UltimateMove { board, cell });
        }
    }

    for &board in boards {
        let sub = meta.board(board);
        if let Some(cell) = preferred
            .iter()
            .copied()
            .chain([Position::Center])
            .find(|cell| sub.is_empty(*cell))
        {
            return Some(UltimateMove { board, cell });
        }
    }
    None
}

fn first_open_cell(meta: &MetaBoard) -> Option<UltimateMove> {
    meta.open_boards()
        .into_iter()
        .find_map(|board| empty_cells(meta, board).next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Engine;
    use rand::SeedableRng;

    /// X holds the top-left and top-center of the center board; center is active.
    fn threatened_center() -> UltimateEngine {
        let mut engine = UltimateEngine::new();
        engine.place(1, 1, 0, 0, Player::X).unwrap();
        engine.place(0, 0, 1, 1, Player::O).unwrap();
        engine.place(1, 1, 0, 1, Player::X).unwrap();
        engine.place(0, 1, 1, 1, Player::O).unwrap();
        engine
    }

    #[test]
    fn test_takes_sub_board_win() {
        let engine = threatened_center();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            choose(&engine, Player::X, &mut rng),
            Some(UltimateMove {
                board: Position::Center,
                cell: Position::TopRight,
            })
        );
    }

    #[test]
    fn test_blocks_sub_board_win() {
        let engine = threatened_center();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            choose(&engine, Player::O, &mut rng),
            Some(UltimateMove {
                board: Position::Center,
                cell: Position::TopRight,
            })
        );
    }

    #[test]
    fn test_opening_avoids_shared_row_and_column() {
        let engine = UltimateEngine::new();
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            choose(&engine, Player::X, &mut rng),
            Some(UltimateMove {
                board: Position::TopLeft,
                cell: Position::BottomRight,
            })
        );
    }

    #[test]
    fn test_respects_active_board() {
        let mut engine = UltimateEngine::new();
        engine.place(0, 0, 1, 2, Player::X).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let mv = choose(&engine, Player::O, &mut rng).unwrap();
            assert_eq!(mv.board, Position::MiddleRight);
            assert!(engine.meta().board(mv.board).is_empty(mv.cell));
        }
        let mv = choose(&engine, Player::O, &mut rng).unwrap();
        assert!(engine.clone().apply_move(mv, Player::O).is_ok());
    }
}
