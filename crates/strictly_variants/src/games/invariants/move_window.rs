//! Sliding-window invariants: bounded histories that mirror the board.

use super::super::sliding::WINDOW;
use super::super::{Player, SlidingEngine, Square};
use super::Invariant;

/// Invariant: no player keeps more than three pieces.
pub struct MoveWindowInvariant;

impl Invariant<SlidingEngine> for MoveWindowInvariant {
    fn holds(engine: &SlidingEngine) -> bool {
        [Player::X, Player::O]
            .into_iter()
            .all(|p| engine.history(p).len() <= WINDOW)
    }

    fn description() -> &'static str {
        "Each player has at most three pieces on the board"
    }
}

/// Invariant: the move histories and the board describe the same pieces.
///
/// Every history entry is a square held by that player, and each player's
/// square count equals their history length.
pub struct HistoryMatchesBoardInvariant;

impl Invariant<SlidingEngine> for HistoryMatchesBoardInvariant {
    fn holds(engine: &SlidingEngine) -> bool {
        let board = engine.board();
        [Player::X, Player::O].into_iter().all(|player| {
            let history = engine.history(player);
            history
                .iter()
                .all(|pos| board.get(*pos) == Square::Occupied(player))
                && board.count(player) == history.len()
        })
    }

    fn description() -> &'static str {
        "Move histories match the pieces on the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_stays_bounded() {
        let mut engine = SlidingEngine::new();
        for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 1), (2, 2)] {
            engine.place(row, col, Player::O).unwrap();
            assert!(MoveWindowInvariant::holds(&engine));
        }
        assert_eq!(engine.history(Player::O).len(), WINDOW);
    }

    #[test]
    fn test_history_tracks_board() {
        let mut engine = SlidingEngine::new();
        engine.place(0, 0, Player::X).unwrap();
        engine.place(1, 1, Player::O).unwrap();
        assert!(HistoryMatchesBoardInvariant::holds(&engine));
    }
}
