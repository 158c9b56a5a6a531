//! Ultimate invariants over the meta board.

use super::super::rules::classify_sub_board;
use super::super::{Position, UltimateEngine};
use super::Invariant;

/// Invariant: the active constraint, when set, names an open sub-board.
pub struct ActiveBoardOpenInvariant;

impl Invariant<UltimateEngine> for ActiveBoardOpenInvariant {
    fn holds(engine: &UltimateEngine) -> bool {
        engine
            .active()
            .is_none_or(|board| engine.meta().outcome(board).is_open())
    }

    fn description() -> &'static str {
        "Active sub-board is open"
    }
}

/// Invariant: every recorded sub-board outcome matches its cells.
pub struct SubOutcomesConsistentInvariant;

impl Invariant<UltimateEngine> for SubOutcomesConsistentInvariant {
    fn holds(engine: &UltimateEngine) -> bool {
        let meta = engine.meta();
        Position::ALL
            .into_iter()
            .all(|pos| meta.outcome(pos) == classify_sub_board(meta.board(pos)))
    }

    fn description() -> &'static str {
        "Sub-board outcomes match their cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Player;

    #[test]
    fn test_active_board_open_after_move() {
        let mut engine = UltimateEngine::new();
        engine.place(0, 0, 2, 1, Player::X).unwrap();
        assert_eq!(engine.active(), Some(Position::BottomCenter));
        assert!(ActiveBoardOpenInvariant::holds(&engine));
    }

    #[test]
    fn test_outcomes_consistent_on_fresh_board() {
        assert!(SubOutcomesConsistentInvariant::holds(&UltimateEngine::new()));
    }
}
