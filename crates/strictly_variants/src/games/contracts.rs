//! Contract-based validation for the variant engines.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, move)} apply {Q(before, after)}`. Preconditions always run and
//! reject illegal moves before anything changes. Postconditions run in debug
//! builds only.

use super::action::{GameError, MoveRejection};
use super::classic::ClassicEngine;
use super::gravity::GravityEngine;
use super::invariants::{
    Invariant, InvariantSet, InvariantViolation, SettledPiecesInvariant, SlidingInvariants,
    UltimateInvariants,
};
use super::position::Position;
use super::sliding::SlidingEngine;
use super::types::{Board, Phase, Square};
use super::ultimate::{UltimateEngine, UltimateMove};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

fn violation(violations: &[InvariantViolation]) -> GameError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    warn!(%descriptions, "Postcondition failed");
    GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the target square must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects a placement onto an occupied square.
    pub fn check(board: &Board, pos: Position) -> Result<(), GameError> {
        if board.is_empty(pos) {
            Ok(())
        } else {
            Err(MoveRejection::Occupied(pos).into())
        }
    }
}

/// Precondition: the targeted sub-board is open and satisfies the active constraint.
pub struct SubBoardPlayable;

impl SubBoardPlayable {
    /// Rejects decided sub-boards and moves outside the active one.
    #[instrument(skip(engine))]
    pub fn check(engine: &UltimateEngine, board: Position) -> Result<(), GameError> {
        if !engine.meta().outcome(board).is_open() {
            return Err(MoveRejection::SubBoardDecided(board).into());
        }
        match engine.active() {
            Some(expected) if expected != board => Err(MoveRejection::WrongSubBoard {
                expected,
                got: board,
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// Precondition: a drop may start in this column now.
pub struct ColumnAvailable;

impl ColumnAvailable {
    /// Rejects drops while one is in flight, outside the board, or into a full column.
    #[instrument(skip(engine))]
    pub fn check(engine: &GravityEngine, column: usize) -> Result<(), GameError> {
        if engine.pending().is_some() {
            return Err(GameError::SessionNotPlaying(Phase::AnimatingMove));
        }
        if column >= 3 {
            return Err(MoveRejection::OutOfRange.into());
        }
        if engine.landing_row(column).is_none() {
            return Err(GameError::ColumnFull(column));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition checks
// ─────────────────────────────────────────────────────────────

/// Transition property: exactly one empty square became occupied and nothing else changed.
pub struct SinglePlacement;

impl SinglePlacement {
    /// Compares two boards across one move.
    pub fn holds(before: &Board, after: &Board) -> bool {
        let mut placed = 0;
        for (old, new) in before.squares().iter().zip(after.squares()) {
            match (old, new) {
                (Square::Empty, Square::Occupied(_)) => placed += 1,
                (a, b) if a == b => {}
                _ => return false,
            }
        }
        placed == 1
    }

    fn description() -> &'static str {
        "Exactly one empty square was filled and no other square changed"
    }
}

// ─────────────────────────────────────────────────────────────
//  Engine Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for Classic placements.
///
/// Preconditions:
/// - Square must be empty
///
/// Postconditions:
/// - Exactly one square was filled
pub struct ClassicMoveContract;

impl Contract<ClassicEngine, Position> for ClassicMoveContract {
    fn pre(engine: &ClassicEngine, pos: &Position) -> Result<(), GameError> {
        SquareIsEmpty::check(engine.board(), *pos)
    }

    fn post(before: &ClassicEngine, after: &ClassicEngine) -> Result<(), GameError> {
        if SinglePlacement::holds(before.board(), after.board()) {
            Ok(())
        } else {
            Err(violation(&[InvariantViolation::new(
                SinglePlacement::description(),
            )]))
        }
    }
}

/// Contract for Sliding-Window placements.
///
/// Preconditions:
/// - Square must be empty
///
/// Postconditions:
/// - At most three pieces per player
/// - Histories match the board
pub struct SlidingMoveContract;

impl Contract<SlidingEngine, Position> for SlidingMoveContract {
    fn pre(engine: &SlidingEngine, pos: &Position) -> Result<(), GameError> {
        SquareIsEmpty::check(engine.board(), *pos)
    }

    fn post(_before: &SlidingEngine, after: &SlidingEngine) -> Result<(), GameError> {
        SlidingInvariants::check_all(after).map_err(|v| violation(&v))
    }
}

/// Contract for Gravity drops.
///
/// Preconditions:
/// - No drop in flight
/// - Column in range and not full
///
/// Postconditions (on landing):
/// - Exactly one square was filled
/// - No piece floats
/// - Nothing left in flight
pub struct GravityDropContract;

impl Contract<GravityEngine, usize> for GravityDropContract {
    fn pre(engine: &GravityEngine, column: &usize) -> Result<(), GameError> {
        ColumnAvailable::check(engine, *column)
    }

    fn post(before: &GravityEngine, after: &GravityEngine) -> Result<(), GameError> {
        let mut violations = Vec::new();
        if !SinglePlacement::holds(before.board(), after.board()) {
            violations.push(InvariantViolation::new(SinglePlacement::description()));
        }
        if !SettledPiecesInvariant::holds(after) {
            violations.push(InvariantViolation::new(
                SettledPiecesInvariant::description(),
            ));
        }
        if after.pending().is_some() {
            violations.push(InvariantViolation::new("No drop remains in flight"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violation(&violations))
        }
    }
}

/// Contract for Ultimate placements.
///
/// Preconditions:
/// - Sub-board open and matching the active constraint
/// - Cell empty
///
/// Postconditions:
/// - Active sub-board is open
/// - Outcomes match cells
/// - Decided sub-boards are untouched
pub struct UltimateMoveContract;

impl Contract<UltimateEngine, UltimateMove> for UltimateMoveContract {
    fn pre(engine: &UltimateEngine, mv: &UltimateMove) -> Result<(), GameError> {
        SubBoardPlayable::check(engine, mv.board)?;
        SquareIsEmpty::check(engine.meta().board(mv.board), mv.cell)
    }

    fn post(before: &UltimateEngine, after: &UltimateEngine) -> Result<(), GameError> {
        let mut violations = UltimateInvariants::check_all(after).err().unwrap_or_default();
        let decided_untouched = Position::ALL.into_iter().all(|pos| {
            before.meta().outcome(pos).is_open()
                || before.meta().board(pos) == after.meta().board(pos)
        });
        if !decided_untouched {
            violations.push(InvariantViolation::new("Decided sub-boards never change"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violation(&violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Player;

    #[test]
    fn test_precondition_empty_square() {
        let engine = ClassicEngine::new();
        assert!(ClassicMoveContract::pre(&engine, &Position::Center).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let mut engine = ClassicEngine::new();
        engine.place(1, 1, Player::X).unwrap();
        assert_eq!(
            ClassicMoveContract::pre(&engine, &Position::Center),
            Err(GameError::InvalidMove(MoveRejection::Occupied(Position::Center)))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = ClassicEngine::new();
        let mut after = before.clone();
        after.place(0, 0, Player::X).unwrap();
        assert!(ClassicMoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_no_op() {
        let engine = ClassicEngine::new();
        let err = ClassicMoveContract::post(&engine, &engine).unwrap_err();
        assert!(matches!(err, GameError::InvariantViolation(_)));
    }

    #[test]
    fn test_single_placement_detects_overwrite() {
        let mut before = Board::new();
        before.set(Position::TopLeft, Square::Occupied(Player::X));
        let mut after = before.clone();
        after.set(Position::TopLeft, Square::Occupied(Player::O));
        after.set(Position::Center, Square::Occupied(Player::X));
        assert!(!SinglePlacement::holds(&before, &after));
    }

    #[test]
    fn test_gravity_rejects_drop_in_flight() {
        let mut engine = GravityEngine::new();
        engine.request_drop(0, Player::X).unwrap();
        assert_eq!(
            GravityDropContract::pre(&engine, &1),
            Err(GameError::SessionNotPlaying(Phase::AnimatingMove))
        );
    }

    #[test]
    fn test_ultimate_constraint_checked_before_cell() {
        let mut engine = UltimateEngine::new();
        engine.place(0, 0, 0, 1, Player::X).unwrap();
        let mv = UltimateMove {
            board: Position::TopLeft,
            cell: Position::TopCenter,
        };
        assert_eq!(
            UltimateMoveContract::pre(&engine, &mv),
            Err(GameError::InvalidMove(MoveRejection::WrongSubBoard {
                expected: Position::TopCenter,
                got: Position::TopLeft,
            }))
        );
    }
}
