//! Classic tic-tac-toe: one 3x3 board, terminal on the first line or a full board.

use super::action::{GameError, MoveIntent, MoveRejection};
use super::contracts::{ClassicMoveContract, Contract};
use super::engine::Engine;
use super::position::Position;
use super::rules;
use super::types::{Board, GameResult, Player, Square};
use tracing::{debug, instrument};

/// Classic rules engine.
#[derive(Debug, Clone, Default)]
pub struct ClassicEngine {
    board: Board,
    result: GameResult,
}

impl ClassicEngine {
    /// Creates an engine with an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Places `player` at raw `(row, col)` coordinates.
    #[instrument(skip(self))]
    pub fn place(
        &mut self,
        row: usize,
        col: usize,
        player: Player,
    ) -> Result<GameResult, GameError> {
        let pos = Self::decode(MoveIntent::Cell { row, col })?;
        self.apply_move(pos, player)
    }
}

impl Engine for ClassicEngine {
    type Move = Position;

    fn decode(intent: MoveIntent) -> Result<Position, GameError> {
        match intent {
            MoveIntent::Cell { row, col } => Position::from_row_col(row, col)
                .ok_or(GameError::InvalidMove(MoveRejection::OutOfRange)),
            _ => Err(GameError::InvalidMove(MoveRejection::WrongShape)),
        }
    }

    #[instrument(skip(self), fields(position = %pos, player = %player))]
    fn apply_move(&mut self, pos: Position, player: Player) -> Result<GameResult, GameError> {
        ClassicMoveContract::pre(self, &pos)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.set(pos, Square::Occupied(player));
        self.result = rules::detect(&self.board.values());
        debug!(result = %self.result, "Classic move applied");

        #[cfg(debug_assertions)]
        ClassicMoveContract::post(&before, self)?;

        Ok(self.result.clone())
    }

    fn result(&self) -> &GameResult {
        &self.result
    }

    #[instrument(skip(self))]
    fn reset(&mut self) {
        self.board = Board::new();
        self.result = GameResult::InProgress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Coord, WinningLine};

    #[test]
    fn test_occupied_square_rejected() {
        let mut engine = ClassicEngine::new();
        engine.place(1, 1, Player::X).unwrap();
        let err = engine.place(1, 1, Player::O).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidMove(MoveRejection::Occupied(Position::Center))
        );
        assert_eq!(engine.board().get(Position::Center), Square::Occupied(Player::X));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut engine = ClassicEngine::new();
        assert_eq!(
            engine.place(3, 0, Player::X),
            Err(GameError::InvalidMove(MoveRejection::OutOfRange))
        );
        assert_eq!(engine.board(), &Board::new());
    }

    #[test]
    fn test_column_win_reports_endpoints() {
        let mut engine = ClassicEngine::new();
        engine.place(0, 2, Player::X).unwrap();
        engine.place(0, 0, Player::O).unwrap();
        engine.place(1, 2, Player::X).unwrap();
        engine.place(1, 0, Player::O).unwrap();
        let result = engine.place(2, 2, Player::X).unwrap();
        assert_eq!(
            result,
            GameResult::Win(
                Player::X,
                WinningLine::new(vec![Coord::new(0, 2), Coord::new(2, 2)])
            )
        );
    }

    #[test]
    fn test_reset_clears_board() {
        let mut engine = ClassicEngine::new();
        engine.place(0, 0, Player::X).unwrap();
        engine.reset();
        assert_eq!(engine.board(), &Board::new());
        assert_eq!(engine.result(), &GameResult::InProgress);
    }
}
