//! Sliding-window tic-tac-toe: each player keeps only their latest three pieces.
//!
//! Placing a fourth piece evicts that player's oldest one. The eviction
//! happens before the line check, so an expiring piece never counts toward a
//! win. Wins report the full three-cell run.

use super::action::{GameError, MoveIntent};
use super::classic::ClassicEngine;
use super::contracts::{Contract, SlidingMoveContract};
use super::engine::Engine;
use super::position::Position;
use super::rules;
use super::types::{Board, GameResult, Player, Square};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Pieces each player may keep on the board.
pub const WINDOW: usize = 3;

/// Sliding-window rules engine.
#[derive(Debug, Clone, Default)]
pub struct SlidingEngine {
    board: Board,
    x_history: VecDeque<Position>,
    o_history: VecDeque<Position>,
    result: GameResult,
}

impl SlidingEngine {
    /// Creates an engine with an empty board and empty histories.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Placement order of `player`'s pieces still on the board, oldest first.
    pub fn history(&self, player: Player) -> &VecDeque<Position> {
        match player {
            Player::X => &self.x_history,
            Player::O => &self.o_history,
        }
    }

    fn history_mut(&mut self, player: Player) -> &mut VecDeque<Position> {
        match player {
            Player::X => &mut self.x_history,
            Player::O => &mut self.o_history,
        }
    }

    /// The piece `player`'s next placement will remove, if the window is full.
    pub fn expiring(&self, player: Player) -> Option<Position> {
        let history = self.history(player);
        if history.len() == WINDOW {
            history.front().copied()
        } else {
            None
        }
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

    /// Runs the detector over the current board.
    ///
    /// A full board only counts as a draw when neither player can free a cell
    /// through their own next eviction.
    fn evaluate(&self) -> GameResult {
        if let Some((player, line)) = rules::find_line(&self.board.values()) {
            return GameResult::Win(player, line.run(3));
        }

        let windows_full = self.x_history.len() == WINDOW && self.o_history.len() == WINDOW;
        if rules::is_full(&self.board) && windows_full {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }
}

impl Engine for SlidingEngine {
    type Move = Position;

    fn decode(intent: MoveIntent) -> Result<Position, GameError> {
        ClassicEngine::decode(intent)
    }

    #[instrument(skip(self), fields(position = %pos, player = %player))]
    fn apply_move(&mut self, pos: Position, player: Player) -> Result<GameResult, GameError> {
        SlidingMoveContract::pre(self, &pos)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.set(pos, Square::Occupied(player));
        let history = self.history_mut(player);
        history.push_back(pos);
        let evicted = if history.len() > WINDOW {
            history.pop_front()
        } else {
            None
        };
        if let Some(old) = evicted {
            self.board.set(old, Square::Empty);
            debug!(evicted = %old, "Oldest piece expired");
        }

        self.result = self.evaluate();
        debug!(result = %self.result, "Sliding move applied");

        #[cfg(debug_assertions)]
        SlidingMoveContract::post(&before, self)?;

        Ok(self.result.clone())
    }

    fn result(&self) -> &GameResult {
        &self.result
    }

    #[instrument(skip(self))]
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourth_piece_evicts_oldest() {
        let mut engine = SlidingEngine::new();
        engine.place(0, 0, Player::X).unwrap();
        engine.place(2, 2, Player::O).unwrap();
        engine.place(0, 1, Player::X).unwrap();
        engine.place(2, 0, Player::O).unwrap();
        engine.place(1, 0, Player::X).unwrap();
        engine.place(1, 2, Player::O).unwrap();

        assert_eq!(engine.expiring(Player::X), Some(Position::TopLeft));
        engine.place(2, 1, Player::X).unwrap();

        assert!(engine.board().is_empty(Position::TopLeft));
        assert_eq!(engine.history(Player::X).len(), WINDOW);
        assert_eq!(engine.expiring(Player::X), Some(Position::TopCenter));
    }

    #[test]
    fn test_no_expiry_before_window_fills() {
        let mut engine = SlidingEngine::new();
        engine.place(0, 0, Player::X).unwrap();
        engine.place(1, 1, Player::X).unwrap();
        assert_eq!(engine.expiring(Player::X), None);
    }

    #[test]
    fn test_win_reports_full_run() {
        let mut engine = SlidingEngine::new();
        engine.place(1, 0, Player::O).unwrap();
        engine.place(1, 1, Player::O).unwrap();
        let result = engine.place(1, 2, Player::O).unwrap();
        match result {
            GameResult::Win(Player::O, line) => assert_eq!(line.cells().len(), 3),
            other => panic!("Expected O to win, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_clears_histories() {
        let mut engine = SlidingEngine::new();
        engine.place(0, 0, Player::X).unwrap();
        engine.reset();
        assert!(engine.history(Player::X).is_empty());
        assert_eq!(engine.board(), &Board::new());
    }
}
