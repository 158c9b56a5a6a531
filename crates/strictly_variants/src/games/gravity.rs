//! Gravity tic-tac-toe: pick a column, the piece falls to its lowest open row.
//!
//! A drop is animated. `request_drop` only starts the fall; the caller drives
//! `tick` once per frame and the piece is committed when its offset reaches
//! the target row. Exactly one drop may be in flight.

use super::action::{GameError, MoveIntent, MoveRejection};
use super::contracts::{Contract, GravityDropContract};
use super::engine::Engine;
use super::position::Position;
use super::rules;
use super::types::{Board, GameResult, Player, Square};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default fall speed in rows per second.
pub const DEFAULT_DROP_SPEED: f32 = 6.0;

/// A piece mid-fall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropState {
    /// Column the piece falls through.
    pub column: usize,
    /// Row it will land on.
    pub target_row: usize,
    /// Distance fallen, in rows from the top.
    pub offset: f32,
    /// Owner of the piece.
    pub player: Player,
}

impl DropState {
    /// Cell the piece will occupy once it lands.
    pub fn landing(&self) -> Option<Position> {
        Position::from_row_col(self.target_row, self.column)
    }
}

/// Gravity rules engine.
#[derive(Debug, Clone)]
pub struct GravityEngine {
    board: Board,
    drop: Option<DropState>,
    drop_speed: f32,
    result: GameResult,
}

impl Default for GravityEngine {
    fn default() -> Self {
        Self::with_speed(DEFAULT_DROP_SPEED)
    }
}

impl GravityEngine {
    /// Creates an engine with the default fall speed.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose pieces fall `drop_speed` rows per second.
    ///
    /// Speeds that are not positive and finite fall back to
    /// [`DEFAULT_DROP_SPEED`].
    #[instrument]
    pub fn with_speed(drop_speed: f32) -> Self {
        let drop_speed = if drop_speed.is_finite() && drop_speed > 0.0 {
            drop_speed
        } else {
            warn!(drop_speed, fallback = DEFAULT_DROP_SPEED, "Unusable drop speed");
            DEFAULT_DROP_SPEED
        };
        Self {
            board: Board::new(),
            drop: None,
            drop_speed,
            result: GameResult::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece currently falling, if any.
    pub fn pending(&self) -> Option<DropState> {
        self.drop
    }

    /// Lowest empty row of `column`, or `None` if the column is full or out of range.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        landing_row(&self.board, column)
    }

    /// Starts dropping `player`'s piece into `column`.
    #[instrument(skip(self))]
    pub fn request_drop(&mut self, column: usize, player: Player) -> Result<DropState, GameError> {
        GravityDropContract::pre(self, &column)?;

        let target_row = self
            .landing_row(column)
            .ok_or(GameError::ColumnFull(column))?;
        let state = DropState {
            column,
            target_row,
            offset: 0.0,
            player,
        };
        self.drop = Some(state);
        debug!(column, target_row, "Drop started");
        Ok(state)
    }

    /// Advances the falling piece by `delta`.
    ///
    /// Returns the new result when the piece lands on this tick, `None`
    /// otherwise (including when nothing is falling).
    #[instrument(skip(self))]
    pub fn tick(&mut self, delta: Duration) -> Result<Option<GameResult>, GameError> {
        let Some(mut state) = self.drop else {
            return Ok(None);
        };

        let target = state.target_row as f32;
        state.offset = (state.offset + self.drop_speed * delta.as_secs_f32()).min(target);
        if state.offset < target {
            self.drop = Some(state);
            return Ok(None);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let landing = state.landing().ok_or(MoveRejection::OutOfRange)?;
        self.board.set(landing, Square::Occupied(state.player));
        self.drop = None;
        self.result = rules::detect(&self.board.values());
        debug!(position = %landing, result = %self.result, "Piece landed");

        #[cfg(debug_assertions)]
        GravityDropContract::post(&before, self)?;

        Ok(Some(self.result.clone()))
    }
}

/// Lowest empty row of `column` on `board`.
pub fn landing_row(board: &Board, column: usize) -> Option<usize> {
    (0..3)
        .rev()
        .filter_map(|row| Position::from_row_col(row, column))
        .find(|pos| board.is_empty(*pos))
        .map(Position::row)
}

impl Engine for GravityEngine {
    type Move = usize;

    fn decode(intent: MoveIntent) -> Result<usize, GameError> {
        match intent {
            MoveIntent::Column(column) => Ok(column),
            _ => Err(GameError::InvalidMove(MoveRejection::WrongShape)),
        }
    }

    /// Starts a drop; the result stays unchanged until the piece lands.
    fn apply_move(&mut self, column: usize, player: Player) -> Result<GameResult, GameError> {
        self.request_drop(column, player)?;
        Ok(self.result.clone())
    }

    fn result(&self) -> &GameResult {
        &self.result
    }

    #[instrument(skip(self))]
    fn reset(&mut self) {
        self.board = Board::new();
        self.drop = None;
        self.result = GameResult::InProgress;
    }
}
