//! Ultimate tic-tac-toe: a 3x3 grid of 3x3 sub-boards.
//!
//! The cell a player picks inside a sub-board names the sub-board the
//! opponent must play in next. A decided target frees the opponent to play
//! in any open sub-board. Sub-board outcomes feed the meta grid, which is
//! scanned with the same line detector as the flat variants.

use super::action::{GameError, MoveIntent, MoveRejection};
use super::contracts::{Contract, UltimateMoveContract};
use super::engine::{Engine, Tally};
use super::position::Position;
use super::rules;
use super::types::{Board, GameResult, Player, Square, SubOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Nine sub-boards and their outcomes, both indexed by [`Position`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBoard {
    boards: [Board; 9],
    outcomes: [SubOutcome; 9],
}

impl MetaBoard {
    /// Creates nine empty, open sub-boards.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sub-board at `pos`.
    pub fn board(&self, pos: Position) -> &Board {
        &self.boards[pos.to_index()]
    }

    /// Outcome of the sub-board at `pos`.
    pub fn outcome(&self, pos: Position) -> SubOutcome {
        self.outcomes[pos.to_index()]
    }

    /// Outcomes in row-major order.
    pub fn outcomes(&self) -> &[SubOutcome; 9] {
        &self.outcomes
    }

    /// Signed outcome grid for the line detector.
    pub fn outcome_values(&self) -> [[i8; 3]; 3] {
        let mut grid = [[0; 3]; 3];
        for pos in Position::ALL {
            grid[pos.row()][pos.col()] = self.outcome(pos).value();
        }
        grid
    }

    /// Sub-boards that still accept moves.
    pub fn open_boards(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|pos| self.outcome(*pos).is_open())
            .collect()
    }

    /// Returns true once every sub-board is won or drawn.
    pub fn all_decided(&self) -> bool {
        self.outcomes.iter().all(|o| !o.is_open())
    }

    fn set(&mut self, board: Position, cell: Position, square: Square) {
        self.boards[board.to_index()].set(cell, square);
    }

    fn reclassify(&mut self, board: Position) -> SubOutcome {
        let outcome = rules::classify_sub_board(self.board(board));
        self.outcomes[board.to_index()] = outcome;
        outcome
    }

    /// Renders the 9x9 grid with sub-boards separated by rules.
    pub fn display(&self) -> String {
        let mut lines = Vec::with_capacity(11);
        for (band, boards) in Position::ALL.chunks(3).enumerate() {
            if band > 0 {
                lines.push("---+---+---".to_string());
            }
            for cells in Position::ALL.chunks(3) {
                let line = boards
                    .iter()
                    .map(|board| {
                        cells
                            .iter()
                            .map(|cell| self.board(*board).get(*cell).symbol())
                            .collect::<String>()
                    })
                    .collect::<Vec<_>>()
                    .join("|");
                lines.push(line);
            }
        }
        lines.join("\n")
    }
}

impl Tally for MetaBoard {
    fn marker_count(&self, player: Player) -> usize {
        self.boards.iter().map(|b| b.count(player)).sum()
    }
}

/// A validated Ultimate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UltimateMove {
    /// Sub-board being played.
    pub board: Position,
    /// Cell inside that sub-board.
    pub cell: Position,
}

/// Ultimate rules engine.
#[derive(Debug, Clone, Default)]
pub struct UltimateEngine {
    meta: MetaBoard,
    active: Option<Position>,
    result: GameResult,
}

impl UltimateEngine {
    /// Creates an engine with nine open sub-boards and no constraint.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the meta board.
    pub fn meta(&self) -> &MetaBoard {
        &self.meta
    }

    /// Sub-board the next move must target, if constrained.
    pub fn active(&self) -> Option<Position> {
        self.active
    }

    /// Sub-boards the next move may target.
    pub fn playable_boards(&self) -> Vec<Position> {
        match self.active {
            Some(board) => vec![board],
            None => self.meta.open_boards(),
        }
    }

    /// Places `player` at raw meta coordinates.
    #[instrument(skip(self))]
    pub fn place(
        &mut self,
        big_row: usize,
        big_col: usize,
        small_row: usize,
        small_col: usize,
        player: Player,
    ) -> Result<GameResult, GameError> {
        let mv = Self::decode(MoveIntent::Meta {
            big_row,
            big_col,
            small_row,
            small_col,
        })?;
        self.apply_move(mv, player)
    }

    fn evaluate(&self) -> GameResult {
        if let Some((player, line)) = rules::find_line(&self.meta.outcome_values()) {
            GameResult::Win(player, line.endpoints(3))
        } else if self.meta.all_decided() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }
}

impl Engine for UltimateEngine {
    type Move = UltimateMove;

    fn decode(intent: MoveIntent) -> Result<UltimateMove, GameError> {
        match intent {
            MoveIntent::Meta {
                big_row,
                big_col,
                small_row,
                small_col,
            } => {
                let board = Position::from_row_col(big_row, big_col)
                    .ok_or(MoveRejection::OutOfRange)?;
                let cell = Position::from_row_col(small_row, small_col)
                    .ok_or(MoveRejection::OutOfRange)?;
                Ok(UltimateMove { board, cell })
            }
            _ => Err(GameError::InvalidMove(MoveRejection::WrongShape)),
        }
    }

    #[instrument(skip(self), fields(board = %mv.board, cell = %mv.cell, player = %player))]
    fn apply_move(&mut self, mv: UltimateMove, player: Player) -> Result<GameResult, GameError> {
        UltimateMoveContract::pre(self, &mv)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.meta.set(mv.board, mv.cell, Square::Occupied(player));
        let outcome = self.meta.reclassify(mv.board);
        if !outcome.is_open() {
            debug!(board = %mv.board, ?outcome, "Sub-board decided");
        }

        self.active = if self.meta.outcome(mv.cell).is_open() {
            Some(mv.cell)
        } else {
            None
        };
        self.result = self.evaluate();
        debug!(active = ?self.active, result = %self.result, "Ultimate move applied");

        #[cfg(debug_assertions)]
        UltimateMoveContract::post(&before, self)?;

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
