//! The capability set every variant engine provides, and the tagged union the
//! session selects at construction time.

use super::action::{GameError, MoveIntent};
use super::classic::ClassicEngine;
use super::gravity::{DropState, GravityEngine};
use super::position::Position;
use super::sliding::SlidingEngine;
use super::types::{Board, GameResult, Player};
use super::ultimate::{MetaBoard, UltimateEngine};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A rule state machine for one variant.
///
/// Engines validate and apply moves and report the line-win outcome of their
/// current board. They do not track whose turn it is or stop accepting moves
/// after a win; the session owns turn order and the game-over phase.
pub trait Engine {
    /// Validated move shape for this variant.
    type Move: Copy + std::fmt::Debug;

    /// Converts a raw caller intent into this variant's move shape.
    fn decode(intent: MoveIntent) -> Result<Self::Move, GameError>;

    /// Validates and applies a move for `player`, returning the new result.
    fn apply_move(&mut self, mv: Self::Move, player: Player) -> Result<GameResult, GameError>;

    /// Current outcome of the board.
    fn result(&self) -> &GameResult;

    /// Clears all board-shaped state.
    fn reset(&mut self);
}

/// Counts the markers a player has on the board(s).
pub trait Tally {
    /// Number of cells held by `player`.
    fn marker_count(&self, player: Player) -> usize;
}

impl Tally for Board {
    fn marker_count(&self, player: Player) -> usize {
        self.count(player)
    }
}

/// One of the four rule sets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Variant {
    /// Single-shot 3x3 board.
    #[default]
    Classic,
    /// Each player keeps only their latest three pieces.
    #[strum(to_string = "sliding_window", serialize = "three_moves")]
    #[serde(alias = "three_moves")]
    SlidingWindow,
    /// Pieces drop to the lowest open row of a column.
    #[strum(to_string = "gravity", serialize = "tetris")]
    #[serde(alias = "tetris")]
    Gravity,
    /// Nine sub-boards feeding a meta board.
    Ultimate,
}

impl Variant {
    /// Short rules description.
    pub fn description(self) -> &'static str {
        match self {
            Variant::Classic => "Three in a row on a 3x3 board",
            Variant::SlidingWindow => "Only your last three pieces stay on the board",
            Variant::Gravity => "Pieces fall to the bottom of the chosen column",
            Variant::Ultimate => "Win three sub-boards in a row; your cell picks the next board",
        }
    }
}

/// The engine for whichever variant the session was built with.
#[derive(Debug, Clone)]
pub enum VariantEngine {
    /// Classic rules.
    Classic(ClassicEngine),
    /// Sliding-window rules.
    SlidingWindow(SlidingEngine),
    /// Gravity rules.
    Gravity(GravityEngine),
    /// Ultimate rules.
    Ultimate(UltimateEngine),
}

/// Read-only snapshot of the board state for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardView {
    /// A single 3x3 board.
    Flat(Board),
    /// The Ultimate meta board.
    Meta(MetaBoard),
}

impl BoardView {
    /// Renders the snapshot as plain text.
    pub fn display(&self) -> String {
        match self {
            BoardView::Flat(board) => board.display(),
            BoardView::Meta(meta) => meta.display(),
        }
    }
}

impl VariantEngine {
    /// Builds a fresh engine for `variant`.
    #[instrument]
    pub fn new(variant: Variant, drop_speed: f32) -> Self {
        match variant {
            Variant::Classic => VariantEngine::Classic(ClassicEngine::new()),
            Variant::SlidingWindow => VariantEngine::SlidingWindow(SlidingEngine::new()),
            Variant::Gravity => VariantEngine::Gravity(GravityEngine::with_speed(drop_speed)),
            Variant::Ultimate => VariantEngine::Ultimate(UltimateEngine::new()),
        }
    }

    /// Variant of this engine.
    pub fn variant(&self) -> Variant {
        match self {
            VariantEngine::Classic(_) => Variant::Classic,
            VariantEngine::SlidingWindow(_) => Variant::SlidingWindow,
            VariantEngine::Gravity(_) => Variant::Gravity,
            VariantEngine::Ultimate(_) => Variant::Ultimate,
        }
    }

    /// Decodes and applies a raw intent.
    #[instrument(skip(self), fields(variant = %self.variant()))]
    pub fn apply_move(
        &mut self,
        intent: MoveIntent,
        player: Player,
    ) -> Result<GameResult, GameError> {
        match self {
            VariantEngine::Classic(e) => e.apply_move(ClassicEngine::decode(intent)?, player),
            VariantEngine::SlidingWindow(e) => {
                e.apply_move(SlidingEngine::decode(intent)?, player)
            }
            VariantEngine::Gravity(e) => e.apply_move(GravityEngine::decode(intent)?, player),
            VariantEngine::Ultimate(e) => e.apply_move(UltimateEngine::decode(intent)?, player),
        }
    }

    /// Current outcome of the board.
    pub fn result(&self) -> &GameResult {
        match self {
            VariantEngine::Classic(e) => e.result(),
            VariantEngine::SlidingWindow(e) => e.result(),
            VariantEngine::Gravity(e) => e.result(),
            VariantEngine::Ultimate(e) => e.result(),
        }
    }

    /// Clears all board-shaped state, including any in-flight drop.
    pub fn reset(&mut self) {
        match self {
            VariantEngine::Classic(e) => e.reset(),
            VariantEngine::SlidingWindow(e) => e.reset(),
            VariantEngine::Gravity(e) => e.reset(),
            VariantEngine::Ultimate(e) => e.reset(),
        }
    }

    /// Snapshot of the board(s).
    pub fn board_view(&self) -> BoardView {
        match self {
            VariantEngine::Classic(e) => BoardView::Flat(e.board().clone()),
            VariantEngine::SlidingWindow(e) => BoardView::Flat(e.board().clone()),
            VariantEngine::Gravity(e) => BoardView::Flat(e.board().clone()),
            VariantEngine::Ultimate(e) => BoardView::Meta(e.meta().clone()),
        }
    }

    /// Sub-board the next move must target (Ultimate only).
    pub fn active_constraint(&self) -> Option<Position> {
        match self {
            VariantEngine::Ultimate(e) => e.active(),
            _ => None,
        }
    }

    /// The falling piece, if any (Gravity only).
    pub fn pending_animation(&self) -> Option<DropState> {
        match self {
            VariantEngine::Gravity(e) => e.pending(),
            _ => None,
        }
    }
}

impl Tally for VariantEngine {
    fn marker_count(&self, player: Player) -> usize {
        match self {
            VariantEngine::Classic(e) => e.board().count(player),
            VariantEngine::SlidingWindow(e) => e.board().count(player),
            VariantEngine::Gravity(e) => e.board().count(player),
            VariantEngine::Ultimate(e) => e.meta().marker_count(player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_variant_names_parse() {
        assert_eq!(Variant::from_str("classic"), Ok(Variant::Classic));
        assert_eq!(Variant::from_str("three_moves"), Ok(Variant::SlidingWindow));
        assert_eq!(Variant::from_str("tetris"), Ok(Variant::Gravity));
        assert_eq!(Variant::Ultimate.to_string(), "ultimate");
    }

    #[test]
    fn test_engine_matches_variant() {
        for variant in Variant::iter() {
            assert_eq!(VariantEngine::new(variant, 6.0).variant(), variant);
        }
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let mut engine = VariantEngine::new(Variant::Gravity, 6.0);
        let err = engine
            .apply_move(MoveIntent::Cell { row: 0, col: 0 }, Player::X)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(_)));
    }

    #[test]
    fn test_meta_view_renders_nine_by_nine() {
        let mut engine = VariantEngine::new(Variant::Ultimate, 6.0);
        engine
            .apply_move(
                MoveIntent::Meta {
                    big_row: 0,
                    big_col: 2,
                    small_row: 1,
                    small_col: 1,
                },
                Player::X,
            )
            .unwrap();
        let text = engine.board_view().display();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "...|...|.X.");
        assert_eq!(lines[3], "---+---+---");
    }
}
