//! Rule engines for the four tic-tac-toe variants.

mod action;
mod classic;
mod contracts;
mod engine;
mod gravity;
mod position;
mod sliding;
mod types;
mod ultimate;

pub mod invariants;
pub mod rules;

pub use action::{GameError, MoveIntent, MoveRejection};
pub use classic::ClassicEngine;
pub use contracts::{
    ClassicMoveContract, ColumnAvailable, Contract, GravityDropContract, SinglePlacement,
    SlidingMoveContract, SquareIsEmpty, SubBoardPlayable, UltimateMoveContract,
};
pub use engine::{BoardView, Engine, Tally, Variant, VariantEngine};
pub use gravity::{DEFAULT_DROP_SPEED, DropState, GravityEngine, landing_row};
pub use position::Position;
pub use sliding::{SlidingEngine, WINDOW};
pub use types::{Board, Coord, GameResult, Phase, Player, Score, Square, SubOutcome, WinningLine};
pub use ultimate::{MetaBoard, UltimateEngine, UltimateMove};
