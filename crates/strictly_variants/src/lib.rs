//! Strictly Variants - rule engines for four tic-tac-toe variants
//!
//! Classic, Sliding-Window, Gravity and Ultimate rules behind one
//! tick-driven session, with heuristic bots for every variant.
//!
//! # Architecture
//!
//! - **Games**: one engine per variant, a shared line-win detector, and
//!   contracts that check every move
//! - **Bot**: win, block, then positional or random play
//! - **Session**: turn order, score, drop animation and bot delay
//! - **Config**: TOML session settings
//!
//! # Example
//!
//! ```
//! use strictly_variants::{GameSession, MoveIntent, Phase, Player, Variant};
//!
//! let mut session = GameSession::new(Variant::Classic, false);
//! session.apply_move(MoveIntent::Cell { row: 1, col: 1 }, Player::X)?;
//! assert_eq!(session.current_player(), Player::O);
//! assert_eq!(session.phase(), Phase::Playing);
//! # Ok::<(), strictly_variants::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bot;
mod config;
mod selfplay;
mod session;

pub mod games;

// Crate-level exports - Bots
pub use bot::Bot;

// Crate-level exports - Configuration
pub use config::{ConfigError, SessionConfig};

// Crate-level exports - Self-play
pub use selfplay::{
    FRAME, MAX_FRAMES_PER_GAME, MAX_MOVES_PER_GAME, MatchError, MatchSummary, run_match,
};

// Crate-level exports - Session
pub use session::GameSession;

// Crate-level exports - Game types
pub use games::{
    Board, BoardView, Coord, DropState, Engine, GameError, GameResult, MetaBoard, MoveIntent,
    MoveRejection, Phase, Player, Position, Score, Square, SubOutcome, Variant, VariantEngine,
    WinningLine,
};
