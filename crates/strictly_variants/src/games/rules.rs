//! Game rules shared by every variant.
//!
//! This module contains pure functions for evaluating board state. Rules are
//! separated from board storage so each engine (and each bot simulation) can
//! run them over its own grids.

pub mod draw;
pub mod win;

pub use draw::{classify_sub_board, is_full};
pub use win::{LINES, Line, detect, find_line};
