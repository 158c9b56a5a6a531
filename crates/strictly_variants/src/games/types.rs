//! Core domain types shared by every variant.

use super::position::Position;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Signed marker value used by line sums: `X = +1`, `O = -1`.
    pub fn value(self) -> i8 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Maps a line sum of `±n` back to the player that owns it.
    pub fn from_line_sum(sum: i32, n: i32) -> Option<Self> {
        if n > 0 && sum == n {
            Some(Player::X)
        } else if n > 0 && sum == -n {
            Some(Player::O)
        } else {
            None
        }
    }
}

/// A square on a 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Signed value of the square (`0` when empty).
    pub fn value(self) -> i8 {
        match self {
            Square::Empty => 0,
            Square::Occupied(player) => player.value(),
        }
    }

    /// Character used when rendering boards.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Player::X) => 'X',
            Square::Occupied(Player::O) => 'O',
        }
    }
}

/// A generic `(row, col)` coordinate on an N×N grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<Position> for Coord {
    fn from(pos: Position) -> Self {
        Coord::new(pos.row(), pos.col())
    }
}

/// 3x3 board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Signed marker grid for the line-win detector.
    pub fn values(&self) -> [[i8; 3]; 3] {
        let mut grid = [[0; 3]; 3];
        for pos in Position::ALL {
            grid[pos.row()][pos.col()] = self.get(pos).value();
        }
        grid
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Renders the board as three rows of symbols, `.` for empty squares.
    pub fn display(&self) -> String {
        Position::ALL
            .chunks(3)
            .map(|row| row.iter().map(|pos| self.get(*pos).symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered cells of a completed line.
///
/// Holds the two endpoints for Classic, Gravity and the Ultimate meta-board,
/// and the full three-cell run for Sliding-Window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine(Vec<Coord>);

impl WinningLine {
    /// Creates a line from its ordered cells.
    pub fn new(cells: Vec<Coord>) -> Self {
        Self(cells)
    }

    /// Returns the cells in order.
    pub fn cells(&self) -> &[Coord] {
        &self.0
    }
}

/// Outcome of the game as seen by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Game is ongoing.
    #[default]
    InProgress,
    /// Game ended in a win along the given line.
    Win(Player, WinningLine),
    /// Game ended in a draw.
    Draw,
}

impl GameResult {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win(player, _) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "In progress"),
            GameResult::Win(player, _) => write!(f, "Player {} wins", player),
            GameResult::Draw => write!(f, "Tie"),
        }
    }
}

/// Summary of one Ultimate sub-board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubOutcome {
    /// Still playable.
    #[default]
    Open,
    /// Three in a row for the player.
    WonBy(Player),
    /// Full with no line.
    Drawn,
}

impl SubOutcome {
    /// Signed value on the meta grid; drawn boards count as empty.
    pub fn value(self) -> i8 {
        match self {
            SubOutcome::WonBy(player) => player.value(),
            SubOutcome::Open | SubOutcome::Drawn => 0,
        }
    }

    /// Returns true for `Open`.
    pub fn is_open(self) -> bool {
        self == SubOutcome::Open
    }
}

/// Phase of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Accepting move intents from the player to move.
    Playing,
    /// A Gravity piece is falling; no moves until it lands.
    AnimatingMove,
    /// The bot delay is counting down.
    WaitingForBot,
    /// Won or drawn; only `reset` leaves this phase.
    GameOver,
}

/// Win counters kept for the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Score {
    /// Wins by X.
    x_wins: u32,
    /// Wins by O.
    o_wins: u32,
}

impl Score {
    /// Credits a win to `player`.
    pub fn record(&mut self, player: Player) {
        match player {
            Player::X => self.x_wins += 1,
            Player::O => self.o_wins += 1,
        }
    }

    /// Wins recorded for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }
}
