//! Line-win detection over signed marker grids.

use super::super::{Coord, GameResult, Player, Position, WinningLine};
use tracing::instrument;

/// The eight lines of a 3x3 board, in detection order.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A straight line across an N×N grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// Row `r`, left to right.
    Row(usize),
    /// Column `c`, top to bottom.
    Column(usize),
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Line {
    /// Every cell of the line on an `n`×`n` grid, in order.
    pub fn cells(self, n: usize) -> Vec<Coord> {
        (0..n)
            .map(|i| match self {
                Line::Row(r) => Coord::new(r, i),
                Line::Column(c) => Coord::new(i, c),
                Line::MainDiagonal => Coord::new(i, i),
                Line::AntiDiagonal => Coord::new(i, n - 1 - i),
            })
            .collect()
    }

    /// The full run as a winning line.
    pub fn run(self, n: usize) -> WinningLine {
        WinningLine::new(self.cells(n))
    }

    /// Only the two endpoints, as drawn by a strike-through.
    pub fn endpoints(self, n: usize) -> WinningLine {
        let cells = self.cells(n);
        match (cells.first(), cells.last()) {
            (Some(start), Some(end)) => WinningLine::new(vec![*start, *end]),
            _ => WinningLine::new(Vec::new()),
        }
    }
}

/// Finds the first line summing to `±N`.
///
/// Rows are checked top to bottom, then columns left to right, then the main
/// and anti diagonals. The first match wins.
#[instrument(skip(grid))]
pub fn find_line<const N: usize>(grid: &[[i8; N]; N]) -> Option<(Player, Line)> {
    let n = N as i32;
    let owner = |sum: i32| Player::from_line_sum(sum, n);

    for (r, row) in grid.iter().enumerate() {
        let sum: i32 = row.iter().map(|&v| i32::from(v)).sum();
        if let Some(player) = owner(sum) {
            return Some((player, Line::Row(r)));
        }
    }

    for c in 0..N {
        let sum: i32 = grid.iter().map(|row| i32::from(row[c])).sum();
        if let Some(player) = owner(sum) {
            return Some((player, Line::Column(c)));
        }
    }

    let main: i32 = (0..N).map(|i| i32::from(grid[i][i])).sum();
    if let Some(player) = owner(main) {
        return Some((player, Line::MainDiagonal));
    }

    let anti: i32 = (0..N).map(|i| i32::from(grid[i][N - 1 - i])).sum();
    if let Some(player) = owner(anti) {
        return Some((player, Line::AntiDiagonal));
    }

    None
}

/// Line-win detector.
///
/// Returns `Win` with the line's endpoints, else `Draw` when every cell is
/// non-zero, else `InProgress`.
#[instrument(skip(grid))]
pub fn detect<const N: usize>(grid: &[[i8; N]; N]) -> GameResult {
    if let Some((player, line)) = find_line(grid) {
        return GameResult::Win(player, line.endpoints(N));
    }

    if grid.iter().flatten().all(|&v| v != 0) {
        GameResult::Draw
    } else {
        GameResult::InProgress
    }
}
