// engine/src/engine/cell.rs
#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::constants::ACTION_DIM;

/// Grid coordinate, 0-indexed. Row 0 is the top row.
///
/// Serialized as a `[row, col]` pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    #[inline]
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Neighbor one unit towards `action`, or `None` if it would leave a `size x size` grid.
    #[inline]
    pub fn shifted(self, action: Action, size: usize) -> Option<Cell> {
        let (dr, dc) = action.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Cell { row, col };
        next.in_bounds(size).then_some(next)
    }

    /// Row-major index into a `size x size` table.
    #[inline]
    pub(crate) fn index(self, size: usize) -> usize {
        debug_assert!(self.in_bounds(size), "cell {self} outside {size}x{size}");
        self.row * size + self.col
    }

    /// Parses `"r,c"` (whitespace tolerated).
    pub fn parse(s: &str) -> Option<Self> {
        let (r, c) = s.split_once(',')?;
        let row = r.trim().parse().ok()?;
        let col = c.trim().parse().ok()?;
        Some(Self { row, col })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Cell> for (usize, usize) {
    fn from(c: Cell) -> Self {
        (c.row, c.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Closed action set. Enumeration order is the tie-break order for greedy selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    pub fn all() -> &'static [Action; ACTION_DIM] {
        use Action::*;
        &[Up, Down, Left, Right]
    }

    /// (d_row, d_col).
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Down => '↓',
            Action::Left => '←',
            Action::Right => '→',
        }
    }

    /// Accepts names (`up`, `u`) and arrow glyphs.
    pub fn parse(name: &str) -> Option<Self> {
        let k = name.trim().to_ascii_lowercase();
        match k.as_str() {
            "up" | "u" | "↑" => Some(Action::Up),
            "down" | "d" | "↓" => Some(Action::Down),
            "left" | "l" | "←" => Some(Action::Left),
            "right" | "r" | "→" => Some(Action::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        };
        f.write_str(name)
    }
}

/// What occupies a placed cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Start,
    End,
    Obstacle,
}

impl CellKind {
    pub fn from_cli(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "s" => Some(CellKind::Start),
            "end" | "goal" | "e" | "g" => Some(CellKind::End),
            "obstacle" | "wall" | "o" | "#" => Some(CellKind::Obstacle),
            _ => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Start => "start",
            CellKind::End => "end",
            CellKind::Obstacle => "obstacle",
        };
        f.write_str(name)
    }
}
