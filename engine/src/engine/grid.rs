// engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use serde::Serialize;

use crate::engine::cell::{Cell, CellKind};
use crate::engine::constants::{MAX_SIZE, MIN_SIZE, max_obstacles};
use crate::engine::error::GridSpecError;

/// Immutable, validated problem instance.
///
/// Invariants (enforced by every constructor):
/// - `MIN_SIZE <= size <= MAX_SIZE`
/// - start, end and every obstacle are in bounds and pairwise distinct
/// - `obstacles.len() <= size - 2`
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GridSpec {
    size: usize,
    start: Cell,
    end: Cell,
    obstacles: BTreeSet<Cell>,

    /// Row-major obstacle mask for O(1) lookups in the sweep loops.
    #[serde(skip)]
    blocked: Vec<bool>,
}

impl GridSpec {
    pub fn new(
        size: usize,
        start: Cell,
        end: Cell,
        obstacles: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, GridSpecError> {
        check_size(size)?;
        check_in_bounds(CellKind::Start, start, size)?;
        check_in_bounds(CellKind::End, end, size)?;
        if start == end {
            return Err(GridSpecError::Overlap {
                cell: start,
                first: CellKind::Start,
                second: CellKind::End,
            });
        }

        let mut set = BTreeSet::new();
        for cell in obstacles {
            check_in_bounds(CellKind::Obstacle, cell, size)?;
            for (kind, other) in [(CellKind::Start, start), (CellKind::End, end)] {
                if cell == other {
                    return Err(GridSpecError::Overlap {
                        cell,
                        first: kind,
                        second: CellKind::Obstacle,
                    });
                }
            }
            if !set.insert(cell) {
                return Err(GridSpecError::Overlap {
                    cell,
                    first: CellKind::Obstacle,
                    second: CellKind::Obstacle,
                });
            }
        }

        let max = max_obstacles(size);
        if set.len() > max {
            return Err(GridSpecError::TooManyObstacles {
                count: set.len(),
                max,
                size,
            });
        }

        let mut blocked = vec![false; size * size];
        for cell in &set {
            blocked[cell.index(size)] = true;
        }

        Ok(Self {
            size,
            start,
            end,
            obstacles: set,
            blocked,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Cell {
        self.end
    }

    pub fn obstacles(&self) -> &BTreeSet<Cell> {
        &self.obstacles
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.size)
    }

    #[inline]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.contains(cell) && self.blocked[cell.index(self.size)]
    }

    #[inline]
    pub fn is_terminal(&self, cell: Cell) -> bool {
        cell == self.end
    }

    /// Non-terminal, non-obstacle: the cells that carry an action and get updated by sweeps.
    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.is_terminal(cell) && !self.is_obstacle(cell)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.size;
        (0..n).flat_map(move |row| (0..n).map(move |col| Cell::new(row, col)))
    }

    /// Free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |&c| self.is_free(c))
    }

    pub fn kind_at(&self, cell: Cell) -> Option<CellKind> {
        if cell == self.start {
            Some(CellKind::Start)
        } else if cell == self.end {
            Some(CellKind::End)
        } else if self.is_obstacle(cell) {
            Some(CellKind::Obstacle)
        } else {
            None
        }
    }
}

fn check_size(size: usize) -> Result<(), GridSpecError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(GridSpecError::SizeOutOfRange {
            size,
            min: MIN_SIZE,
            max: MAX_SIZE,
        })
    }
}

fn check_in_bounds(kind: CellKind, cell: Cell, size: usize) -> Result<(), GridSpecError> {
    if cell.in_bounds(size) {
        Ok(())
    } else {
        Err(GridSpecError::OutOfBounds { kind, cell, size })
    }
}

// -----------------------------------------------------------------------------
// Cell-by-cell editing
// -----------------------------------------------------------------------------

/// Mutable grid under construction, edited one placement at a time.
///
/// This is the request-handling side of the solver: it owns the "current grid"
/// and hands an immutable `GridSpec` snapshot to each solve via [`GridDraft::finish`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridDraft {
    size: usize,
    start: Option<Cell>,
    end: Option<Cell>,
    obstacles: Vec<Cell>,
}

impl GridDraft {
    pub fn new(size: usize) -> Result<Self, GridSpecError> {
        check_size(size)?;
        Ok(Self {
            size,
            start: None,
            end: None,
            obstacles: Vec::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn end(&self) -> Option<Cell> {
        self.end
    }

    pub fn obstacles(&self) -> &[Cell] {
        &self.obstacles
    }

    fn occupant(&self, cell: Cell) -> Option<CellKind> {
        if self.start == Some(cell) {
            Some(CellKind::Start)
        } else if self.end == Some(cell) {
            Some(CellKind::End)
        } else if self.obstacles.contains(&cell) {
            Some(CellKind::Obstacle)
        } else {
            None
        }
    }

    /// Place `kind` at `cell`.
    ///
    /// Semantics:
    /// - Occupied cells (start, end, obstacle) reject any placement.
    /// - Placing start/end again moves it.
    /// - Obstacles beyond `size - 2` are rejected.
    pub fn place(&mut self, cell: Cell, kind: CellKind) -> Result<(), GridSpecError> {
        check_in_bounds(kind, cell, self.size)?;
        if let Some(occupant) = self.occupant(cell) {
            return Err(GridSpecError::CellOccupied { cell, occupant });
        }
        match kind {
            CellKind::Start => self.start = Some(cell),
            CellKind::End => self.end = Some(cell),
            CellKind::Obstacle => {
                let max = max_obstacles(self.size);
                if self.obstacles.len() >= max {
                    return Err(GridSpecError::TooManyObstacles {
                        count: self.obstacles.len() + 1,
                        max,
                        size: self.size,
                    });
                }
                self.obstacles.push(cell);
            }
        }
        Ok(())
    }

    /// Clear all placements, keeping the size.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
        self.obstacles.clear();
    }

    /// Validated snapshot for one solve.
    pub fn finish(&self) -> Result<GridSpec, GridSpecError> {
        let start = self.start.ok_or(GridSpecError::MissingStart)?;
        let end = self.end.ok_or(GridSpecError::MissingEnd)?;
        GridSpec::new(self.size, start, end, self.obstacles.iter().copied())
    }
}
