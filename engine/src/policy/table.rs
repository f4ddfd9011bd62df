// engine/src/policy/table.rs
#![forbid(unsafe_code)]

use serde::{Serialize, Serializer};

use crate::engine::{Action, Cell, GridSpec, SolveError};

use super::base::Policy;

/// Row-major `cell -> action` table. `None` on the end cell and obstacles.
///
/// Serialized as a list of rows; empty cells become `null`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyTable {
    size: usize,
    actions: Vec<Option<Action>>,
}

impl PolicyTable {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            actions: vec![None; size * size],
        }
    }

    /// Materialize any `Policy` over the free cells of `spec`.
    pub fn tabulate(spec: &GridSpec, policy: &mut dyn Policy) -> Self {
        let mut t = Self::empty(spec.size());
        for cell in spec.free_cells() {
            t.set(cell, policy.choose_action(spec, cell));
        }
        t
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// `None` for cells outside the table as well as for empty cells.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<Action> {
        if !cell.in_bounds(self.size) {
            return None;
        }
        self.actions[cell.index(self.size)]
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, action: Option<Action>) {
        let i = cell.index(self.size);
        self.actions[i] = action;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Action>]> {
        self.actions.chunks(self.size.max(1))
    }

    /// Every free cell of `spec` must carry an action.
    pub fn check_covers(&self, spec: &GridSpec) -> Result<(), SolveError> {
        if self.size != spec.size() {
            return Err(SolveError::PolicySizeMismatch {
                policy: self.size,
                grid: spec.size(),
            });
        }
        match spec.free_cells().find(|&c| self.get(c).is_none()) {
            Some(cell) => Err(SolveError::MissingAction { cell }),
            None => Ok(()),
        }
    }
}

impl Policy for PolicyTable {
    fn choose_action(&mut self, _spec: &GridSpec, cell: Cell) -> Option<Action> {
        self.get(cell)
    }
}

impl Serialize for PolicyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}
