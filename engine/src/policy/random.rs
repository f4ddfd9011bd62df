// engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{Action, Cell, GridSpec};

use super::base::Policy;
use super::table::PolicyTable;

/// Uniform over `{Up, Down, Left, Right}` on free cells.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_action(&mut self, spec: &GridSpec, cell: Cell) -> Option<Action> {
        if !spec.is_free(cell) {
            return None;
        }
        Action::all().choose(&mut self.rng).copied()
    }
}

/// Draw a fresh random policy table from any RNG.
///
/// Cells are visited in row-major order, so a seeded RNG yields a reproducible table.
pub fn propose_random_policy<R: Rng + ?Sized>(spec: &GridSpec, rng: &mut R) -> PolicyTable {
    let mut table = PolicyTable::empty(spec.size());
    for cell in spec.free_cells() {
        table.set(cell, Action::all().choose(rng).copied());
    }
    table
}
