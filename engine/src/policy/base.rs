// engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Action, Cell, GridSpec};

/// Policy chooses an action for one cell of a grid.
///
/// Returns `None` for cells that carry no action (the end cell and obstacles).
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose_action(&mut self, spec: &GridSpec, cell: Cell) -> Option<Action>;
}

/// Same action everywhere. Handy as a deliberately poor baseline.
#[derive(Clone, Copy, Debug)]
pub struct ConstantPolicy(pub Action);

impl Policy for ConstantPolicy {
    fn choose_action(&mut self, spec: &GridSpec, cell: Cell) -> Option<Action> {
        spec.is_free(cell).then_some(self.0)
    }
}
