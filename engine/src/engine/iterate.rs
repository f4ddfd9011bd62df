// engine/src/engine/iterate.rs
#![forbid(unsafe_code)]

use tracing::debug;

use crate::engine::cell::{Action, Cell};
use crate::engine::config::SolverConfig;
use crate::engine::dynamics::Dynamics;
use crate::engine::error::{SolveError, Stage};
use crate::engine::grid::GridSpec;
use crate::engine::sweep::{Convergence, backup, run_sweeps};
use crate::engine::values::ValueTable;
use crate::policy::PolicyTable;

#[derive(Clone, Debug, PartialEq)]
pub struct ValueIteration {
    pub values: ValueTable,
    /// Argmax actions of the final sweep.
    pub policy: PolicyTable,
    pub convergence: Convergence,
}

/// Best action and its backed-up value from one snapshot.
///
/// Tie-break: strict `>` in `Action::all()` order, so Up beats Down beats Left beats Right.
pub fn greedy_action(
    dynamics: &Dynamics<'_>,
    snapshot: &ValueTable,
    gamma: f64,
    cell: Cell,
) -> (Action, f64) {
    let mut best_action = Action::Up;
    let mut best_value = f64::NEG_INFINITY;
    for &action in Action::all() {
        let q = backup(dynamics, snapshot, gamma, cell, action);
        if q > best_value {
            best_value = q;
            best_action = action;
        }
    }
    (best_action, best_value)
}

/// Value iteration: `V(s) <- max_a r(s, a) + gamma * V(s')` until the largest change is below theta.
pub fn iterate_values(spec: &GridSpec, cfg: &SolverConfig) -> Result<ValueIteration, SolveError> {
    cfg.validate()?;

    let dynamics = Dynamics::new(spec, cfg.rewards);
    let gamma = cfg.gamma;
    let mut policy = PolicyTable::empty(spec.size());

    // Each sweep overwrites every free cell, so after the last sweep the table
    // holds exactly that sweep's argmax actions.
    let (values, convergence) = run_sweeps(spec, cfg, Stage::ValueIteration, |cell, snap| {
        let (action, value) = greedy_action(&dynamics, snap, gamma, cell);
        policy.set(cell, Some(action));
        value
    })?;

    debug!(
        sweeps = convergence.sweeps,
        final_delta = convergence.final_delta,
        "value iteration converged"
    );
    Ok(ValueIteration {
        values,
        policy,
        convergence,
    })
}
