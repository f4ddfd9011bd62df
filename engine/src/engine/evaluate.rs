// engine/src/engine/evaluate.rs
#![forbid(unsafe_code)]

use tracing::debug;

use crate::engine::config::SolverConfig;
use crate::engine::dynamics::Dynamics;
use crate::engine::error::{SolveError, Stage};
use crate::engine::grid::GridSpec;
use crate::engine::sweep::{Convergence, backup, run_sweeps};
use crate::engine::values::ValueTable;
use crate::policy::PolicyTable;

#[derive(Clone, Debug, PartialEq)]
pub struct PolicyEvaluation {
    pub values: ValueTable,
    pub convergence: Convergence,
}

/// Iterative policy evaluation of a fixed policy:
/// `V(s) <- r(s, pi(s)) + gamma * V(s')` until the largest change is below theta.
///
/// The policy must carry an action for every free cell of `spec`.
pub fn evaluate_policy(
    spec: &GridSpec,
    policy: &PolicyTable,
    cfg: &SolverConfig,
) -> Result<PolicyEvaluation, SolveError> {
    cfg.validate()?;
    policy.check_covers(spec)?;

    let dynamics = Dynamics::new(spec, cfg.rewards);
    let gamma = cfg.gamma;

    let (values, convergence) = run_sweeps(spec, cfg, Stage::PolicyEvaluation, |cell, snap| {
        match policy.get(cell) {
            Some(action) => backup(&dynamics, snap, gamma, cell, action),
            // Unreachable after `check_covers`; keep the old value.
            None => snap.get(cell).or_zero(),
        }
    })?;

    debug!(
        sweeps = convergence.sweeps,
        final_delta = convergence.final_delta,
        "policy evaluation converged"
    );
    Ok(PolicyEvaluation {
        values,
        convergence,
    })
}
