// engine/src/engine/sweep.rs
#![forbid(unsafe_code)]

/*
Synchronous (Jacobi) sweep driver shared by policy evaluation and value iteration.

Each sweep reads one frozen snapshot and writes a second buffer; the buffers are
swapped only after every free cell has been updated, so no update ever sees a
partially updated table. The end cell and obstacles are re-pinned each sweep.

Termination:
- converged when the largest per-cell change of a sweep is < theta
- otherwise `NonConvergence` once the sweep cap is reached (the last snapshot
  travels with the error)
*/

use serde::Serialize;
use tracing::{trace, warn};

use crate::engine::cell::{Action, Cell};
use crate::engine::config::SolverConfig;
use crate::engine::dynamics::Dynamics;
use crate::engine::error::{SolveError, Stage};
use crate::engine::grid::GridSpec;
use crate::engine::values::{CellValue, ValueTable};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Convergence {
    pub sweeps: usize,
    /// Largest per-cell change in the final sweep (< theta).
    pub final_delta: f64,
}

/// One-step lookahead: `reward + gamma * V(next)`, undefined `V(next)` counted as 0.0.
#[inline]
pub(crate) fn backup(
    dynamics: &Dynamics<'_>,
    snapshot: &ValueTable,
    gamma: f64,
    cell: Cell,
    action: Action,
) -> f64 {
    let r = dynamics.step(cell, action);
    r.reward + gamma * snapshot.get(r.next_state).or_zero()
}

/// Run sweeps until convergence. `update(cell, snapshot)` returns the new value of a free cell.
pub(crate) fn run_sweeps<F>(
    spec: &GridSpec,
    cfg: &SolverConfig,
    stage: Stage,
    mut update: F,
) -> Result<(ValueTable, Convergence), SolveError>
where
    F: FnMut(Cell, &ValueTable) -> f64,
{
    let cap = cfg.sweep_cap(spec.size());
    let mut values = ValueTable::initial(spec, cfg.terminal_value);
    let mut next = values.clone();
    let mut sweeps = 0usize;

    loop {
        let mut delta = 0.0f64;
        for cell in spec.free_cells() {
            let v = update(cell, &values);
            let old = values.get(cell).or_zero();
            delta = delta.max((v - old).abs());
            next.set(cell, CellValue::Defined(v));
        }
        next.pin(spec, cfg.terminal_value);

        std::mem::swap(&mut values, &mut next);
        sweeps += 1;
        trace!(%stage, sweeps, delta, "sweep");

        if delta < cfg.theta {
            return Ok((
                values,
                Convergence {
                    sweeps,
                    final_delta: delta,
                },
            ));
        }
        if sweeps >= cap {
            warn!(%stage, sweeps, delta, cap, "sweep cap reached before convergence");
            return Err(SolveError::NonConvergence {
                stage,
                sweeps,
                delta,
                partial: Box::new(values),
            });
        }
    }
}
