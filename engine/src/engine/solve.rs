// engine/src/engine/solve.rs
#![forbid(unsafe_code)]

use rand::Rng;
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::engine::config::SolverConfig;
use crate::engine::error::SolveError;
use crate::engine::evaluate::{PolicyEvaluation, evaluate_policy};
use crate::engine::grid::GridSpec;
use crate::engine::iterate::{ValueIteration, iterate_values};
use crate::engine::path::{ExtractedPath, PathOutcome, extract_path};
use crate::engine::sweep::Convergence;
use crate::engine::values::ValueTable;
use crate::policy::{PolicyTable, propose_random_policy};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SolveDiagnostics {
    pub policy_evaluation: Convergence,
    pub value_iteration: Convergence,
    pub path: PathOutcome,
}

/// Everything one solve produces. Built fresh per call; nothing is retained.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolveReport {
    pub grid: GridSpec,
    /// The fixed policy that was evaluated.
    pub random_policy: PolicyTable,
    pub policy_eval_values: ValueTable,
    pub value_iter_values: ValueTable,
    pub value_iter_policy: PolicyTable,
    pub optimal_path: ExtractedPath,
    pub diagnostics: SolveDiagnostics,
}

/// Full solve: draw a random policy from `rng`, evaluate it, run value iteration,
/// then walk the optimal policy from start to end.
pub fn solve<R: Rng + ?Sized>(
    spec: &GridSpec,
    cfg: &SolverConfig,
    rng: &mut R,
) -> Result<SolveReport, SolveError> {
    cfg.validate()?;
    let random_policy = propose_random_policy(spec, rng);
    solve_with_policy(spec, cfg, random_policy)
}

/// Same as [`solve`] with a caller-supplied policy to evaluate.
pub fn solve_with_policy(
    spec: &GridSpec,
    cfg: &SolverConfig,
    random_policy: PolicyTable,
) -> Result<SolveReport, SolveError> {
    let _span = debug_span!("solve", size = spec.size(), obstacles = spec.obstacles().len())
        .entered();

    cfg.validate()?;
    random_policy.check_covers(spec)?;

    let (evaluation, iteration) = run_stages(spec, cfg, &random_policy);
    let PolicyEvaluation {
        values: policy_eval_values,
        convergence: pe_conv,
    } = evaluation?;
    let ValueIteration {
        values: value_iter_values,
        policy: value_iter_policy,
        convergence: vi_conv,
    } = iteration?;

    let optimal_path = extract_path(spec, &value_iter_policy);
    debug!(
        pe_sweeps = pe_conv.sweeps,
        vi_sweeps = vi_conv.sweeps,
        path_len = optimal_path.len(),
        degenerate = optimal_path.is_degenerate(),
        "solve finished"
    );

    Ok(SolveReport {
        grid: spec.clone(),
        random_policy,
        policy_eval_values,
        value_iter_values,
        value_iter_policy,
        diagnostics: SolveDiagnostics {
            policy_evaluation: pe_conv,
            value_iteration: vi_conv,
            path: optimal_path.outcome,
        },
        optimal_path,
    })
}

type StageResults = (
    Result<PolicyEvaluation, SolveError>,
    Result<ValueIteration, SolveError>,
);

/// The two sweep loops share no data; optionally run them side by side.
fn run_stages(spec: &GridSpec, cfg: &SolverConfig, policy: &PolicyTable) -> StageResults {
    if !cfg.parallel_stages {
        return (evaluate_policy(spec, policy, cfg), iterate_values(spec, cfg));
    }
    std::thread::scope(|s| {
        let evaluation = s.spawn(|| evaluate_policy(spec, policy, cfg));
        let iteration = iterate_values(spec, cfg);
        let evaluation = evaluation
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (evaluation, iteration)
    })
}
