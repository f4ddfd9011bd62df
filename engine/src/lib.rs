// engine/src/lib.rs
#![forbid(unsafe_code)]

//! Grid-world MDP solver.
//!
//! Given a bounded grid with a start cell, an end cell and a few obstacles:
//! - [`evaluate_policy`] runs iterative policy evaluation of a fixed policy,
//! - [`iterate_values`] runs value iteration for the optimal values and greedy policy,
//! - [`extract_path`] walks a policy from start to end with a loop guard,
//! - [`solve`] does all three around a freshly drawn random policy.

pub mod engine;
pub mod policy;

pub use engine::{
    Action, Cell, CellKind, CellValue, Convergence, Dynamics, ExtractedPath, GridDraft, GridSpec,
    GridSpecError, GuardReason, PathOutcome, PolicyEvaluation, RandomGridSpec, RewardModel,
    SolveDiagnostics, SolveError, SolveReport, SolverConfig, Stage, StepResult, SweepCap,
    ValueIteration, ValueTable, Violation, evaluate_policy, extract_path, iterate_values,
    max_obstacles, max_path_len, render_path, render_policy, render_values, solve,
    solve_with_policy, step,
};
pub use policy::{ConstantPolicy, Policy, PolicyTable, RandomPolicy, propose_random_policy};
