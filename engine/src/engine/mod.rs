// engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod cell;
mod config;
mod constants;
mod dynamics;
mod error;
mod evaluate;
mod grid;
mod iterate;
mod path;
mod render;
mod scenario;
mod solve;
mod sweep;
mod values;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use cell::{Action, Cell, CellKind};
pub use config::{RewardModel, SolverConfig, SweepCap};
pub use constants::{
    ACTION_DIM, BLOCKED_REWARD, CLOSER_REWARD, DEFAULT_GAMMA, DEFAULT_THETA, FARTHER_REWARD,
    MAX_SIZE, MIN_SIZE, NEUTRAL_REWARD, SWEEP_CAP_FACTOR, TERMINAL_VALUE, auto_sweep_cap,
    max_obstacles, max_path_len,
};
pub use dynamics::{Dynamics, StepResult, Violation, step};
pub use error::{GridSpecError, SolveError, Stage};
pub use evaluate::{PolicyEvaluation, evaluate_policy};
pub use grid::{GridDraft, GridSpec};
pub use iterate::{ValueIteration, greedy_action, iterate_values};
pub use path::{ExtractedPath, GuardReason, PathOutcome, extract_path};
pub use render::{render_path, render_policy, render_values};
pub use scenario::{ObstacleCount, RandomGridSpec, SizeDist};
pub use solve::{SolveDiagnostics, SolveReport, solve, solve_with_policy};
pub use sweep::Convergence;
pub use values::{CellValue, ValueTable};
