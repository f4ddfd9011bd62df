// engine/src/engine/config.rs
#![forbid(unsafe_code)]

/*
Solver configuration

Defaults reproduce the fixed constants of the grid-world MDP:
gamma = 0.9, theta = 0.001, end pinned to 100.0, blocked moves cost -10,
moving closer to the end earns +1, moving away costs -1, sideways moves 0.

Everything is overridable so tests and the CLI can probe pathological settings.
Validation only rejects values the sweep loop cannot work with at all (non-finite
numbers, gamma outside [0, 1], theta <= 0). Finite but badly chosen values
(gamma = 1 with a reward cycle, a tiny fixed cap) are caught at run time by the
sweep cap and reported as `NonConvergence`.
*/

use crate::engine::constants::{
    BLOCKED_REWARD, CLOSER_REWARD, DEFAULT_GAMMA, DEFAULT_THETA, FARTHER_REWARD, NEUTRAL_REWARD,
    TERMINAL_VALUE, auto_sweep_cap,
};
use crate::engine::error::SolveError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardModel {
    /// Boundary or obstacle violation.
    pub blocked: f64,
    /// Manhattan distance to the end strictly decreased.
    pub closer: f64,
    /// Manhattan distance to the end strictly increased.
    pub farther: f64,
    /// Distance unchanged.
    pub neutral: f64,
}

impl Default for RewardModel {
    fn default() -> Self {
        Self {
            blocked: BLOCKED_REWARD,
            closer: CLOSER_REWARD,
            farther: FARTHER_REWARD,
            neutral: NEUTRAL_REWARD,
        }
    }
}

impl RewardModel {
    fn all_finite(&self) -> bool {
        [self.blocked, self.closer, self.farther, self.neutral]
            .iter()
            .all(|r| r.is_finite())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SweepCap {
    /// `SWEEP_CAP_FACTOR * size^2`.
    Auto,
    Fixed(usize),
}

impl SweepCap {
    pub fn resolve(self, size: usize) -> usize {
        match self {
            SweepCap::Auto => auto_sweep_cap(size),
            SweepCap::Fixed(n) => n.max(1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    pub gamma: f64,
    pub theta: f64,
    pub terminal_value: f64,
    pub rewards: RewardModel,
    pub max_sweeps: SweepCap,
    /// Run policy evaluation and value iteration on two scoped threads.
    pub parallel_stages: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            theta: DEFAULT_THETA,
            terminal_value: TERMINAL_VALUE,
            rewards: RewardModel::default(),
            max_sweeps: SweepCap::Auto,
            parallel_stages: false,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.gamma.is_finite() || !(0.0..=1.0).contains(&self.gamma) {
            return Err(SolveError::InvalidConfig {
                reason: format!("gamma must lie in [0, 1], got {}", self.gamma),
            });
        }
        if !self.theta.is_finite() || self.theta <= 0.0 {
            return Err(SolveError::InvalidConfig {
                reason: format!("theta must be a positive finite number, got {}", self.theta),
            });
        }
        if !self.terminal_value.is_finite() {
            return Err(SolveError::InvalidConfig {
                reason: format!("terminal value must be finite, got {}", self.terminal_value),
            });
        }
        if !self.rewards.all_finite() {
            return Err(SolveError::InvalidConfig {
                reason: format!("rewards must be finite, got {:?}", self.rewards),
            });
        }
        Ok(())
    }

    pub fn sweep_cap(&self, size: usize) -> usize {
        self.max_sweeps.resolve(size)
    }
}
