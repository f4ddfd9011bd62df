// engine/src/engine/dynamics.rs
#![forbid(unsafe_code)]

use std::cmp::Ordering;

use serde::Serialize;

use crate::engine::cell::{Action, Cell};
use crate::engine::config::RewardModel;
use crate::engine::grid::GridSpec;

/// Why a move left the agent in place.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Violation {
    Boundary,
    Obstacle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    pub next_state: Cell,
    pub reward: f64,
    /// `Some` iff the move bounced (next_state == state).
    pub violation: Option<Violation>,
}

impl StepResult {
    #[inline]
    pub fn blocked(&self) -> bool {
        self.violation.is_some()
    }
}

/// Deterministic transition + shaped reward for one grid.
///
/// Pure: no interior state, safe to share across threads.
#[derive(Clone, Copy, Debug)]
pub struct Dynamics<'a> {
    spec: &'a GridSpec,
    rewards: RewardModel,
}

impl<'a> Dynamics<'a> {
    pub fn new(spec: &'a GridSpec, rewards: RewardModel) -> Self {
        Self { spec, rewards }
    }

    pub fn spec(&self) -> &'a GridSpec {
        self.spec
    }

    /// One move from `state`.
    ///
    /// Engine semantics:
    /// - Leaving the grid or entering an obstacle is a no-op move with the blocked reward.
    /// - Otherwise the reward compares Manhattan distance to the end before and after.
    /// - Callers never step from the end cell.
    #[inline]
    pub fn step(&self, state: Cell, action: Action) -> StepResult {
        debug_assert!(self.spec.contains(state), "step from off-grid cell {state}");

        let candidate = match state.shifted(action, self.spec.size()) {
            Some(c) => c,
            None => return self.bounce(state, Violation::Boundary),
        };
        if self.spec.is_obstacle(candidate) {
            return self.bounce(state, Violation::Obstacle);
        }

        let end = self.spec.end();
        let reward = match candidate.manhattan(end).cmp(&state.manhattan(end)) {
            Ordering::Less => self.rewards.closer,
            Ordering::Greater => self.rewards.farther,
            Ordering::Equal => self.rewards.neutral,
        };

        StepResult {
            next_state: candidate,
            reward,
            violation: None,
        }
    }

    #[inline]
    fn bounce(&self, state: Cell, violation: Violation) -> StepResult {
        StepResult {
            next_state: state,
            reward: self.rewards.blocked,
            violation: Some(violation),
        }
    }
}

/// `step` under the default reward model.
pub fn step(state: Cell, action: Action, spec: &GridSpec) -> StepResult {
    Dynamics::new(spec, RewardModel::default()).step(state, action)
}
