// engine/src/engine/path.rs
#![forbid(unsafe_code)]

use serde::Serialize;
use tracing::warn;

use crate::engine::cell::Cell;
use crate::engine::config::RewardModel;
use crate::engine::dynamics::Dynamics;
use crate::engine::grid::GridSpec;
use crate::policy::PolicyTable;

/// Why the walk stopped before reaching the end.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardReason {
    /// The next cell is already on the path (includes bouncing in place).
    Revisit,
    /// The next cell is an obstacle.
    Obstacle,
    /// The policy has no action for the current cell.
    NoAction,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Reached,
    /// Not an error: the caller should treat the path as "no confirmed route".
    Degenerate { stopped_at: Cell, reason: GuardReason },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ExtractedPath {
    pub cells: Vec<Cell>,
    pub outcome: PathOutcome,
}

impl ExtractedPath {
    pub fn is_degenerate(&self) -> bool {
        matches!(self.outcome, PathOutcome::Degenerate { .. })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Walk `policy` from start towards end.
///
/// Loop guard (checked once per advance): stop when the next cell is already on
/// the path or is an obstacle. The end cell is always appended last, so the path
/// starts at `start`, ends at `end`, and never exceeds `size^2 + 1` cells.
pub fn extract_path(spec: &GridSpec, policy: &PolicyTable) -> ExtractedPath {
    // Rewards are irrelevant to the walk; only the transition is used.
    let dynamics = Dynamics::new(spec, RewardModel::default());
    let end = spec.end();

    let mut cells = vec![];
    let mut cursor = spec.start();
    let mut outcome = PathOutcome::Reached;

    while cursor != end {
        cells.push(cursor);

        let Some(action) = policy.get(cursor) else {
            outcome = PathOutcome::Degenerate {
                stopped_at: cursor,
                reason: GuardReason::NoAction,
            };
            break;
        };
        let next = dynamics.step(cursor, action).next_state;

        if let Some(reason) = guard(spec, &cells, next) {
            outcome = PathOutcome::Degenerate {
                stopped_at: cursor,
                reason,
            };
            break;
        }
        cursor = next;
    }
    cells.push(end);

    if let PathOutcome::Degenerate { stopped_at, reason } = outcome {
        warn!(%stopped_at, ?reason, len = cells.len(), "path walk stopped before the end cell");
    }
    ExtractedPath { cells, outcome }
}

#[inline]
fn guard(spec: &GridSpec, visited: &[Cell], next: Cell) -> Option<GuardReason> {
    if spec.is_obstacle(next) {
        Some(GuardReason::Obstacle)
    } else if visited.contains(&next) {
        Some(GuardReason::Revisit)
    } else {
        None
    }
}
