// engine/src/engine/error.rs
#![forbid(unsafe_code)]

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::engine::cell::{Cell, CellKind};
use crate::engine::values::ValueTable;

/// A violated grid invariant. Detected before any iteration begins.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GridSpecError {
    #[error("grid size {size} is outside [{min}, {max}]")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("start cell is not set")]
    MissingStart,

    #[error("end cell is not set")]
    MissingEnd,

    #[error("{kind} cell {cell} lies outside a {size}x{size} grid")]
    OutOfBounds {
        kind: CellKind,
        cell: Cell,
        size: usize,
    },

    #[error("{first} and {second} overlap at {cell}")]
    Overlap {
        cell: Cell,
        first: CellKind,
        second: CellKind,
    },

    #[error("{count} obstacles exceed the limit of {max} for a {size}x{size} grid")]
    TooManyObstacles { count: usize, max: usize, size: usize },

    #[error("cell {cell} is already occupied by the {occupant}")]
    CellOccupied { cell: Cell, occupant: CellKind },
}

/// Which sweep loop a diagnostic refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PolicyEvaluation,
    ValueIteration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PolicyEvaluation => f.write_str("policy evaluation"),
            Stage::ValueIteration => f.write_str("value iteration"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid grid: {0}")]
    InvalidGridSpec(#[from] GridSpecError),

    #[error("invalid solver config: {reason}")]
    InvalidConfig { reason: String },

    #[error("policy table is {policy}x{policy} but the grid is {grid}x{grid}")]
    PolicySizeMismatch { policy: usize, grid: usize },

    #[error("policy has no action for non-terminal cell {cell}")]
    MissingAction { cell: Cell },

    /// The sweep cap was hit before the value change dropped below theta.
    /// `partial` is the value table after the last completed sweep.
    #[error("{stage} did not converge within {sweeps} sweeps (last delta {delta:.6})")]
    NonConvergence {
        stage: Stage,
        sweeps: usize,
        delta: f64,
        partial: Box<ValueTable>,
    },
}
