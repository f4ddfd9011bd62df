// engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Inclusive bounds on the grid side length.
pub const MIN_SIZE: usize = 5;
pub const MAX_SIZE: usize = 9;

pub const DEFAULT_GAMMA: f64 = 0.9;
pub const DEFAULT_THETA: f64 = 0.001;

/// Value pinned at the end cell for every sweep.
pub const TERMINAL_VALUE: f64 = 100.0;

pub const BLOCKED_REWARD: f64 = -10.0;
pub const CLOSER_REWARD: f64 = 1.0;
pub const FARTHER_REWARD: f64 = -1.0;
pub const NEUTRAL_REWARD: f64 = 0.0;

/**
 * Defensive sweep cap multiplier: `SWEEP_CAP_FACTOR * size^2` sweeps.
 * With the default gamma/theta, convergence needs ~110 sweeps, well below the
 * smallest cap (250 for size 5).
 */
pub const SWEEP_CAP_FACTOR: usize = 10;

pub const ACTION_DIM: usize = 4;

/// Obstacle budget for a grid of side `size`.
#[inline]
pub fn max_obstacles(size: usize) -> usize {
    size.saturating_sub(2)
}

/// Upper bound on the number of cells an extracted path may hold.
#[inline]
pub fn max_path_len(size: usize) -> usize {
    size * size + 1
}

#[inline]
pub fn auto_sweep_cap(size: usize) -> usize {
    SWEEP_CAP_FACTOR * size * size
}
