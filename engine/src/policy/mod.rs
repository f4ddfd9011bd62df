// engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod random;
mod table;

/**
 * Curated policy public API.
 *
 * Internal implementation modules remain private; only stable policy entrypoints are re-exported.
 */
pub use base::{ConstantPolicy, Policy};
pub use random::{RandomPolicy, propose_random_policy};
pub use table::PolicyTable;
