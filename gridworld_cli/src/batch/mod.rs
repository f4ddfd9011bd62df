// gridworld_cli/src/batch/mod.rs
#![forbid(unsafe_code)]

pub mod runner;
pub mod sinks;
pub mod stats;

pub use runner::{BatchConfig, Runner};
pub use sinks::{BatchSink, NoopSink, TableSink};
