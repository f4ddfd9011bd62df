// gridworld_cli/src/batch/runner.rs
#![forbid(unsafe_code)]

use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use gridworld_engine::{RandomGridSpec, SolveError, SolverConfig, solve};

use super::sinks::BatchSink;
use super::stats::{BatchStats, FinalReport};

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 50;

#[derive(Clone, Debug)]
pub struct BatchConfig {
    // ---------------- instances ----------------
    pub instances: u64,
    /// Instance i draws its grid and its random policy from base_seed + i.
    pub base_seed: u64,
    pub scenario: RandomGridSpec,
    pub solver: SolverConfig,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + periodic table (via sink)
    pub verbosity: u8,

    /// Print a table row every N instances (only used when verbosity == 2).
    /// 0 disables table reporting.
    pub report_every: u64,
}

pub struct Runner {
    cfg: BatchConfig,
    sink: Box<dyn BatchSink>,
}

impl Runner {
    pub fn new(cfg: BatchConfig, sink: Box<dyn BatchSink>) -> Self {
        Self { cfg, sink }
    }

    /// Solve every instance. Non-convergence is counted, any other error aborts the run.
    pub fn run(&mut self) -> Result<FinalReport, SolveError> {
        let cfg = self.cfg.clone();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.instances);
            if let Ok(style) = ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos:>9}/{len:<9}  {percent:>3}%  {elapsed_precise}  {msg}",
            ) {
                pb.set_style(style.progress_chars("=>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut stats = BatchStats::new();

        for i in 0..cfg.instances {
            let seed = cfg.base_seed.wrapping_add(i);
            let spec = cfg.scenario.sample(seed)?;
            let mut rng = StdRng::seed_from_u64(seed);

            match solve(&spec, &cfg.solver, &mut rng) {
                Ok(report) => stats.on_solved(&report),
                Err(SolveError::NonConvergence { stage, sweeps, .. }) => {
                    debug!(seed, %stage, sweeps, "instance did not converge");
                    stats.on_non_converged();
                }
                Err(e) => return Err(e),
            }

            if let Some(ref pb) = pb {
                pb.inc(1);
            }

            let done = stats.instances_done;
            if cfg.verbosity >= 2 && cfg.report_every > 0 && done % cfg.report_every == 0 {
                self.sink.on_report_row(&stats.report_row(cfg.instances), pb.as_ref());
            }

            if done % LIVE_EVERY == 0 {
                if let Some(ref pb) = pb {
                    pb.set_message(stats.live_msg());
                }
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(stats.final_report())
    }
}
