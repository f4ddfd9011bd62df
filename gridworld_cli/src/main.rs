// gridworld_cli/src/main.rs
#![forbid(unsafe_code)]

mod batch;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridworld_engine::engine::{ObstacleCount, SizeDist};
use gridworld_engine::{
    Cell, CellKind, GridDraft, RandomGridSpec, SolverConfig, SweepCap, render_path,
    render_policy, render_values, solve,
};

use crate::batch::{BatchConfig, BatchSink, NoopSink, Runner, TableSink};

/// Default seed when --seed is omitted.
const DEFAULT_SEED: u64 = 12345;

#[derive(Parser, Debug)]
#[command(name = "gridworld_cli", about = "Grid-world MDP solver")]
struct Cli {
    /// Verbosity: 0=warnings only, 1=info + progress bar, 2=debug + periodic table.
    /// RUST_LOG overrides the log filter.
    #[arg(long, global = true, default_value_t = 1)]
    verbosity: u8,

    #[command(flatten)]
    solver: SolverArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct SolverArgs {
    /// Discount factor in [0, 1].
    #[arg(long, global = true, default_value_t = gridworld_engine::engine::DEFAULT_GAMMA)]
    gamma: f64,

    /// Convergence threshold on the largest per-sweep value change.
    #[arg(long, global = true, default_value_t = gridworld_engine::engine::DEFAULT_THETA)]
    theta: f64,

    /// Sweep cap per stage. If omitted, 10 * size^2.
    #[arg(long, global = true)]
    max_sweeps: Option<usize>,

    /// Run policy evaluation and value iteration on two threads.
    #[arg(long, global = true)]
    parallel: bool,
}

impl SolverArgs {
    fn to_config(&self) -> SolverConfig {
        SolverConfig {
            gamma: self.gamma,
            theta: self.theta,
            max_sweeps: self.max_sweeps.map_or(SweepCap::Auto, SweepCap::Fixed),
            parallel_stages: self.parallel,
            ..SolverConfig::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve one grid and print values, policies and the extracted path.
    Solve {
        /// Grid side length (5..=9).
        #[arg(long, default_value_t = 5)]
        size: usize,

        /// Start cell as "row,col".
        #[arg(long, value_parser = parse_cell)]
        start: Cell,

        /// End cell as "row,col".
        #[arg(long, value_parser = parse_cell)]
        end: Cell,

        /// Obstacle cell as "row,col" (repeatable, at most size-2).
        #[arg(long = "obstacle", value_parser = parse_cell)]
        obstacles: Vec<Cell>,

        /// Seed for the random policy that gets evaluated.
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Solve many seeded random grids and report aggregate statistics.
    Batch {
        /// Number of instances to solve.
        #[arg(long, default_value_t = 1000)]
        instances: u64,

        /// Base seed (instance i uses base_seed + i).
        #[arg(long)]
        seed: Option<u64>,

        /// Fixed grid size. If omitted, sizes are drawn uniformly from 5..=9.
        #[arg(long)]
        size: Option<usize>,

        /// Fixed obstacle count (clamped to size-2). If omitted, drawn uniformly.
        #[arg(long)]
        obstacles: Option<usize>,

        /// Print a table row every N instances (only used with --verbosity 2).
        #[arg(long, default_value_t = 100)]
        report_every: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_cell(s: &str) -> Result<Cell, String> {
    Cell::parse(s).ok_or_else(|| format!("expected \"row,col\", got {s:?}"))
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Logs go to stderr so JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let solver = cli.solver.to_config();
    solver.validate()?;

    match cli.cmd {
        Command::Solve {
            size,
            start,
            end,
            obstacles,
            seed,
            format,
        } => {
            // Same editing rules as an interactive grid: occupied cells reject placements.
            let mut draft = GridDraft::new(size)?;
            draft.place(start, CellKind::Start)?;
            draft.place(end, CellKind::End)?;
            for cell in obstacles {
                draft.place(cell, CellKind::Obstacle)?;
            }
            let spec = draft.finish()?;

            let mut rng = StdRng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED));
            let report = solve(&spec, &solver, &mut rng)?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Text => {
                    println!("random policy:");
                    print!("{}", render_policy(&spec, &report.random_policy));
                    println!(
                        "policy evaluation ({} sweeps):",
                        report.diagnostics.policy_evaluation.sweeps
                    );
                    print!("{}", render_values(&spec, &report.policy_eval_values));
                    println!(
                        "value iteration ({} sweeps):",
                        report.diagnostics.value_iteration.sweeps
                    );
                    print!("{}", render_values(&spec, &report.value_iter_values));
                    println!("optimal policy:");
                    print!("{}", render_policy(&spec, &report.value_iter_policy));
                    println!("path:");
                    print!("{}", render_path(&spec, &report.optimal_path));
                }
            }
            info!(
                path_len = report.optimal_path.len(),
                degenerate = report.optimal_path.is_degenerate(),
                "solved"
            );
        }

        Command::Batch {
            instances,
            seed,
            size,
            obstacles,
            report_every,
        } => {
            let scenario = RandomGridSpec {
                size: size.map_or(
                    SizeDist::Uniform {
                        min: gridworld_engine::engine::MIN_SIZE,
                        max: gridworld_engine::engine::MAX_SIZE,
                    },
                    SizeDist::Fixed,
                ),
                obstacles: obstacles.map_or(
                    ObstacleCount::Uniform {
                        min: 0,
                        max: gridworld_engine::engine::MAX_SIZE,
                    },
                    ObstacleCount::Fixed,
                ),
                seed_salt: RandomGridSpec::DEFAULT_SEED_SALT,
            };

            let cfg = BatchConfig {
                instances,
                base_seed: seed.unwrap_or(DEFAULT_SEED),
                scenario,
                solver,
                verbosity: cli.verbosity,
                report_every,
            };

            let sink: Box<dyn BatchSink> = if cfg.verbosity >= 2 && cfg.report_every > 0 {
                Box::new(TableSink::new(20))
            } else {
                Box::new(NoopSink)
            };

            let mut runner = Runner::new(cfg, sink);
            let report = runner.run()?;

            // Final one-line summary (useful for logs / grep).
            println!(
                "DONE: instances={} solved={} non_converged={} degenerate_paths={} elapsed={:.3}s solves/s={:.1} avg_pe_sweeps={:.2} avg_vi_sweeps={:.2} max_vi_sweeps={} avg_path_len={:.2} max_path_len={}",
                report.instances,
                report.solved,
                report.non_converged,
                report.degenerate_paths,
                report.elapsed_s,
                report.solves_per_s,
                report.avg_pe_sweeps,
                report.avg_vi_sweeps,
                report.max_vi_sweeps,
                report.avg_path_len,
                report.max_path_len,
            );
        }
    }
    Ok(())
}
