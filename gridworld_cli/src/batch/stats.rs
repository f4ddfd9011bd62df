// gridworld_cli/src/batch/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use gridworld_engine::SolveReport;

use super::sinks::ReportRow;

#[derive(Clone, Debug)]
pub struct BatchStats {
    pub instances_done: u64,
    pub solved: u64,
    pub non_converged: u64,
    pub degenerate_paths: u64,

    // sweep aggregates (solved instances only)
    pub sum_pe_sweeps: u64,
    pub sum_vi_sweeps: u64,
    pub max_vi_sweeps: usize,

    // path aggregates (solved instances only)
    pub sum_path_len: u64,
    pub max_path_len: usize,

    t0: Instant,
}

impl BatchStats {
    pub fn new() -> Self {
        Self {
            instances_done: 0,
            solved: 0,
            non_converged: 0,
            degenerate_paths: 0,
            sum_pe_sweeps: 0,
            sum_vi_sweeps: 0,
            max_vi_sweeps: 0,
            sum_path_len: 0,
            max_path_len: 0,
            t0: Instant::now(),
        }
    }

    /// Call once per successfully solved instance.
    pub fn on_solved(&mut self, report: &SolveReport) {
        self.instances_done += 1;
        self.solved += 1;

        let d = &report.diagnostics;
        self.sum_pe_sweeps += d.policy_evaluation.sweeps as u64;
        self.sum_vi_sweeps += d.value_iteration.sweeps as u64;
        self.max_vi_sweeps = self.max_vi_sweeps.max(d.value_iteration.sweeps);

        let len = report.optimal_path.len();
        self.sum_path_len += len as u64;
        self.max_path_len = self.max_path_len.max(len);

        if report.optimal_path.is_degenerate() {
            self.degenerate_paths += 1;
        }
    }

    /// Call when either sweep loop hit its cap.
    pub fn on_non_converged(&mut self) {
        self.instances_done += 1;
        self.non_converged += 1;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn solves_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.instances_done as f64 / dt
        } else {
            0.0
        }
    }

    fn per_solved(&self, sum: u64) -> f64 {
        if self.solved > 0 {
            sum as f64 / self.solved as f64
        } else {
            0.0
        }
    }

    pub fn avg_pe_sweeps(&self) -> f64 {
        self.per_solved(self.sum_pe_sweeps)
    }

    pub fn avg_vi_sweeps(&self) -> f64 {
        self.per_solved(self.sum_vi_sweeps)
    }

    pub fn avg_path_len(&self) -> f64 {
        self.per_solved(self.sum_path_len)
    }

    pub fn report_row(&self, total: u64) -> ReportRow {
        ReportRow {
            done: self.instances_done,
            total,
            solves_per_s: self.solves_per_sec(),
            non_converged: self.non_converged,
            degenerate_paths: self.degenerate_paths,
            avg_pe_sweeps: self.avg_pe_sweeps(),
            avg_vi_sweeps: self.avg_vi_sweeps(),
            max_vi_sweeps: self.max_vi_sweeps,
            avg_path_len: self.avg_path_len(),
            max_path_len: self.max_path_len,
        }
    }

    pub fn live_msg(&self) -> String {
        format!(
            "solves/s={:.1} noconv={} degen={} avgVI={:.1} avgPath={:.2}",
            self.solves_per_sec(),
            self.non_converged,
            self.degenerate_paths,
            self.avg_vi_sweeps(),
            self.avg_path_len(),
        )
    }

    pub fn final_report(&self) -> FinalReport {
        FinalReport {
            instances: self.instances_done,
            solved: self.solved,
            non_converged: self.non_converged,
            degenerate_paths: self.degenerate_paths,
            elapsed_s: self.elapsed_secs(),
            solves_per_s: self.solves_per_sec(),
            avg_pe_sweeps: self.avg_pe_sweeps(),
            avg_vi_sweeps: self.avg_vi_sweeps(),
            max_vi_sweeps: self.max_vi_sweeps,
            avg_path_len: self.avg_path_len(),
            max_path_len: self.max_path_len,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FinalReport {
    pub instances: u64,
    pub solved: u64,
    pub non_converged: u64,
    pub degenerate_paths: u64,

    pub elapsed_s: f64,
    pub solves_per_s: f64,

    pub avg_pe_sweeps: f64,
    pub avg_vi_sweeps: f64,
    pub max_vi_sweeps: usize,

    pub avg_path_len: f64,
    pub max_path_len: usize,
}
