// gridworld_cli/src/batch/sinks.rs
#![forbid(unsafe_code)]

/// One periodic row emitted by the runner.
///
/// Transport struct: runner/stats compute fields, sinks only format/emit.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub done: u64,
    pub total: u64,

    pub solves_per_s: f64,

    pub non_converged: u64,
    pub degenerate_paths: u64,

    /// Averages over all solved instances so far.
    pub avg_pe_sweeps: f64,
    pub avg_vi_sweeps: f64,
    pub max_vi_sweeps: usize,

    pub avg_path_len: f64,
    pub max_path_len: usize,
}

/// Sink interface for periodic reporting.
pub trait BatchSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>);
}

/// Default sink: does nothing.
#[derive(Default)]
pub struct NoopSink;

impl BatchSink for NoopSink {
    fn on_report_row(&mut self, _row: &ReportRow, _pb: Option<&indicatif::ProgressBar>) {}
}

/// Human-readable periodic table sink.
///
/// Cadence (every N instances) is handled by Runner. This sink prints whenever called.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    const DEFAULT_HEADER_EVERY: u64 = 20;

    /// If `header_every == 0`, a reasonable default is used.
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: if header_every == 0 {
                Self::DEFAULT_HEADER_EVERY
            } else {
                header_every
            },
            rows_printed: 0,
        }
    }

    fn header_line(&self) -> String {
        // Keep widths aligned with row_line() below.
        format!(
            "{:>21} {:>9} {:>7} {:>7} {:>9} {:>9} {:>7} {:>9} {:>7}",
            "done/total",
            "solves/s",
            "noconv",
            "degen",
            "avgPE",
            "avgVI",
            "maxVI",
            "avgPath",
            "maxPath",
        )
    }

    fn sep_line(&self) -> String {
        "-".repeat(self.header_line().len())
    }

    fn row_line(&self, r: &ReportRow) -> String {
        format!(
            "{:>10}/{:<10} {:>9.1} {:>7} {:>7} {:>9.2} {:>9.2} {:>7} {:>9.2} {:>7}",
            r.done,
            r.total,
            r.solves_per_s,
            r.non_converged,
            r.degenerate_paths,
            r.avg_pe_sweeps,
            r.avg_vi_sweeps,
            r.max_vi_sweeps,
            r.avg_path_len,
            r.max_path_len,
        )
    }
}

impl BatchSink for TableSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>) {
        let mut lines: Vec<String> = Vec::new();

        if self.rows_printed % self.header_every == 0 {
            lines.push(self.header_line());
            lines.push(self.sep_line());
        }

        lines.push(self.row_line(row));
        self.rows_printed += 1;

        if let Some(pb) = pb {
            for l in lines {
                pb.println(l);
            }
        } else {
            for l in lines {
                println!("{l}");
            }
        }
    }
}
