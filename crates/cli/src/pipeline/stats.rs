//! Pipeline statistics and metrics.

use std::time::Duration;

use contracts::{DispatchMode, InterleavePolicy};
use dispatcher::DispatchReport;
use observability::RunMetricsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Total duration of the run, Construct excluded
    pub duration: Duration,

    /// Interleave policy that produced the merged sequence
    pub policy: InterleavePolicy,

    /// Dispatch topology used
    pub dispatch: DispatchMode,

    /// Per-sink outcomes, in sink order
    pub report: DispatchReport,

    /// Collected/merged/dispatched counts
    pub run_metrics: RunMetricsAggregator,
}

impl PipelineStats {
    /// Merged lines per second, over the whole run
    pub fn lines_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.run_metrics.merged_lines as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary to stderr
    ///
    /// stdout belongs to the console sink.
    pub fn print_summary(&self) {
        eprintln!();
        eprint!("{}", self.run_metrics.summary());
        eprintln!("Policy: {}, dispatch: {}", self.policy, self.dispatch);
        eprintln!(
            "Duration: {:.3}s ({:.1} lines/s)",
            self.duration.as_secs_f64(),
            self.lines_per_sec()
        );
        for (source, lines) in &self.run_metrics.collected {
            eprintln!("  {}: {} lines collected", source, lines);
        }
        eprintln!();
    }
}
