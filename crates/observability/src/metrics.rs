//! Run metrics
//!
//! Counters over the `metrics` facade plus an in-memory aggregator used for the
//! end-of-run summary. Without an installed recorder the counters are no-ops.

use std::fmt;

use metrics::{counter, gauge, histogram};

/// Record the lines collected from one source
pub fn record_lines_collected(source_name: &str, lines: usize) {
    counter!(
        "line_scrambler_lines_collected_total",
        "source" => source_name.to_string()
    )
    .increment(lines as u64);
}

/// Record one merge
pub fn record_merge(policy: &str, lines: usize) {
    counter!("line_scrambler_merges_total", "policy" => policy.to_string()).increment(1);
    gauge!("line_scrambler_merged_lines").set(lines as f64);
}

/// Record one sink dispatch outcome
pub fn record_sink_dispatch(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "line_scrambler_sink_dispatch_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record how long one sink write took
pub fn record_sink_latency_ms(sink_name: &str, latency_ms: f64) {
    histogram!(
        "line_scrambler_sink_write_ms",
        "sink" => sink_name.to_string()
    )
    .record(latency_ms);
}

/// Run metrics aggregator
///
/// Aggregates one run in memory for the summary printed at exit.
#[derive(Debug, Clone, Default)]
pub struct RunMetricsAggregator {
    /// Lines collected per source, in source order
    pub collected: Vec<(String, usize)>,

    /// Length of the merged sequence
    pub merged_lines: usize,

    /// Sinks that completed their write
    pub sinks_succeeded: Vec<String>,

    /// Sinks whose write failed, with the cause
    pub sinks_failed: Vec<(String, String)>,
}

impl RunMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_collected(&mut self, source_name: &str, lines: usize) {
        self.collected.push((source_name.to_string(), lines));
    }

    pub fn record_merged(&mut self, lines: usize) {
        self.merged_lines = lines;
    }

    pub fn record_sink(&mut self, sink_name: &str, error: Option<String>) {
        match error {
            None => self.sinks_succeeded.push(sink_name.to_string()),
            Some(cause) => self.sinks_failed.push((sink_name.to_string(), cause)),
        }
    }

    /// Sum of all collected lines
    pub fn total_collected(&self) -> usize {
        self.collected.iter().map(|(_, n)| n).sum()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            sources: self.collected.len(),
            total_collected: self.total_collected(),
            merged_lines: self.merged_lines,
            sinks_succeeded: self.sinks_succeeded.len(),
            sinks_failed: self.sinks_failed.len(),
            failures: self.sinks_failed.clone(),
        }
    }
}

/// Summary report
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub sources: usize,
    pub total_collected: usize,
    pub merged_lines: usize,
    pub sinks_succeeded: usize,
    pub sinks_failed: usize,
    pub failures: Vec<(String, String)>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run Summary ===")?;
        writeln!(
            f,
            "Collected lines: {} from {} sources",
            self.total_collected, self.sources
        )?;
        writeln!(f, "Merged lines: {}", self.merged_lines)?;
        writeln!(
            f,
            "Sinks: {} succeeded, {} failed",
            self.sinks_succeeded, self.sinks_failed
        )?;
        for (sink, cause) in &self.failures {
            writeln!(f, "  {}: {}", sink, cause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregator_summary() {
        let mut agg = RunMetricsAggregator::new();
        agg.record_collected("console", 2);
        agg.record_collected("input_file", 3);
        agg.record_merged(5);
        agg.record_sink("console", None);
        agg.record_sink("output_file", Some("permission denied".to_string()));

        let summary = agg.summary();
        assert_eq!(summary.sources, 2);
        assert_eq!(summary.total_collected, 5);
        assert_eq!(summary.merged_lines, 5);
        assert_eq!(summary.sinks_succeeded, 1);
        assert_eq!(summary.sinks_failed, 1);

        let text = summary.to_string();
        assert!(text.contains("output_file: permission denied"));
    }

    #[test]
    fn test_recorders_without_installed_recorder() {
        record_lines_collected("console", 3);
        record_merge("union", 3);
        record_sink_dispatch("console", true);
        record_sink_latency_ms("console", 0.5);
    }
}
