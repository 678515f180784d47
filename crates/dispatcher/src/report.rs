//! Dispatch report - per-sink outcomes of one run

use std::time::{Duration, Instant};

use contracts::LineSink;
use observability::{record_sink_dispatch, record_sink_latency_ms};
use tracing::{error, info};

/// Outcome of one sink dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// Every line was emitted
    Written { lines: usize, elapsed: Duration },
    /// The write failed; the cause is kept for the summary
    Failed { error: String },
    /// The sink never received a merged sequence (collect aborted)
    Skipped,
}

/// Outcome of one sink, tagged with its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    pub sink: String,
    pub outcome: SinkOutcome,
}

impl SinkReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SinkOutcome::Written { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, SinkOutcome::Failed { .. })
    }
}

/// Outcomes of every sink of one dispatch, in sink-set order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub sinks: Vec<SinkReport>,
}

impl DispatchReport {
    pub fn succeeded(&self) -> usize {
        self.sinks.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.sinks.iter().filter(|r| r.is_failure()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.sinks.iter().all(SinkReport::is_success)
    }

    /// Failed sinks with their causes
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sinks.iter().filter_map(|r| match &r.outcome {
            SinkOutcome::Failed { error } => Some((r.sink.as_str(), error.as_str())),
            _ => None,
        })
    }

    pub fn get(&self, sink: &str) -> Option<&SinkOutcome> {
        self.sinks
            .iter()
            .find(|r| r.sink == sink)
            .map(|r| &r.outcome)
    }
}

/// Write `lines` to one sink and turn the result into an outcome.
///
/// Runs on a blocking worker. Failures are logged here with the sink's name
/// and never propagated.
pub(crate) fn write_to_sink(sink: &dyn LineSink, lines: &[String]) -> SinkReport {
    let name = sink.name().to_string();
    info!(sink = %name, lines = lines.len(), "Started writing output");

    let started = Instant::now();
    let outcome = match sink.write(lines) {
        Ok(()) => {
            let elapsed = started.elapsed();
            record_sink_latency_ms(&name, elapsed.as_secs_f64() * 1000.0);
            SinkOutcome::Written {
                lines: lines.len(),
                elapsed,
            }
        }
        Err(e) => {
            error!(sink = %name, error = %e, "Error while writing output");
            SinkOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    record_sink_dispatch(&name, matches!(outcome, SinkOutcome::Written { .. }));
    info!(sink = %name, "Finished writing output");

    SinkReport {
        sink: name,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(sink: &str, outcome: SinkOutcome) -> SinkReport {
        SinkReport {
            sink: sink.to_string(),
            outcome,
        }
    }

    #[test]
    fn test_report_counts() {
        let report = DispatchReport {
            sinks: vec![
                report(
                    "console",
                    SinkOutcome::Written {
                        lines: 3,
                        elapsed: Duration::ZERO,
                    },
                ),
                report(
                    "file",
                    SinkOutcome::Failed {
                        error: "disk full".to_string(),
                    },
                ),
                report("log", SinkOutcome::Skipped),
            ],
        };

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().collect::<Vec<_>>(), vec![("file", "disk full")]);
        assert_eq!(report.get("log"), Some(&SinkOutcome::Skipped));
        assert_eq!(report.get("missing"), None);
    }

    #[test]
    fn test_empty_report_succeeds() {
        assert!(DispatchReport::default().all_succeeded());
    }
}
