//! SinkHandle - a sink worker waiting on its own single-slot channel

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument, warn};

use contracts::{MergedLines, SharedSink};

use crate::report::{write_to_sink, SinkOutcome, SinkReport};

/// Handle to a launched sink worker
///
/// The worker blocks until the merged sequence arrives on its channel, writes
/// it, and exits. Dropping the sender without sending makes the worker exit
/// without touching the sink.
pub struct SinkHandle {
    /// Sink name
    name: String,
    /// Single-slot channel to the worker
    tx: oneshot::Sender<MergedLines>,
    /// Worker task handle
    worker_handle: JoinHandle<SinkReport>,
}

impl SinkHandle {
    /// Create a new SinkHandle and spawn the waiting worker task
    pub fn spawn(sink: SharedSink) -> Self {
        let name = sink.name().to_string();
        let (tx, rx) = oneshot::channel();

        let worker_handle = tokio::spawn(sink_worker(sink, rx));

        Self {
            name,
            tx,
            worker_handle,
        }
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hand the merged sequence to the worker and wait for its outcome
    pub fn deliver(self, lines: MergedLines) -> PendingSink {
        if self.tx.send(lines).is_err() {
            warn!(sink = %self.name, "Sink worker exited before delivery");
        }
        PendingSink {
            name: self.name,
            worker_handle: self.worker_handle,
        }
    }

    /// Close the channel without delivering; the worker exits unused
    pub fn cancel(self) -> PendingSink {
        drop(self.tx);
        PendingSink {
            name: self.name,
            worker_handle: self.worker_handle,
        }
    }
}

/// A worker whose channel is settled (delivered or closed)
pub struct PendingSink {
    name: String,
    worker_handle: JoinHandle<SinkReport>,
}

impl PendingSink {
    /// Wait for the worker to finish
    #[instrument(name = "sink_handle_join", skip(self), fields(sink = %self.name))]
    pub async fn join(self) -> SinkReport {
        match self.worker_handle.await {
            Ok(report) => report,
            Err(e) => {
                error!(sink = %self.name, error = ?e, "Worker task panicked");
                SinkReport {
                    sink: self.name,
                    outcome: SinkOutcome::Failed {
                        error: format!("worker task panicked: {e}"),
                    },
                }
            }
        }
    }
}

/// Worker task: wait for the merged sequence, then write it on the blocking pool
#[instrument(name = "sink_worker", skip(sink, rx), fields(sink = %sink.name()))]
async fn sink_worker(sink: SharedSink, rx: oneshot::Receiver<MergedLines>) -> SinkReport {
    debug!("Sink worker waiting for merged sequence");

    let Ok(lines) = rx.await else {
        debug!("Channel closed before delivery, sink left untouched");
        return SinkReport {
            sink: sink.name().to_string(),
            outcome: SinkOutcome::Skipped,
        };
    };

    let name = sink.name().to_string();
    let writer = Arc::clone(&sink);
    match tokio::task::spawn_blocking(move || write_to_sink(writer.as_ref(), &lines)).await {
        Ok(report) => report,
        Err(e) => {
            error!(sink = %name, error = ?e, "Write task panicked");
            SinkReport {
                sink: name,
                outcome: SinkOutcome::Failed {
                    error: format!("write task panicked: {e}"),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MockSink;

    #[tokio::test]
    async fn test_deliver_writes_once() {
        let sink = Arc::new(MockSink::new("test"));
        let handle = SinkHandle::spawn(sink.clone());
        assert_eq!(handle.name(), "test");

        let lines: MergedLines = vec!["a".to_string(), "b".to_string()].into();
        let report = handle.deliver(lines).join().await;

        assert!(report.is_success());
        assert_eq!(sink.write_count(), 1);
        assert_eq!(sink.received(), Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn test_cancel_leaves_sink_untouched() {
        let sink = Arc::new(MockSink::new("test"));
        let report = SinkHandle::spawn(sink.clone()).cancel().join().await;

        assert_eq!(report.outcome, SinkOutcome::Skipped);
        assert_eq!(sink.write_count(), 0);
        assert_eq!(sink.received(), None);
    }

    #[tokio::test]
    async fn test_failure_isolation() {
        let sink = Arc::new(MockSink::failing("failing", "mock failure"));
        let report = SinkHandle::spawn(sink).deliver(vec!["x".to_string()].into()).join().await;

        assert!(report.is_failure());
        assert!(matches!(
            report.outcome,
            SinkOutcome::Failed { ref error } if error.contains("mock failure")
        ));
    }
}
