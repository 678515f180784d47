//! Dispatcher - concurrent fan-out of the merged sequence to sinks

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{error, info, instrument};

use contracts::{MergedLines, SharedSink, SinkConfig, SinkType};

use crate::error::DispatcherError;
use crate::handle::SinkHandle;
use crate::report::{write_to_sink, DispatchReport, SinkOutcome, SinkReport};
use crate::sinks::{FileSink, LogSink};

/// Create a standalone sink from configuration
///
/// Console sinks are not created here: the console is one component shared
/// with the source side, and the caller binds it.
#[instrument(
    name = "dispatcher_create_sink",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
pub fn create_sink(config: &SinkConfig) -> Result<SharedSink, DispatcherError> {
    match config.sink_type {
        SinkType::Log => Ok(Arc::new(LogSink::new(&config.name))),
        SinkType::File => Ok(Arc::new(FileSink::from_params(&config.name, &config.params))),
        SinkType::Console => Err(DispatcherError::sink_creation(
            &config.name,
            "console sinks must be bound to the shared console component",
        )),
    }
}

/// The Dispatcher that broadcasts one merged sequence to every sink
///
/// Each call to [`broadcast`](Self::broadcast) or [`stage`](Self::stage) owns
/// its own completion barrier, so concurrent runs never share state.
#[derive(Clone, Default)]
pub struct Dispatcher {
    sinks: Vec<SharedSink>,
}

impl Dispatcher {
    pub fn new(sinks: Vec<SharedSink>) -> Self {
        Self { sinks }
    }

    /// Registered sink names, in order
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Write `merged` to every sink in parallel and wait for all of them.
    ///
    /// One blocking task per sink; a failing sink does not cancel the others.
    /// Returns once every task has completed, with outcomes in sink order.
    #[instrument(
        name = "dispatcher_broadcast",
        skip(self, merged),
        fields(sinks = self.sinks.len(), lines = merged.len())
    )]
    pub async fn broadcast(&self, merged: MergedLines) -> DispatchReport {
        info!("Dispatching merged sequence");

        let mut barrier = JoinSet::new();
        for (index, sink) in self.sinks.iter().enumerate() {
            let sink = Arc::clone(sink);
            let lines = Arc::clone(&merged);
            barrier.spawn_blocking(move || (index, write_to_sink(sink.as_ref(), &lines)));
        }

        let mut slots: Vec<Option<SinkReport>> = vec![None; self.sinks.len()];
        while let Some(joined) = barrier.join_next().await {
            match joined {
                Ok((index, report)) => slots[index] = Some(report),
                Err(e) => error!(error = ?e, "Write task panicked"),
            }
        }

        let sinks = slots
            .into_iter()
            .zip(&self.sinks)
            .map(|(slot, sink)| {
                slot.unwrap_or_else(|| SinkReport {
                    sink: sink.name().to_string(),
                    outcome: SinkOutcome::Failed {
                        error: "write task panicked".to_string(),
                    },
                })
            })
            .collect();

        let report = DispatchReport { sinks };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Dispatch complete"
        );
        report
    }

    /// Launch one waiting worker per sink before the merged sequence exists.
    ///
    /// Nothing is written until [`StagedDispatch::publish`]; dropping or
    /// [`abandon`](StagedDispatch::abandon)ing the stage leaves every sink
    /// untouched.
    #[instrument(name = "dispatcher_stage", skip(self), fields(sinks = self.sinks.len()))]
    pub fn stage(&self) -> StagedDispatch {
        let handles = self
            .sinks
            .iter()
            .map(|sink| SinkHandle::spawn(Arc::clone(sink)))
            .collect();
        info!("Sink workers launched, waiting for merged sequence");
        StagedDispatch { handles }
    }
}

/// Sink workers launched ahead of the merge
pub struct StagedDispatch {
    handles: Vec<SinkHandle>,
}

impl StagedDispatch {
    /// Names of the waiting sinks
    pub fn sink_names(&self) -> Vec<String> {
        self.handles.iter().map(|h| h.name().to_string()).collect()
    }

    /// Push `merged` into every worker's channel and wait for all of them
    #[instrument(
        name = "dispatcher_publish",
        skip(self, merged),
        fields(sinks = self.handles.len(), lines = merged.len())
    )]
    pub async fn publish(self, merged: MergedLines) -> DispatchReport {
        let pending: Vec<_> = self
            .handles
            .into_iter()
            .map(|handle| handle.deliver(Arc::clone(&merged)))
            .collect();

        let mut sinks = Vec::with_capacity(pending.len());
        for worker in pending {
            sinks.push(worker.join().await);
        }

        let report = DispatchReport { sinks };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Dispatch complete"
        );
        report
    }

    /// Close every channel without delivering and wait for the workers to exit
    #[instrument(name = "dispatcher_abandon", skip(self), fields(sinks = self.handles.len()))]
    pub async fn abandon(self) -> DispatchReport {
        let pending: Vec<_> = self.handles.into_iter().map(SinkHandle::cancel).collect();

        let mut sinks = Vec::with_capacity(pending.len());
        for worker in pending {
            sinks.push(worker.join().await);
        }

        info!("Staged dispatch abandoned, no sink written");
        DispatchReport { sinks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{MockSink, Rendezvous};
    use contracts::LineSink;
    use std::time::Duration;

    fn merged(items: &[&str]) -> MergedLines {
        items.iter().map(|s| s.to_string()).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_create_sink_from_config() {
        let sink = create_sink(&SinkConfig::log("log")).unwrap();
        assert_eq!(sink.name(), "log");

        let sink = create_sink(&SinkConfig::file("out", "out.txt")).unwrap();
        assert_eq!(sink.name(), "out");

        let err = create_sink(&SinkConfig::console("console")).err().unwrap();
        assert!(matches!(err, DispatcherError::SinkCreation { .. }));
    }

    #[tokio::test]
    async fn test_broadcast_fanout() {
        let sink1 = Arc::new(MockSink::new("sink1"));
        let sink2 = Arc::new(MockSink::new("sink2"));
        let dispatcher = Dispatcher::new(vec![sink1.clone(), sink2.clone()]);
        assert_eq!(dispatcher.sink_names(), vec!["sink1", "sink2"]);

        let report = dispatcher.broadcast(merged(&["a", "b", "c"])).await;

        assert!(report.all_succeeded());
        assert_eq!(report.sinks[0].sink, "sink1");
        assert_eq!(report.sinks[1].sink, "sink2");
        assert_eq!(sink1.received(), sink2.received());
        assert_eq!(sink1.received().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_broadcast_isolates_failure() {
        let good = Arc::new(MockSink::new("good"));
        let bad = Arc::new(MockSink::failing("bad", "disk full"));
        let dispatcher = Dispatcher::new(vec![bad.clone(), good.clone()]);

        let report = dispatcher.broadcast(merged(&["x"])).await;

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(good.received().unwrap(), vec!["x"]);
        assert_eq!(
            report.get("bad"),
            Some(&SinkOutcome::Failed {
                error: "sink 'bad' write error: disk full".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_broadcast_writes_concurrently() {
        // Both writes must be in flight at once to pass the rendezvous.
        let rendezvous = Arc::new(Rendezvous::new(2, Duration::from_secs(5)));
        let sink1 = Arc::new(MockSink::new("sink1").with_rendezvous(rendezvous.clone()));
        let sink2 = Arc::new(MockSink::new("sink2").with_rendezvous(rendezvous));
        let dispatcher = Dispatcher::new(vec![sink1, sink2]);

        let report = tokio::time::timeout(
            Duration::from_secs(10),
            dispatcher.broadcast(merged(&["x"])),
        )
        .await
        .expect("broadcast did not finish");
        assert!(report.all_succeeded(), "writes were serialized: {report:?}");
    }

    #[test]
    fn test_rendezvous_gives_up_alone() {
        let rendezvous = Rendezvous::new(2, Duration::from_millis(20));
        assert!(!rendezvous.wait());

        let sink = MockSink::new("lonely").with_rendezvous(Arc::new(Rendezvous::new(
            2,
            Duration::from_millis(20),
        )));
        let err = sink.write(&["x".to_string()]).unwrap_err();
        assert!(err.to_string().contains("never arrived"));
    }

    #[tokio::test]
    async fn test_broadcast_without_sinks() {
        let report = Dispatcher::default().broadcast(merged(&["x"])).await;
        assert!(report.sinks.is_empty());
    }

    #[tokio::test]
    async fn test_staged_publish() {
        let sink1 = Arc::new(MockSink::new("sink1"));
        let sink2 = Arc::new(MockSink::failing("sink2", "mock failure"));
        let staged = Dispatcher::new(vec![sink1.clone(), sink2.clone()]).stage();
        assert_eq!(staged.sink_names(), vec!["sink1", "sink2"]);

        // Workers are waiting; nothing has been written yet.
        tokio::task::yield_now().await;
        assert_eq!(sink1.write_count(), 0);

        let report = staged.publish(merged(&["a", "b"])).await;
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(sink1.received().unwrap(), vec!["a", "b"]);
        assert_eq!(sink2.write_count(), 1);
    }

    #[tokio::test]
    async fn test_staged_abandon_writes_nothing() {
        let sink = Arc::new(MockSink::new("sink"));
        let staged = Dispatcher::new(vec![sink.clone()]).stage();

        let report = staged.abandon().await;

        assert_eq!(report.get("sink"), Some(&SinkOutcome::Skipped));
        assert_eq!(sink.write_count(), 0);
    }
}
