//! MockSink - records what it receives, optionally failing

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use contracts::{ContractError, LineSink};

/// Meeting point for `parties` concurrent writers that gives up after `patience`
#[derive(Debug)]
pub struct Rendezvous {
    arrived: Mutex<usize>,
    all_arrived: Condvar,
    parties: usize,
    patience: Duration,
}

impl Rendezvous {
    pub fn new(parties: usize, patience: Duration) -> Self {
        Self {
            arrived: Mutex::new(0),
            all_arrived: Condvar::new(),
            parties,
            patience,
        }
    }

    /// Arrive and wait for the others; false if they did not all show up in time
    pub fn wait(&self) -> bool {
        let mut arrived = self
            .arrived
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *arrived += 1;
        self.all_arrived.notify_all();
        let (arrived, _) = self
            .all_arrived
            .wait_timeout_while(arrived, self.patience, |n| *n < self.parties)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *arrived >= self.parties
    }
}

/// In-memory sink for tests
#[derive(Debug)]
pub struct MockSink {
    name: String,
    received: Mutex<Option<Vec<String>>>,
    write_count: AtomicU64,
    failure: Option<String>,
    rendezvous: Option<Arc<Rendezvous>>,
}

impl MockSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            received: Mutex::new(None),
            write_count: AtomicU64::new(0),
            failure: None,
            rendezvous: None,
        }
    }

    /// Sink whose every write fails with `message`
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(name)
        }
    }

    /// Block inside `write` until every party of `rendezvous` is writing too.
    /// The write fails if the others never arrive.
    pub fn with_rendezvous(mut self, rendezvous: Arc<Rendezvous>) -> Self {
        self.rendezvous = Some(rendezvous);
        self
    }

    /// Lines of the last successful write
    pub fn received(&self) -> Option<Vec<String>> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `write` calls, including failed ones
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::SeqCst)
    }
}

impl LineSink for MockSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, lines: &[String]) -> Result<(), ContractError> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        if let Some(rendezvous) = &self.rendezvous {
            if !rendezvous.wait() {
                return Err(ContractError::sink_write(
                    &self.name,
                    "other writers never arrived",
                ));
            }
        }
        if let Some(message) = &self.failure {
            return Err(ContractError::sink_write(&self.name, message.clone()));
        }
        *self
            .received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(lines.to_vec());
        Ok(())
    }
}
