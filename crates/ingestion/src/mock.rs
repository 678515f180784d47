//! Mock line source
//!
//! In-memory source for tests: returns a fixed sequence or a fixed failure,
//! and counts how often it was read.

use std::sync::atomic::{AtomicUsize, Ordering};

use contracts::{ContractError, LineSource, Lines};

/// In-memory line source
#[derive(Debug)]
pub struct MockLineSource {
    name: String,
    lines: Lines,
    failure: Option<String>,
    reads: AtomicUsize,
}

impl MockLineSource {
    /// Source returning `lines`
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
            failure: None,
            reads: AtomicUsize::new(0),
        }
    }

    /// Source whose every read fails with `message`
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
            failure: Some(message.into()),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of `read` calls so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl LineSource for MockLineSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Lines, ContractError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(ContractError::source_read(&self.name, message.clone())),
            None => Ok(self.lines.clone()),
        }
    }
}
