//! Dispatcher error types

use thiserror::Error;

/// Errors raised while building the sink set
///
/// Write failures are not errors at this level: they end up as
/// [`SinkOutcome::Failed`](crate::SinkOutcome::Failed) in the dispatch report.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// The sink config cannot be turned into a standalone sink
    #[error("cannot create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },
}

impl DispatcherError {
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
