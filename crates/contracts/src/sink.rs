//! LineSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for Sinks.

use std::sync::Arc;

use crate::ContractError;

/// Shared handle to a sink.
pub type SharedSink = Arc<dyn LineSink>;

/// Data output trait
///
/// All sink implementations must implement this trait. Implementations run on a
/// blocking worker thread and may perform synchronous I/O.
pub trait LineSink: Send + Sync {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Emit every line, in order, followed by a line terminator
    ///
    /// Called at most once per run for a given sink instance.
    ///
    /// # Errors
    /// Returns the first write error encountered (should include context)
    fn write(&self, lines: &[String]) -> Result<(), ContractError>;
}
