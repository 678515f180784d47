//! # Dispatcher
//!
//! Sink-side fan-out.
//!
//! Responsibilities:
//! - Broadcast one merged sequence to every sink concurrently
//! - Isolate sink failures: a failed sink is logged and reported, never fatal
//! - Per-run completion barrier: dispatch returns only after every sink task
//!   has finished
//!
//! Two topologies produce the same ordering guarantees:
//! - [`Dispatcher::broadcast`]: spawn one blocking writer per sink after the merge
//! - [`Dispatcher::stage`]: launch writers up front, each waiting on its own
//!   single-slot channel, then [`StagedDispatch::publish`] the merged sequence

pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod report;
pub mod sinks;

pub use contracts::{LineSink, MergedLines, SharedSink};
pub use dispatcher::{create_sink, Dispatcher, StagedDispatch};
pub use error::DispatcherError;
pub use handle::SinkHandle;
pub use report::{DispatchReport, SinkOutcome, SinkReport};
pub use sinks::{FileSink, LogSink, MockSink};
