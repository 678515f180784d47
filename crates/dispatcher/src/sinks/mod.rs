//! Sink implementations
//!
//! Contains FileSink, LogSink, and MockSink.

mod file;
mod log;
mod mock;

pub use self::file::{FileSink, FileSinkConfig};
pub use self::log::LogSink;
pub use self::mock::{MockSink, Rendezvous};
