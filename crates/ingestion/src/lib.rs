//! # Ingestion Pipeline
//!
//! Line source ingestion module.
//!
//! Responsibilities:
//! - Concrete sources: interactive console and newline-delimited files
//! - Register sources in interleave priority order
//! - Collect every source's complete sequence, sequentially and fail-fast
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::{ConsoleIo, FileSource, IngestionPipeline};
//!
//! let console = Arc::new(ConsoleIo::stdio("console"));
//! let mut pipeline = IngestionPipeline::new();
//! pipeline.register_source(console.clone());
//! pipeline.register_source(Arc::new(FileSource::new("input", "input.txt")));
//!
//! let sequences = pipeline.collect_all().await?;
//! ```
//!
//! ## Mock Testing
//!
//! ```ignore
//! use ingestion::MockLineSource;
//!
//! let source = MockLineSource::new("fixture", ["a", "b"]);
//! ```

mod error;
mod mock;
mod pipeline;
mod sources;

// Re-exports
pub use contracts::{LineSource, Lines, SharedSource};
pub use error::{IngestionError, Result};
pub use mock::MockLineSource;
pub use pipeline::IngestionPipeline;
pub use sources::{ConsoleIo, FileSource};
