//! LineSource trait - input side of the pipeline
//!
//! Defines a unified interface for line sources, decoupling the collect stage
//! from concrete inputs (interactive console, flat files, in-memory fixtures).

use std::sync::Arc;

use crate::{ContractError, Lines};

/// Shared handle to a source.
///
/// A component that is also a sink is held by both lists through the same `Arc`.
pub type SharedSource = Arc<dyn LineSource>;

/// Line source trait
///
/// # Example
///
/// ```ignore
/// let source: SharedSource = Arc::new(FileSource::new("input", "input.txt"));
/// let lines = source.read()?;
/// ```
pub trait LineSource: Send + Sync {
    /// Source name (used for logging/errors)
    fn name(&self) -> &str;

    /// Produce the complete ordered sequence of this source.
    ///
    /// Blocks until the source reaches its terminal condition (sentinel line or
    /// end of file). Line terminators are stripped from every element.
    ///
    /// # Errors
    /// Any read failure before the terminal condition; the run treats it as fatal.
    fn read(&self) -> Result<Lines, ContractError>;
}
