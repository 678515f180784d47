//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Capability Model
//! - [`LineSource`]: produces one complete ordered sequence of lines
//! - [`LineSink`]: consumes one ordered sequence of lines and emits it
//! - A component that is both (the interactive console) implements both traits
//!   and is shared by reference between the source list and the sink list

mod blueprint;
mod error;
mod line_source;
mod lines;
mod sink;

pub use blueprint::*;
pub use error::*;
pub use line_source::{LineSource, SharedSource};
pub use lines::{Lines, MergedLines};
pub use sink::{LineSink, SharedSink};
