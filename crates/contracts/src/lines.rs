//! Line sequence types

use std::sync::Arc;

/// Ordered, finite sequence of text lines produced by one source.
///
/// Elements never contain line terminators.
pub type Lines = Vec<String>;

/// The merged sequence, published once and shared read-only by every sink.
pub type MergedLines = Arc<[String]>;
