//! Ingestion Pipeline main entry

use std::sync::Arc;

use contracts::{Lines, SharedSource};
use observability::record_lines_collected;
use tracing::{debug, info, instrument};

use crate::error::{IngestionError, Result};

/// Ingestion Pipeline
///
/// Holds the ordered source set. Registration order is the interleave
/// priority order.
#[derive(Default)]
pub struct IngestionPipeline {
    sources: Vec<SharedSource>,
}

impl IngestionPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an already ordered source set
    pub fn with_sources(sources: Vec<SharedSource>) -> Self {
        Self { sources }
    }

    /// Register a source at the end of the priority order
    #[instrument(
        name = "ingestion_register_source",
        skip(self, source),
        fields(source = %source.name())
    )]
    pub fn register_source(&mut self, source: SharedSource) {
        debug!(position = self.sources.len(), "registered line source");
        self.sources.push(source);
    }

    /// Registered source names, in order
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Collect every source's sequence, one source at a time, in order.
    ///
    /// Each blocking `read` runs on the blocking pool while the calling task
    /// waits for it, so sources never overlap. The first failure aborts the
    /// collection and later sources are never read.
    ///
    /// # Errors
    /// [`IngestionError::Collect`] naming the failing source
    #[instrument(name = "ingestion_collect_all", skip(self), fields(sources = self.sources.len()))]
    pub async fn collect_all(&self) -> Result<Vec<Lines>> {
        let mut collected = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let name = source.name().to_string();
            info!(source = %name, "Started reading input");

            let task_source = Arc::clone(source);
            let lines = tokio::task::spawn_blocking(move || task_source.read())
                .await
                .map_err(|e| IngestionError::Join {
                    source_name: name.clone(),
                    message: e.to_string(),
                })?
                .map_err(|error| IngestionError::Collect {
                    source_name: name.clone(),
                    error,
                })?;

            info!(source = %name, lines = lines.len(), "Finished reading input");
            record_lines_collected(&name, lines.len());
            collected.push(lines);
        }

        Ok(collected)
    }
}
