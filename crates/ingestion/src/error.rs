//! Ingestion error types

use contracts::ContractError;
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestionError {
    /// A source failed while producing its sequence
    #[error("failed to collect from source '{source_name}'")]
    Collect {
        /// Source name
        source_name: String,
        /// Underlying read error
        #[source]
        error: ContractError,
    },

    /// The blocking read task did not complete
    #[error("read task for source '{source_name}' aborted: {message}")]
    Join {
        /// Source name
        source_name: String,
        /// Join error message
        message: String,
    },
}

impl IngestionError {
    /// Name of the source that failed
    pub fn source_name(&self) -> &str {
        match self {
            Self::Collect { source_name, .. } | Self::Join { source_name, .. } => source_name,
        }
    }
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;
