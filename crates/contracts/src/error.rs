//! Layered error definitions
//!
//! Categorized by stage: config / source / sink

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Source Errors =====
    /// Source read error
    #[error("source '{source_name}' read error: {message}")]
    SourceRead {
        source_name: String,
        message: String,
    },

    /// Input ended before the source reached its terminal condition
    #[error("source '{source_name}' reached end of input before the sentinel line")]
    UnexpectedEof { source_name: String },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create source read error
    pub fn source_read(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceRead {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create unexpected end-of-input error
    pub fn unexpected_eof(source_name: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            source_name: source_name.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error belongs to the configuration stage
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigParse { .. } | Self::ConfigValidation { .. })
    }
}
