//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Neither `--input-file` nor a blueprint file was given
    #[error("missing input file: pass --input-file <PATH>, set SCRAMBLER_INPUT_FILE, or use --config")]
    MissingInputFile,

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// A component named by the blueprint could not be built
    #[error("Failed to construct '{name}': {message}")]
    Construct { name: String, message: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn construct(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Construct {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
