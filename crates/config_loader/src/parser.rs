//! Blueprint decoding and encoding
//!
//! TOML is the primary format; JSON is accepted for generated blueprints.

use std::error::Error;
use std::path::Path;

use contracts::{ContractError, ScrambleBlueprint};

type BoxError = Box<dyn Error + Send + Sync>;

/// Blueprint file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format for a file extension, case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Format of a blueprint file, from its extension
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse(format!(
                "{} has no extension, expected .toml or .json",
                path.display()
            ))
        })?;
        Self::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    /// Decode a blueprint; validation is left to the caller
    pub fn decode(self, content: &str) -> Result<ScrambleBlueprint, ContractError> {
        let decoded: Result<ScrambleBlueprint, BoxError> = match self {
            Self::Toml => toml::from_str(content).map_err(Into::into),
            Self::Json => serde_json::from_str(content).map_err(Into::into),
        };
        decoded.map_err(|source| ContractError::ConfigParse {
            message: format!("invalid {} blueprint: {source}", self.name()),
            source: Some(source),
        })
    }

    /// Encode a blueprint in this format
    pub fn encode(self, blueprint: &ScrambleBlueprint) -> Result<String, ContractError> {
        let encoded: Result<String, BoxError> = match self {
            Self::Toml => toml::to_string_pretty(blueprint).map_err(Into::into),
            Self::Json => serde_json::to_string_pretty(blueprint).map_err(Into::into),
        };
        encoded.map_err(|source| ContractError::ConfigParse {
            message: format!("cannot encode blueprint as {}: {source}", self.name()),
            source: Some(source),
        })
    }
}
