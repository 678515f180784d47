//! # Config Loader
//!
//! Turns a blueprint file into a validated [`ScrambleBlueprint`].
//!
//! The format follows the file extension (`.toml` or `.json`). Every load is
//! decode then validate; the first broken rule is reported.
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("scrambler.toml")).unwrap();
//! println!("Sources: {}", blueprint.sources.len());
//! ```

mod parser;
mod validator;

pub use contracts::ScrambleBlueprint;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;
use tracing::debug;

/// Blueprint loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read, decode and validate a blueprint file
    pub fn load_from_path(path: &Path) -> Result<ScrambleBlueprint, ContractError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| ContractError::ConfigParse {
            message: format!("cannot read {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
        debug!(path = %path.display(), format = format.name(), "Loading blueprint");
        Self::load_from_str(&content, format)
    }

    /// Decode and validate blueprint text
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ScrambleBlueprint, ContractError> {
        let blueprint = format.decode(content)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Validate a blueprint assembled elsewhere (e.g. from CLI flags)
    pub fn validate(blueprint: &ScrambleBlueprint) -> Result<(), ContractError> {
        validator::validate(blueprint)
    }

    /// Render a blueprint back to text
    pub fn render(
        blueprint: &ScrambleBlueprint,
        format: ConfigFormat,
    ) -> Result<String, ContractError> {
        format.encode(blueprint)
    }
}
