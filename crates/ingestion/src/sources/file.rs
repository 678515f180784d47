//! FileSource - reads a newline-delimited text file

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use contracts::{ContractError, LineSource, Lines, PATH_PARAM};
use tracing::{debug, instrument};

/// Source yielding one element per line of a text file
///
/// `\n` and `\r\n` terminators are stripped; a last line without terminator
/// still counts as a line.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let path = params
            .get(PATH_PARAM)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                ContractError::config_validation(
                    format!("sources[{}].params.{}", name, PATH_PARAM),
                    "file source requires a path",
                )
            })?;
        Ok(Self::new(name, path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_source_read",
        skip(self),
        fields(source = %self.name, path = %self.path.display())
    )]
    fn read(&self) -> Result<Lines, ContractError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            ContractError::source_read(&self.name, format!("{}: {}", self.path.display(), e))
        })?;
        let lines: Lines = content.lines().map(str::to_owned).collect();
        debug!(source = %self.name, lines = lines.len(), "File read");
        Ok(lines)
    }
}
