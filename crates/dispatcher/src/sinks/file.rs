//! FileSink - writes the merged sequence to a newline-delimited text file

use contracts::{ContractError, LineSink, DEFAULT_OUTPUT_FILE, PATH_PARAM};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

/// Configuration for FileSink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Output file; truncated on write
    pub path: PathBuf,
}

impl FileSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let path = params
            .get(PATH_PARAM)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

        Self { path }
    }
}

/// Sink that writes one line per element to a file
pub struct FileSink {
    name: String,
    config: FileSinkConfig,
}

impl FileSink {
    /// Create a new FileSink
    ///
    /// Nothing touches the disk until `write`, so an unwritable path surfaces
    /// as an isolated sink failure rather than a startup error.
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Create from params map (for factory)
    pub fn from_params(name: impl Into<String>, params: &HashMap<String, String>) -> Self {
        Self::new(name, FileSinkConfig::from_params(params))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn write_lines_to_disk(&self, lines: &[String]) -> std::io::Result<()> {
        if let Some(parent) = self
            .config
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = BufWriter::new(File::create(&self.config.path)?);
        for line in lines {
            writeln!(file, "{}", line)?;
        }
        file.flush()?;
        file.get_ref().sync_all()
    }
}

impl LineSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_write",
        skip(self, lines),
        fields(sink = %self.name, path = %self.config.path.display(), lines = lines.len())
    )]
    fn write(&self, lines: &[String]) -> Result<(), ContractError> {
        self.write_lines_to_disk(lines).map_err(|e| {
            error!(sink = %self.name, error = %e, "Write failed");
            ContractError::sink_write(
                &self.name,
                format!("{}: {}", self.config.path.display(), e),
            )
        })?;
        debug!(sink = %self.name, "FileSink written");
        Ok(())
    }
}
