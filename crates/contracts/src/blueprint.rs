//! ScrambleBlueprint - Config Loader output
//!
//! Describes one complete run: the ordered source set, the sink set, and the
//! merge/dispatch strategy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default path of the file sink
pub const DEFAULT_OUTPUT_FILE: &str = "./test.out";

/// Default terminal line of the interactive console
pub const DEFAULT_SENTINEL: &str = "quit";

/// Param key holding a file path for file sources and sinks
pub const PATH_PARAM: &str = "path";

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrambleBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Merge and dispatch strategy
    #[serde(default)]
    pub merge: MergeConfig,

    /// Ordered source set; order is the interleave priority
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Sink set; every sink receives the full merged sequence
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// Merge strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Interleave policy
    #[serde(default)]
    pub policy: InterleavePolicy,

    /// Sink dispatch topology
    #[serde(default)]
    pub dispatch: DispatchMode,

    /// Line that terminates the interactive console source
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            policy: InterleavePolicy::default(),
            dispatch: DispatchMode::default(),
            sentinel: default_sentinel(),
        }
    }
}

/// Interleave policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterleavePolicy {
    /// Round-robin by global index up to the longest sequence
    #[default]
    Union,
    /// Legacy: interleave in waves bounded by the shortest remaining sequence
    Waves,
}

impl InterleavePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Waves => "waves",
        }
    }
}

impl fmt::Display for InterleavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink dispatch topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Spawn one writer task per sink once the merge is done
    #[default]
    Direct,
    /// Launch writer tasks before collecting, each waiting on its own single-slot channel
    Staged,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Staged => f.write_str("staged"),
        }
    }
}

/// Source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source name
    pub name: String,

    /// Source type
    pub source_type: SourceType,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Interactive console (stdin), terminated by the sentinel line
    Console,
    /// Newline-delimited text file
    File,
}

/// Sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Interactive console (stdout), one line per element
    Console,
    /// Newline-delimited text file
    File,
    /// Tracing events
    Log,
}

impl SourceConfig {
    pub fn console(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_type: SourceType::Console,
            params: HashMap::new(),
        }
    }

    pub fn file(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            source_type: SourceType::File,
            params: path_params(path.as_ref()),
        }
    }

    /// Path parameter, if set and non-empty
    pub fn path(&self) -> Option<PathBuf> {
        param_path(&self.params)
    }
}

impl SinkConfig {
    pub fn console(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::Console,
            params: HashMap::new(),
        }
    }

    pub fn file(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::File,
            params: path_params(path.as_ref()),
        }
    }

    pub fn log(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::Log,
            params: HashMap::new(),
        }
    }

    /// Path parameter, if set and non-empty
    pub fn path(&self) -> Option<PathBuf> {
        param_path(&self.params)
    }
}

fn path_params(path: &Path) -> HashMap<String, String> {
    HashMap::from([(PATH_PARAM.to_string(), path.display().to_string())])
}

fn param_path(params: &HashMap<String, String>) -> Option<PathBuf> {
    params
        .get(PATH_PARAM)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

impl ScrambleBlueprint {
    /// Reference topology: console and input file as sources, console and
    /// output file as sinks.
    pub fn reference(input_file: impl AsRef<Path>, output_file: impl AsRef<Path>) -> Self {
        Self {
            version: ConfigVersion::V1,
            merge: MergeConfig::default(),
            sources: vec![
                SourceConfig::console("console"),
                SourceConfig::file("input_file", input_file),
            ],
            sinks: vec![
                SinkConfig::console("console"),
                SinkConfig::file("output_file", output_file),
            ],
        }
    }

    /// Whether the console component is used as a source or a sink
    pub fn uses_console(&self) -> bool {
        self.sources
            .iter()
            .any(|s| s.source_type == SourceType::Console)
            || self.sinks.iter().any(|s| s.sink_type == SinkType::Console)
    }
}
