//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contracts::{DispatchMode, InterleavePolicy};

/// Line Scrambler - interleave console and file input, fan out to every sink
#[derive(Parser, Debug)]
#[command(
    name = "scrambler",
    author,
    version,
    about = "Interleave lines from several inputs and broadcast the result",
    long_about = "Reads the console until the sentinel line, reads the input file, \n\
                  interleaves both by line index and writes the merged sequence \n\
                  to the console and the output file concurrently."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SCRAMBLER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SCRAMBLER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect, merge and dispatch once
    Run(RunArgs),

    /// Validate a blueprint file without running
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone, Default)]
pub struct RunArgs {
    /// File read as the second source (required without --config)
    #[arg(short, long, env = "SCRAMBLER_INPUT_FILE")]
    pub input_file: Option<PathBuf>,

    /// File the merged sequence is written to [default: ./test.out]
    #[arg(short, long, env = "SCRAMBLER_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Blueprint file (TOML or JSON) describing sources and sinks
    #[arg(short, long, env = "SCRAMBLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interleave policy
    #[arg(long, value_enum, env = "SCRAMBLER_POLICY")]
    pub policy: Option<PolicyArg>,

    /// Sink dispatch topology
    #[arg(long, value_enum, env = "SCRAMBLER_DISPATCH")]
    pub dispatch: Option<DispatchArg>,

    /// Line that ends console input
    #[arg(long, env = "SCRAMBLER_SENTINEL")]
    pub sentinel: Option<String>,

    /// Assemble and validate configuration, print the topology, and exit
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print only the resolved blueprint as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the blueprint file to validate
    #[arg(short, long, default_value = "scrambler.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Interleave policy flag
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PolicyArg {
    /// Round-robin by line index
    Union,
    /// Legacy wave-by-wave merge
    Waves,
}

impl From<PolicyArg> for InterleavePolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Union => Self::Union,
            PolicyArg::Waves => Self::Waves,
        }
    }
}

/// Dispatch topology flag
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DispatchArg {
    /// Spawn one writer per sink after the merge
    Direct,
    /// Launch waiting writers before collecting
    Staged,
}

impl From<DispatchArg> for DispatchMode {
    fn from(mode: DispatchArg) -> Self {
        match mode {
            DispatchArg::Direct => Self::Direct,
            DispatchArg::Staged => Self::Staged,
        }
    }
}
