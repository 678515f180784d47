//! # Observability
//!
//! Tracing initialisation and run metrics.
//!
//! ## Features
//!
//! - Tracing setup (JSON / Pretty / Compact), always written to stderr so that
//!   stdout only carries the merged output of the console sink
//! - Counters over the `metrics` facade
//! - In-memory aggregation for the end-of-run summary
//!
//! ## Usage Example
//!
//! ```ignore
//! use observability::{init_with_config, ObservabilityConfig, LogFormat};
//!
//! init_with_config(ObservabilityConfig {
//!     log_format: LogFormat::Compact,
//!     ..Default::default()
//! })?;
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Re-exports
pub use crate::metrics::{
    record_lines_collected, record_merge, record_sink_dispatch, record_sink_latency_ms,
    RunMetricsAggregator, RunSummary,
};

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Default level when `RUST_LOG` is not set
    pub default_log_level: String,
    /// Ignore `RUST_LOG` and use `default_log_level` as-is
    pub force_level: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            default_log_level: "info".to_string(),
            force_level: false,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Initialise tracing with a custom configuration
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = if config.force_level {
        EnvFilter::new(&config.default_log_level)
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level))
    };

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(log_format = ?config.log_format, "Observability initialized");

    Ok(())
}
