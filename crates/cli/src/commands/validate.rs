//! `validate` command: load a blueprint, report its topology and lint it.

use std::path::Path;

use anyhow::{bail, Context, Result};
use config_loader::ConfigLoader;
use contracts::{ScrambleBlueprint, SinkType, SourceType};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Verdict {
    Valid {
        config: String,
        topology: Topology,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
    Invalid {
        config: String,
        error: String,
    },
}

/// Names in interleave and dispatch order
#[derive(Debug, Serialize)]
struct Topology {
    policy: String,
    dispatch: String,
    sentinel: String,
    sources: Vec<String>,
    sinks: Vec<String>,
}

impl From<&ScrambleBlueprint> for Topology {
    fn from(blueprint: &ScrambleBlueprint) -> Self {
        Self {
            policy: blueprint.merge.policy.to_string(),
            dispatch: blueprint.merge.dispatch.to_string(),
            sentinel: blueprint.merge.sentinel.clone(),
            sources: blueprint.sources.iter().map(|s| s.name.clone()).collect(),
            sinks: blueprint.sinks.iter().map(|s| s.name.clone()).collect(),
        }
    }
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let verdict = check(&args.config);
    if args.json {
        let json =
            serde_json::to_string_pretty(&verdict).context("Failed to serialize verdict")?;
        println!("{json}");
    } else {
        print_verdict(&verdict);
    }

    match verdict {
        Verdict::Valid { .. } => Ok(()),
        Verdict::Invalid { error, .. } => bail!("Configuration validation failed: {error}"),
    }
}

fn check(path: &Path) -> Verdict {
    let config = path.display().to_string();
    if !path.exists() {
        return Verdict::Invalid {
            error: format!("File not found: {config}"),
            config,
        };
    }

    match ConfigLoader::load_from_path(path) {
        Ok(blueprint) => Verdict::Valid {
            config,
            topology: Topology::from(&blueprint),
            warnings: lint(&blueprint),
        },
        Err(e) => Verdict::Invalid {
            config,
            error: e.to_string(),
        },
    }
}

/// Legal but probably unintended settings
fn lint(blueprint: &ScrambleBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.sources.is_empty() {
        warnings.push("No sources configured, every sink receives an empty sequence".to_string());
    }
    if blueprint.sinks.is_empty() {
        warnings.push("No sinks configured, the merged sequence is discarded".to_string());
    }

    warnings.extend(
        blueprint
            .sinks
            .iter()
            .filter(|s| s.sink_type == SinkType::File && s.path().is_none())
            .map(|s| format!("File sink '{}' has no path, writing to ./test.out", s.name)),
    );

    let reads_console = blueprint
        .sources
        .iter()
        .any(|s| s.source_type == SourceType::Console);
    let echoes_console = blueprint
        .sinks
        .iter()
        .any(|s| s.sink_type == SinkType::Console);
    if reads_console && !echoes_console {
        warnings.push("Console is read but the merged sequence is not echoed to it".to_string());
    }

    warnings
}

fn print_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Valid {
            config,
            topology,
            warnings,
        } => {
            println!("✓ {config} is valid\n");
            println!("  Policy:   {}", topology.policy);
            println!("  Dispatch: {}", topology.dispatch);
            println!("  Sentinel: {:?}", topology.sentinel);
            println!("  Sources:  [{}]", topology.sources.join(", "));
            println!("  Sinks:    [{}]", topology.sinks.join(", "));
            for warning in warnings {
                println!("  ⚠ {warning}");
            }
        }
        Verdict::Invalid { config, error } => {
            println!("✗ {config} is invalid\n");
            println!("  {error}");
        }
    }
}
