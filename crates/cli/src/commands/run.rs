//! `run` command implementation.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use config_loader::{ConfigFormat, ConfigLoader};
use contracts::{ScrambleBlueprint, SinkType, SourceType, DEFAULT_OUTPUT_FILE, PATH_PARAM};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::Pipeline;

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    let blueprint = assemble_blueprint(args)?;

    info!(
        sources = blueprint.sources.len(),
        sinks = blueprint.sinks.len(),
        policy = %blueprint.merge.policy,
        dispatch = %blueprint.merge.dispatch,
        "Configuration loaded"
    );

    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print!("{}", render_dry_run(&blueprint, args.json)?);
        return Ok(());
    }

    let pipeline = Pipeline::construct(&blueprint).context("Failed to construct pipeline")?;

    let stats = pipeline.run().await.context("Pipeline execution failed")?;
    info!(
        merged_lines = stats.run_metrics.merged_lines,
        sinks_succeeded = stats.report.succeeded(),
        sinks_failed = stats.report.failed(),
        duration_secs = stats.duration.as_secs_f64(),
        "Pipeline completed"
    );
    stats.print_summary();

    Ok(())
}

/// Build the run configuration from the blueprint file or the reference
/// topology, then apply flag overrides and validate.
///
/// Fails before any source is touched.
pub(crate) fn assemble_blueprint(args: &RunArgs) -> Result<ScrambleBlueprint> {
    let mut blueprint = match &args.config {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()).into());
            }
            info!(config = %path.display(), "Loading configuration");
            ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => {
            let input = args.input_file.as_ref().ok_or(CliError::MissingInputFile)?;
            let output = args
                .output_file
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.into());
            ScrambleBlueprint::reference(input, output)
        }
    };

    if args.config.is_some() {
        apply_path_overrides(&mut blueprint, args);
    }
    if let Some(policy) = args.policy {
        blueprint.merge.policy = policy.into();
    }
    if let Some(dispatch) = args.dispatch {
        blueprint.merge.dispatch = dispatch.into();
    }
    if let Some(ref sentinel) = args.sentinel {
        blueprint.merge.sentinel = sentinel.clone();
    }

    ConfigLoader::validate(&blueprint).context("Invalid configuration")?;
    Ok(blueprint)
}

/// Point the first file source/sink of a loaded blueprint at the flag paths
fn apply_path_overrides(blueprint: &mut ScrambleBlueprint, args: &RunArgs) {
    if let Some(ref input) = args.input_file {
        match blueprint
            .sources
            .iter_mut()
            .find(|s| s.source_type == SourceType::File)
        {
            Some(source) => {
                info!(source = %source.name, path = %input.display(), "Overriding input file from CLI");
                source
                    .params
                    .insert(PATH_PARAM.to_string(), input.display().to_string());
            }
            None => warn!(
                path = %input.display(),
                "Blueprint has no file source, ignoring --input-file"
            ),
        }
    }
    if let Some(ref output) = args.output_file {
        match blueprint
            .sinks
            .iter_mut()
            .find(|s| s.sink_type == SinkType::File)
        {
            Some(sink) => {
                info!(sink = %sink.name, path = %output.display(), "Overriding output file from CLI");
                sink.params
                    .insert(PATH_PARAM.to_string(), output.display().to_string());
            }
            None => warn!(
                path = %output.display(),
                "Blueprint has no file sink, ignoring --output-file"
            ),
        }
    }
}

/// Dry-run output: a readable topology followed by the resolved blueprint as
/// TOML, or the resolved blueprint alone as JSON.
fn render_dry_run(blueprint: &ScrambleBlueprint, json: bool) -> Result<String> {
    if json {
        let mut out = ConfigLoader::render(blueprint, ConfigFormat::Json)
            .context("Failed to render blueprint")?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    writeln!(out, "\n=== Configuration Summary ===\n")?;
    writeln!(out, "Merge:")?;
    writeln!(out, "  Policy: {}", blueprint.merge.policy)?;
    writeln!(out, "  Dispatch: {}", blueprint.merge.dispatch)?;
    writeln!(out, "  Sentinel: {:?}", blueprint.merge.sentinel)?;

    writeln!(
        out,
        "\nSources ({}), in interleave order:",
        blueprint.sources.len()
    )?;
    for source in &blueprint.sources {
        match source.path() {
            Some(path) => writeln!(
                out,
                "  - {} ({:?}) {}",
                source.name,
                source.source_type,
                path.display()
            )?,
            None => writeln!(out, "  - {} ({:?})", source.name, source.source_type)?,
        }
    }

    if !blueprint.sinks.is_empty() {
        writeln!(out, "\nSinks ({}):", blueprint.sinks.len())?;
        for sink in &blueprint.sinks {
            match sink.path() {
                Some(path) => {
                    writeln!(out, "  - {} ({:?}) {}", sink.name, sink.sink_type, path.display())?
                }
                None => writeln!(out, "  - {} ({:?})", sink.name, sink.sink_type)?,
            }
        }
    }

    writeln!(out, "\n=== Resolved Blueprint ===\n")?;
    out.push_str(
        &ConfigLoader::render(blueprint, ConfigFormat::Toml)
            .context("Failed to render blueprint")?,
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DispatchArg, PolicyArg};
    use contracts::{DispatchMode, InterleavePolicy};
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_missing_input_file() {
        let err = assemble_blueprint(&RunArgs::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingInputFile)
        ));
    }

    #[test]
    fn test_reference_topology_with_default_output() {
        let args = RunArgs {
            input_file: Some(PathBuf::from("in.txt")),
            ..Default::default()
        };
        let bp = assemble_blueprint(&args).unwrap();

        assert_eq!(bp.sources.len(), 2);
        assert_eq!(bp.sources[1].path(), Some(PathBuf::from("in.txt")));
        assert_eq!(bp.sinks[1].path(), Some(PathBuf::from(DEFAULT_OUTPUT_FILE)));
        assert_eq!(bp.merge.policy, InterleavePolicy::Union);
    }

    #[test]
    fn test_flag_overrides() {
        let args = RunArgs {
            input_file: Some(PathBuf::from("in.txt")),
            output_file: Some(PathBuf::from("out.txt")),
            policy: Some(PolicyArg::Waves),
            dispatch: Some(DispatchArg::Staged),
            sentinel: Some("done".to_string()),
            ..Default::default()
        };
        let bp = assemble_blueprint(&args).unwrap();

        assert_eq!(bp.sinks[1].path(), Some(PathBuf::from("out.txt")));
        assert_eq!(bp.merge.policy, InterleavePolicy::Waves);
        assert_eq!(bp.merge.dispatch, DispatchMode::Staged);
        assert_eq!(bp.merge.sentinel, "done");
    }

    #[test]
    fn test_empty_sentinel_rejected() {
        let args = RunArgs {
            input_file: Some(PathBuf::from("in.txt")),
            sentinel: Some(String::new()),
            ..Default::default()
        };
        let err = assemble_blueprint(&args).unwrap_err();
        assert!(format!("{err:#}").contains("sentinel"));
    }

    #[test]
    fn test_config_file_with_path_override() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("scrambler.toml");
        std::fs::write(
            &config,
            r#"
[[sources]]
name = "input"
source_type = "file"
[sources.params]
path = "from-config.txt"

[[sinks]]
name = "log"
sink_type = "log"
"#,
        )
        .unwrap();

        let args = RunArgs {
            config: Some(config),
            input_file: Some(PathBuf::from("from-flag.txt")),
            ..Default::default()
        };
        let bp = assemble_blueprint(&args).unwrap();

        assert_eq!(bp.sources[0].path(), Some(PathBuf::from("from-flag.txt")));
        assert!(!bp.uses_console());
    }

    #[test]
    fn test_output_override_without_file_sink_is_ignored() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("scrambler.toml");
        std::fs::write(
            &config,
            r#"
[[sources]]
name = "input"
source_type = "file"
[sources.params]
path = "in.txt"

[[sinks]]
name = "log"
sink_type = "log"
"#,
        )
        .unwrap();

        let args = RunArgs {
            config: Some(config),
            output_file: Some(PathBuf::from("out.txt")),
            ..Default::default()
        };
        let bp = assemble_blueprint(&args).unwrap();

        assert_eq!(bp.sinks.len(), 1);
        assert_eq!(bp.sinks[0].path(), None);
        assert_eq!(bp.sources[0].path(), Some(PathBuf::from("in.txt")));
    }

    #[test]
    fn test_dry_run_renders_resolved_blueprint() {
        let args = RunArgs {
            input_file: Some(PathBuf::from("in.txt")),
            policy: Some(PolicyArg::Waves),
            dry_run: true,
            ..Default::default()
        };
        let bp = assemble_blueprint(&args).unwrap();

        let text = render_dry_run(&bp, false).unwrap();
        assert!(text.contains("Policy: waves"));
        let toml = text.split("=== Resolved Blueprint ===").nth(1).unwrap();
        let again = ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(again.merge, bp.merge);

        let json = render_dry_run(&bp, true).unwrap();
        let again = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(again.sources[1].path(), Some(PathBuf::from("in.txt")));
        assert_eq!(again.sinks[1].path(), Some(PathBuf::from(DEFAULT_OUTPUT_FILE)));
    }

    #[test]
    fn test_config_file_not_found() {
        let dir = tempdir().unwrap();
        let args = RunArgs {
            config: Some(dir.path().join("missing.toml")),
            ..Default::default()
        };
        let err = assemble_blueprint(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigNotFound { .. })
        ));
    }
}
