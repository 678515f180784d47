//! Configuration validation
//!
//! Rules:
//! - source names and sink names non-empty and unique within their list
//! - file sources carry a non-empty `path`
//! - at most one console source (stdin can only be drained once)
//! - at most one console sink, named like the console source when both exist
//!   (they are the same component)
//! - sentinel non-empty
//!
//! An empty source list is valid and merges to an empty sequence.

use std::collections::HashSet;

use contracts::{ContractError, ScrambleBlueprint, SinkType, SourceType, PATH_PARAM};

/// Validate a ScrambleBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &ScrambleBlueprint) -> Result<(), ContractError> {
    validate_sources(blueprint)?;
    validate_sinks(blueprint)?;
    validate_console(blueprint)?;
    validate_merge(blueprint)?;
    Ok(())
}

/// Validate the source set
fn validate_sources(blueprint: &ScrambleBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    let mut consoles = 0usize;
    for (idx, source) in blueprint.sources.iter().enumerate() {
        if source.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("sources[{}].name", idx),
                "source name cannot be empty",
            ));
        }
        if !seen.insert(source.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("sources[name={}]", source.name),
                "duplicate source name",
            ));
        }
        match source.source_type {
            SourceType::File if source.path().is_none() => {
                return Err(ContractError::config_validation(
                    format!("sources[{}].params.{}", source.name, PATH_PARAM),
                    "file source requires a path",
                ));
            }
            SourceType::Console => consoles += 1,
            SourceType::File => {}
        }
    }

    if consoles > 1 {
        return Err(ContractError::config_validation(
            "sources",
            format!("at most one console source is allowed, got {}", consoles),
        ));
    }
    Ok(())
}

/// Validate sink configuration
fn validate_sinks(blueprint: &ScrambleBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        if sink.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("sinks[{}].name", idx),
                "sink name cannot be empty",
            ));
        }
        if !seen.insert(sink.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
    }
    Ok(())
}

/// Validate the binding of the shared console component
fn validate_console(blueprint: &ScrambleBlueprint) -> Result<(), ContractError> {
    let console_sinks: Vec<_> = blueprint
        .sinks
        .iter()
        .filter(|s| s.sink_type == SinkType::Console)
        .collect();

    if console_sinks.len() > 1 {
        return Err(ContractError::config_validation(
            "sinks",
            format!(
                "at most one console sink is allowed, got {}",
                console_sinks.len()
            ),
        ));
    }

    let console_source = blueprint
        .sources
        .iter()
        .find(|s| s.source_type == SourceType::Console);

    if let (Some(source), Some(sink)) = (console_source, console_sinks.first()) {
        if source.name != sink.name {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                format!(
                    "console sink must share the console source name '{}'",
                    source.name
                ),
            ));
        }
    }
    Ok(())
}

/// Validate merge settings
fn validate_merge(blueprint: &ScrambleBlueprint) -> Result<(), ContractError> {
    if blueprint.merge.sentinel.is_empty() {
        return Err(ContractError::config_validation(
            "merge.sentinel",
            "sentinel cannot be empty",
        ));
    }
    Ok(())
}
