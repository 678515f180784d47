//! Pipeline orchestrator - coordinates all components.
//!
//! One run is Construct, Collect, Merge, Dispatch, Join. Collect is sequential
//! and fail-fast; dispatch is concurrent and never fails the run.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{
    DispatchMode, MergeConfig, ScrambleBlueprint, SharedSink, SharedSource, SinkType, SourceType,
};
use dispatcher::{create_sink, DispatchReport, Dispatcher, SinkOutcome};
use ingestion::{ConsoleIo, FileSource, IngestionPipeline, Lines};
use interleave::Interleaver;
use observability::RunMetricsAggregator;
use tracing::{info, instrument, warn};

use super::PipelineStats;
use crate::error::CliError;

/// Main pipeline orchestrator
pub struct Pipeline {
    ingestion: IngestionPipeline,
    dispatcher: Dispatcher,
    interleaver: Interleaver,
    dispatch: DispatchMode,
}

impl Pipeline {
    /// Build every component named by the blueprint, binding console entries
    /// to one shared stdin/stdout component.
    pub fn construct(blueprint: &ScrambleBlueprint) -> Result<Self> {
        let console = console_name(blueprint).map(|name| {
            Arc::new(ConsoleIo::stdio(name).with_sentinel(blueprint.merge.sentinel.clone()))
        });
        Self::construct_with_console(blueprint, console)
    }

    /// Like [`construct`](Self::construct), with an explicit console component
    pub fn construct_with_console(
        blueprint: &ScrambleBlueprint,
        console: Option<Arc<ConsoleIo>>,
    ) -> Result<Self> {
        let mut sources: Vec<SharedSource> = Vec::with_capacity(blueprint.sources.len());
        for config in &blueprint.sources {
            let source: SharedSource = match config.source_type {
                SourceType::Console => console
                    .clone()
                    .ok_or_else(|| CliError::construct(&config.name, "no console bound"))?,
                SourceType::File => Arc::new(
                    FileSource::from_params(&config.name, &config.params)
                        .map_err(|e| CliError::construct(&config.name, e))?,
                ),
            };
            sources.push(source);
        }

        let mut sinks: Vec<SharedSink> = Vec::with_capacity(blueprint.sinks.len());
        for config in &blueprint.sinks {
            let sink: SharedSink = match config.sink_type {
                SinkType::Console => console
                    .clone()
                    .ok_or_else(|| CliError::construct(&config.name, "no console bound"))?,
                _ => create_sink(config).map_err(|e| CliError::construct(&config.name, e))?,
            };
            sinks.push(sink);
        }

        Ok(Self::from_parts(sources, sinks, &blueprint.merge))
    }

    /// Assemble a pipeline from already built components
    pub fn from_parts(
        sources: Vec<SharedSource>,
        sinks: Vec<SharedSink>,
        merge: &MergeConfig,
    ) -> Self {
        Self {
            ingestion: IngestionPipeline::with_sources(sources),
            dispatcher: Dispatcher::new(sinks),
            interleaver: Interleaver::new(merge.policy),
            dispatch: merge.dispatch,
        }
    }

    /// Run the pipeline once
    ///
    /// # Errors
    /// Any source failure. Sink failures are carried in the stats instead.
    #[instrument(
        name = "pipeline_run",
        skip(self),
        fields(policy = %self.interleaver.policy(), dispatch = %self.dispatch)
    )]
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let mut run_metrics = RunMetricsAggregator::new();

        info!(
            sources = ?self.ingestion.source_names(),
            sinks = ?self.dispatcher.sink_names(),
            "Pipeline started"
        );

        let report = match self.dispatch {
            DispatchMode::Direct => {
                let collected = self.collect(&mut run_metrics).await?;
                let merged = self.interleaver.merge(collected);
                run_metrics.record_merged(merged.len());
                self.dispatcher.broadcast(merged).await
            }
            DispatchMode::Staged => {
                let staged = self.dispatcher.stage();
                match self.collect(&mut run_metrics).await {
                    Ok(collected) => {
                        let merged = self.interleaver.merge(collected);
                        run_metrics.record_merged(merged.len());
                        staged.publish(merged).await
                    }
                    Err(e) => {
                        staged.abandon().await;
                        return Err(e);
                    }
                }
            }
        };

        record_outcomes(&report, &mut run_metrics);
        if !report.all_succeeded() {
            warn!(failed = report.failed(), "Some sinks did not receive output");
        }

        Ok(PipelineStats {
            duration: start_time.elapsed(),
            policy: self.interleaver.policy(),
            dispatch: self.dispatch,
            report,
            run_metrics,
        })
    }

    async fn collect(&self, run_metrics: &mut RunMetricsAggregator) -> Result<Vec<Lines>> {
        let collected = self
            .ingestion
            .collect_all()
            .await
            .context("Failed to collect input")?;

        for (name, lines) in self.ingestion.source_names().iter().zip(&collected) {
            run_metrics.record_collected(name, lines.len());
        }
        Ok(collected)
    }
}

/// Name of the shared console component, if the blueprint uses one
fn console_name(blueprint: &ScrambleBlueprint) -> Option<String> {
    let source = blueprint
        .sources
        .iter()
        .find(|s| s.source_type == SourceType::Console)
        .map(|s| s.name.clone());
    source.or_else(|| {
        blueprint
            .sinks
            .iter()
            .find(|s| s.sink_type == SinkType::Console)
            .map(|s| s.name.clone())
    })
}

fn record_outcomes(report: &DispatchReport, run_metrics: &mut RunMetricsAggregator) {
    for sink in &report.sinks {
        let error = match &sink.outcome {
            SinkOutcome::Written { .. } => None,
            SinkOutcome::Failed { error } => Some(error.clone()),
            SinkOutcome::Skipped => Some("skipped".to_string()),
        };
        run_metrics.record_sink(&sink.sink, error);
    }
}
