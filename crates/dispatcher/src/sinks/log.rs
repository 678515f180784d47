//! LogSink - emits each line as a tracing event

use contracts::{ContractError, LineSink};
use tracing::{info, instrument};

/// Sink that logs the merged sequence for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LineSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, lines),
        fields(sink = %self.name, lines = lines.len())
    )]
    fn write(&self, lines: &[String]) -> Result<(), ContractError> {
        for (index, line) in lines.iter().enumerate() {
            info!(sink = %self.name, index, line = %line, "Merged line");
        }
        Ok(())
    }
}
