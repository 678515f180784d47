//! ConsoleIo - interactive console acting as both source and sink

use std::io::{self, BufRead, BufReader, Write};
use std::sync::{Mutex, MutexGuard};

use contracts::{ContractError, LineSink, LineSource, Lines, DEFAULT_SENTINEL};
use tracing::{debug, instrument, trace};

/// Interactive console
///
/// Reads lines until the sentinel line and prints one line per element. The
/// same instance is registered as a source and as a sink, so it is shared
/// through one `Arc` rather than duplicated.
pub struct ConsoleIo {
    name: String,
    sentinel: String,
    input: Mutex<Box<dyn BufRead + Send>>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleIo {
    /// Console over arbitrary streams
    pub fn new(
        name: impl Into<String>,
        input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            input: Mutex::new(Box::new(input)),
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Console over the process stdin/stdout
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, BufReader::new(io::stdin()), io::stdout())
    }

    /// Replace the terminal line (default `quit`)
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    fn lock<'a, T: ?Sized>(&self, slot: &'a Mutex<Box<T>>) -> io::Result<MutexGuard<'a, Box<T>>> {
        slot.lock()
            .map_err(|_| io::Error::other(format!("console '{}' stream lock poisoned", self.name)))
    }

    fn read_until_sentinel(&self) -> Result<Lines, ContractError> {
        let mut input = self
            .lock(&self.input)
            .map_err(|e| ContractError::source_read(&self.name, e.to_string()))?;

        let mut lines = Vec::new();
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = input
                .read_line(&mut buf)
                .map_err(|e| ContractError::source_read(&self.name, e.to_string()))?;
            // A line without its '\n' means the stream ended mid-line.
            if read == 0 || !buf.ends_with('\n') {
                return Err(ContractError::unexpected_eof(&self.name));
            }

            let line = strip_terminator(&buf);
            if line == self.sentinel {
                debug!(console = %self.name, lines = lines.len(), "Sentinel received");
                return Ok(lines);
            }
            trace!(console = %self.name, line, "Console line read");
            lines.push(line.to_string());
        }
    }

    fn print_lines(&self, lines: &[String]) -> io::Result<()> {
        let mut output = self.lock(&self.output)?;
        for line in lines {
            writeln!(output, "{}", line)?;
        }
        output.flush()
    }
}

/// Strip one trailing `\n` and then one trailing `\r`
fn strip_terminator(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

impl LineSource for ConsoleIo {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "console_read", skip(self), fields(console = %self.name))]
    fn read(&self) -> Result<Lines, ContractError> {
        self.read_until_sentinel()
    }
}

impl LineSink for ConsoleIo {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "console_write",
        skip(self, lines),
        fields(console = %self.name, lines = lines.len())
    )]
    fn write(&self, lines: &[String]) -> Result<(), ContractError> {
        self.print_lines(lines)
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }
}
