//! ConsoleChannel - colored single-line terminal output

use std::collections::HashMap;
use std::io::{self, Write};

use contracts::{
    Channel, ChannelError, ChannelThreshold, LogRecord, WriteOutcome, DEFAULT_TIMESTAMP_FORMAT,
};
use tracing::instrument;

use crate::format::render_line;

/// Channel that prints color-coded lines to a terminal stream
pub struct ConsoleChannel {
    name: String,
    threshold: ChannelThreshold,
    timestamp_format: String,
    out: Box<dyn Write + Send>,
}

impl ConsoleChannel {
    /// Console channel on stdout
    pub fn new(threshold: ChannelThreshold) -> Self {
        Self::with_writer(io::stdout(), threshold)
    }

    /// Console channel on stderr
    pub fn stderr(threshold: ChannelThreshold) -> Self {
        Self::with_writer(io::stderr(), threshold)
    }

    /// Console channel on an arbitrary stream
    pub fn with_writer(out: impl Write + Send + 'static, threshold: ChannelThreshold) -> Self {
        Self {
            name: "console".to_string(),
            threshold,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            out: Box::new(out),
        }
    }

    /// Create from params map (for factory)
    ///
    /// `target`: `stdout` (default) or `stderr`.
    pub fn from_params(
        threshold: ChannelThreshold,
        params: &HashMap<String, String>,
    ) -> Result<Self, String> {
        match params.get("target").map(String::as_str) {
            Some("stdout") | None => Ok(Self::new(threshold)),
            Some("stderr") => Ok(Self::stderr(threshold)),
            Some(other) => Err(format!("unknown console target '{other}'")),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Channel for ConsoleChannel {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "console_channel_write",
        level = "trace",
        skip(self, record),
        fields(channel = %self.name, sender = record.sender)
    )]
    fn write(&mut self, record: &LogRecord<'_>) -> Result<WriteOutcome, ChannelError> {
        if !self.admits(record.severity) {
            return Ok(WriteOutcome::Filtered);
        }

        // One write_all per line keeps concurrent lines whole.
        let line = render_line(record, &self.timestamp_format, true);
        self.out
            .write_all(line.as_bytes())
            .map_err(|e| ChannelError::write(&self.name, e))?;
        Ok(WriteOutcome::Written)
    }

    fn threshold(&self) -> ChannelThreshold {
        self.threshold
    }

    fn set_threshold(&mut self, threshold: ChannelThreshold) {
        self.threshold = threshold;
    }

    fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    fn set_timestamp_format(&mut self, format: String) {
        self.timestamp_format = format;
    }

    fn flush(&mut self) -> Result<(), ChannelError> {
        self.out
            .flush()
            .map_err(|e| ChannelError::write(&self.name, e))
    }
}
