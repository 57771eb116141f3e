//! JsonChannel - compact JSON payloads delivered to a callback

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use contracts::{
    Channel, ChannelError, ChannelThreshold, LogRecord, WriteOutcome, DEFAULT_TIMESTAMP_FORMAT,
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::format::format_timestamp;

/// Payload callback type
///
/// Invoked synchronously on the dispatching thread. A panicking callback is
/// not caught.
pub type JsonCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Wire form of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonPayload {
    pub timestamp: String,
    /// Category label (`MSG`, `INF`, `WAR`, `ERR`, `DBG`)
    #[serde(rename = "type")]
    pub kind: String,
    pub sender: String,
    pub message: String,
}

impl JsonPayload {
    fn from_record(record: &LogRecord<'_>, timestamp_format: &str) -> Self {
        Self {
            timestamp: format_timestamp(record.timestamp, timestamp_format),
            kind: record.category.label().to_string(),
            sender: record.sender.to_string(),
            message: record.message.to_string(),
        }
    }
}

/// Channel that serializes records to JSON and hands them to a callback
pub struct JsonChannel {
    name: String,
    threshold: ChannelThreshold,
    timestamp_format: String,
    callback: JsonCallback,
}

impl JsonChannel {
    pub fn new(callback: JsonCallback, threshold: ChannelThreshold) -> Self {
        Self {
            name: "json".to_string(),
            threshold,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            callback,
        }
    }

    /// Create from params map (for factory)
    ///
    /// `target`: `stdout` (default) or `stderr`; each payload is printed on
    /// its own line.
    pub fn from_params(
        threshold: ChannelThreshold,
        params: &HashMap<String, String>,
    ) -> Result<Self, String> {
        let callback: JsonCallback = match params.get("target").map(String::as_str) {
            Some("stdout") | None => Arc::new(|payload: String| {
                if let Err(e) = writeln!(std::io::stdout().lock(), "{payload}") {
                    warn!(target_stream = "stdout", error = %e, "JSON payload write failed");
                }
            }),
            Some("stderr") => Arc::new(|payload: String| {
                if let Err(e) = writeln!(std::io::stderr().lock(), "{payload}") {
                    warn!(target_stream = "stderr", error = %e, "JSON payload write failed");
                }
            }),
            Some(other) => return Err(format!("unknown json target '{other}'")),
        };
        Ok(Self::new(callback, threshold))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Channel for JsonChannel {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "json_channel_write",
        level = "trace",
        skip(self, record),
        fields(channel = %self.name, sender = record.sender)
    )]
    fn write(&mut self, record: &LogRecord<'_>) -> Result<WriteOutcome, ChannelError> {
        if !self.admits(record.severity) {
            return Ok(WriteOutcome::Filtered);
        }

        let payload = JsonPayload::from_record(record, &self.timestamp_format);
        let json = serde_json::to_string(&payload)
            .map_err(|e| ChannelError::encode(&self.name, e.to_string()))?;
        (self.callback)(json);
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
}
