//! Channel trait - Dispatcher output interface
//!
//! Defines the abstract interface for log sinks.

use std::sync::{Arc, Mutex};

use crate::{ChannelError, ChannelThreshold, MessageCategory, MessageSeverity};

/// Registry key of a channel
pub type ChannelId = i32;

/// Default timestamp pattern (strftime syntax)
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Channel shared between the dispatcher registry and external holders.
///
/// The mutex serializes every use of the channel, so a sink reached outside
/// the dispatcher cannot race with an ongoing fan-out.
pub type SharedChannel = Arc<Mutex<dyn Channel>>;

/// Wrap a channel for registration
pub fn shared<C: Channel + 'static>(channel: C) -> SharedChannel {
    Arc::new(Mutex::new(channel))
}

/// One log message as seen by a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    /// Name of the producing component
    pub sender: &'a str,
    /// Finished message text
    pub message: &'a str,
    pub severity: MessageSeverity,
    pub category: MessageCategory,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

/// Result of a successful write call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record passed the threshold and was emitted
    Written,
    /// The record was below threshold; nothing happened
    Filtered,
}

/// Log output trait
///
/// Implementations must check the record's severity against their own
/// threshold before producing any side effect. A record below threshold
/// returns [`WriteOutcome::Filtered`] without touching any resource.
pub trait Channel: Send {
    /// Channel name (used for diagnostics/metrics)
    fn name(&self) -> &str;

    /// Write one record
    ///
    /// # Errors
    /// Returns the resource failure that prevented emitting the record
    fn write(&mut self, record: &LogRecord<'_>) -> Result<WriteOutcome, ChannelError>;

    fn threshold(&self) -> ChannelThreshold;

    fn set_threshold(&mut self, threshold: ChannelThreshold);

    fn timestamp_format(&self) -> &str;

    fn set_timestamp_format(&mut self, format: String);

    /// Flush buffered output (if any)
    fn flush(&mut self) -> Result<(), ChannelError> {
        Ok(())
    }

    /// Whether this channel would emit a record of `severity`
    fn admits(&self, severity: MessageSeverity) -> bool {
        self.threshold().admits(severity)
    }
}
