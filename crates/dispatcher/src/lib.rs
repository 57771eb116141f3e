//! # Dispatcher
//!
//! Multi-channel log dispatch.
//!
//! Responsibilities:
//! - Keep the registry of output channels
//! - Fan every finished message out to all channels under one lock
//! - Collect per-channel outcomes instead of swallowing failures
//! - Provide the console, day-rotating file, and JSON callback channels

pub mod builder;
pub mod dispatcher;
pub mod error;
pub mod factory;
pub mod format;
pub mod metrics;
pub mod report;
pub mod sinks;

pub use builder::MessageBuilder;
pub use contracts::{
    shared, Channel, ChannelError, ChannelId, ChannelThreshold, LogRecord, MessageCategory,
    MessageSeverity, SharedChannel, WriteOutcome,
};
pub use dispatcher::Dispatcher;
pub use error::DispatcherError;
pub use factory::create_channel;
pub use metrics::{ChannelMetrics, MetricsSnapshot};
pub use report::{ChannelOutcome, DispatchReport};
pub use sinks::{ConsoleChannel, FileChannel, JsonCallback, JsonChannel, JsonPayload};
