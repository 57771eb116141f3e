//! Dispatch metrics
//!
//! Counters for every fan-out and every per-channel write outcome. They are
//! no-ops until a recorder is installed (see [`crate::init_with_config`]).

use contracts::{MessageCategory, WriteOutcome};
use metrics::{counter, gauge, histogram};

/// Record one fan-out of a message
pub fn record_message_dispatched(category: MessageCategory, channel_count: usize) {
    counter!(
        "chanlog_messages_dispatched_total",
        "type" => category.label()
    )
    .increment(1);
    gauge!("chanlog_registered_channels").set(channel_count as f64);
}

/// Record the outcome of one channel write
pub fn record_channel_write(channel: &str, outcome: Option<WriteOutcome>) {
    let status = match outcome {
        Some(WriteOutcome::Written) => "written",
        Some(WriteOutcome::Filtered) => "filtered",
        None => "failure",
    };
    counter!(
        "chanlog_channel_writes_total",
        "channel" => channel.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record how long the dispatch lock was held for one message
pub fn record_dispatch_latency_ms(latency_ms: f64) {
    histogram!("chanlog_dispatch_latency_ms").record(latency_ms);
}
