//! Dispatcher - channel registry and fan-out

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use chrono::Utc;
use contracts::{
    Channel, ChannelError, ChannelId, LogConfig, LogRecord, MessageCategory, MessageSeverity,
    SharedChannel,
};
use tracing::{debug, error, instrument, warn};

use crate::builder::MessageBuilder;
use crate::error::DispatcherError;
use crate::factory::create_channel;
use crate::metrics::{ChannelMetrics, MetricsSnapshot};
use crate::report::DispatchReport;

struct Registered {
    name: String,
    channel: SharedChannel,
    metrics: Arc<ChannelMetrics>,
}

/// Fans every message out to all registered channels.
///
/// Create one per process and hand it to producers by reference or `Arc`.
/// Registry changes and fan-outs share one mutex, so a dispatch always sees a
/// consistent channel set and messages are totally ordered by lock
/// acquisition. A slow channel stalls every producer for the duration of its
/// write.
#[derive(Default)]
pub struct Dispatcher {
    channels: Mutex<BTreeMap<ChannelId, Registered>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dispatcher with every channel of `config` registered
    #[instrument(
        name = "dispatcher_from_config",
        skip(config),
        fields(channel_count = config.channels.len())
    )]
    pub fn from_config(config: &LogConfig) -> Result<Self, DispatcherError> {
        let dispatcher = Self::new();
        for channel_config in &config.channels {
            let channel = create_channel(channel_config)?;
            dispatcher.add_channel(channel_config.id, channel)?;
        }
        Ok(dispatcher)
    }

    /// Register `channel` under `id`.
    ///
    /// A duplicate id is rejected and the existing channel is left untouched.
    pub fn add_channel(&self, id: ChannelId, channel: SharedChannel) -> Result<(), DispatcherError> {
        let name = lock_channel(&channel).name().to_string();
        let mut channels = self.lock_channels();
        if channels.contains_key(&id) {
            warn!(channel_id = id, channel = %name, "A channel with this id is already registered");
            return Err(DispatcherError::DuplicateChannel { id });
        }

        debug!(channel_id = id, channel = %name, "Channel registered");
        channels.insert(
            id,
            Registered {
                name,
                channel,
                metrics: Arc::new(ChannelMetrics::new()),
            },
        );
        Ok(())
    }

    /// Unregister the channel under `id` and hand it back
    pub fn remove_channel(&self, id: ChannelId) -> Result<SharedChannel, DispatcherError> {
        match self.lock_channels().remove(&id) {
            Some(entry) => {
                debug!(channel_id = id, channel = %entry.name, "Channel removed");
                Ok(entry.channel)
            }
            None => {
                warn!(channel_id = id, "No channel registered with this id");
                Err(DispatcherError::UnknownChannel { id })
            }
        }
    }

    /// Shared handle to a registered channel
    pub fn channel(&self, id: ChannelId) -> Option<SharedChannel> {
        self.lock_channels()
            .get(&id)
            .map(|entry| Arc::clone(&entry.channel))
    }

    /// Registered ids in dispatch order
    pub fn channel_ids(&self) -> Vec<ChannelId> {
        self.lock_channels().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.lock_channels().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_channels().is_empty()
    }

    /// Get metrics for all channels
    pub fn metrics(&self) -> Vec<(ChannelId, MetricsSnapshot)> {
        self.lock_channels()
            .iter()
            .map(|(id, entry)| (*id, entry.metrics.snapshot()))
            .collect()
    }

    /// Start a message with explicit severity and category
    pub fn message(
        &self,
        sender: impl Into<String>,
        severity: MessageSeverity,
        category: MessageCategory,
    ) -> MessageBuilder<'_> {
        MessageBuilder::new(self, sender, severity, category)
    }

    /// Plain message (`Low`, `Plain`)
    pub fn log(&self, sender: impl Into<String>) -> MessageBuilder<'_> {
        self.message(sender, MessageSeverity::Low, MessageCategory::Plain)
    }

    pub fn info(&self, sender: impl Into<String>) -> MessageBuilder<'_> {
        self.message(sender, MessageSeverity::Medium, MessageCategory::Info)
    }

    pub fn warning(&self, sender: impl Into<String>) -> MessageBuilder<'_> {
        self.message(sender, MessageSeverity::Medium, MessageCategory::Warning)
    }

    pub fn error(&self, sender: impl Into<String>) -> MessageBuilder<'_> {
        self.message(sender, MessageSeverity::High, MessageCategory::Error)
    }

    pub fn debug(&self, sender: impl Into<String>) -> MessageBuilder<'_> {
        self.message(sender, MessageSeverity::Debug, MessageCategory::Debug)
    }

    /// Send one finished message to every channel, stamped with the current time
    pub fn dispatch(
        &self,
        sender: &str,
        message: &str,
        severity: MessageSeverity,
        category: MessageCategory,
    ) -> DispatchReport {
        self.dispatch_at(sender, message, severity, category, Utc::now().timestamp())
    }

    /// Send one finished message with an explicit timestamp (epoch seconds).
    ///
    /// A failing channel is skipped: its error is logged, counted and
    /// returned in the report, and the remaining channels still receive the
    /// message.
    pub fn dispatch_at(
        &self,
        sender: &str,
        message: &str,
        severity: MessageSeverity,
        category: MessageCategory,
        timestamp: i64,
    ) -> DispatchReport {
        let record = LogRecord {
            sender,
            message,
            severity,
            category,
            timestamp,
        };

        let channels = self.lock_channels();
        let started = Instant::now();
        let mut report = DispatchReport::with_capacity(channels.len());

        for (id, entry) in channels.iter() {
            let result = lock_channel(&entry.channel).write(&record);
            match &result {
                Ok(outcome) => entry.metrics.record(*outcome),
                Err(e) => {
                    entry.metrics.inc_failure_count();
                    error!(
                        channel_id = *id,
                        channel = %entry.name,
                        sender,
                        error = %e,
                        "Channel write failed"
                    );
                }
            }
            observability::record_channel_write(&entry.name, result.as_ref().ok().copied());
            report.push(*id, result);
        }

        observability::record_message_dispatched(category, channels.len());
        drop(channels);
        observability::record_dispatch_latency_ms(started.elapsed().as_secs_f64() * 1000.0);

        report
    }

    /// Flush and unregister every channel.
    ///
    /// Returns the flush failures; channels still held elsewhere stay usable.
    #[instrument(name = "dispatcher_close", skip(self))]
    pub fn close(&self) -> Vec<(ChannelId, ChannelError)> {
        let channels = std::mem::take(&mut *self.lock_channels());
        let mut failures = Vec::new();

        for (id, entry) in channels {
            if let Err(e) = lock_channel(&entry.channel).flush() {
                error!(channel_id = id, channel = %entry.name, error = %e, "Flush failed on close");
                failures.push((id, e));
            }
        }

        debug!("Dispatcher closed");
        failures
    }

    fn lock_channels(&self) -> MutexGuard<'_, BTreeMap<ChannelId, Registered>> {
        // A panicking channel (e.g. a JSON callback) poisons the lock; the
        // registry itself is still consistent.
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lock_channel(channel: &SharedChannel) -> MutexGuard<'_, dyn Channel + 'static> {
    channel.lock().unwrap_or_else(PoisonError::into_inner)
}
