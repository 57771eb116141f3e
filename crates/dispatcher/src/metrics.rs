//! Channel metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

use contracts::WriteOutcome;

/// Metrics for a single registered channel
#[derive(Debug, Default)]
pub struct ChannelMetrics {
    /// Records emitted
    write_count: AtomicU64,
    /// Records below threshold
    filtered_count: AtomicU64,
    /// Write failures
    failure_count: AtomicU64,
}

impl ChannelMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }

    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Count a successful write call
    pub fn record(&self, outcome: WriteOutcome) {
        let counter = match outcome {
            WriteOutcome::Written => &self.write_count,
            WriteOutcome::Filtered => &self.filtered_count,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            write_count: self.write_count(),
            filtered_count: self.filtered_count(),
            failure_count: self.failure_count(),
        }
    }
}

/// Snapshot of channel metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub write_count: u64,
    pub filtered_count: u64,
    pub failure_count: u64,
}
