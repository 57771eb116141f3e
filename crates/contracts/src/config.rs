//! Declarative channel configuration
//!
//! A [`LogConfig`] describes a full channel set; the dispatcher turns each
//! [`ChannelConfig`] into a live channel.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ChannelId, ChannelThreshold};

/// Top-level logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Channels in registration order
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

/// Configuration of one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Registry id
    pub id: ChannelId,

    /// Channel type
    pub kind: ChannelKind,

    /// Minimum admitted severity
    #[serde(default)]
    pub threshold: ChannelThreshold,

    /// strftime pattern for timestamps (channel default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_format: Option<String>,

    /// Type-specific parameters
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}

impl ChannelConfig {
    /// Look up a type-specific parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Colored terminal output
    Console,
    /// Day-rotating file store
    File,
    /// JSON payloads handed to a callback
    Json,
}

impl ChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::File => "file",
            Self::Json => "json",
        }
    }
}
