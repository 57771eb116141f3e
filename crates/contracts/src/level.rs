//! Severity model
//!
//! Filtering compares a message's [`MessageSeverity`] numerically against a
//! channel's [`ChannelThreshold`]. [`MessageCategory`] only drives the display
//! label and color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Minimum severity a channel admits
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ChannelThreshold {
    /// Everything, including debug messages
    Debug = 0,
    /// Plain messages and above
    Low = 1,
    /// Info/warning messages and above
    #[default]
    Normal = 2,
    /// Errors only
    High = 3,
}

impl ChannelThreshold {
    /// Numeric rank used for comparison against [`MessageSeverity::rank`]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Whether a message of `severity` passes this threshold
    pub fn admits(self, severity: MessageSeverity) -> bool {
        severity.rank() >= self.rank()
    }

    /// Upper-case display name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for ChannelThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelThreshold {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            other => Err(ContractError::config_validation(
                "threshold",
                format!("unknown threshold '{other}'"),
            )),
        }
    }
}

/// Per-message severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MessageSeverity {
    Debug = 0,
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
}

impl MessageSeverity {
    /// Numeric rank used for comparison against [`ChannelThreshold::rank`]
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Message classification (label and color, never filtering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    #[default]
    Plain,
    Info,
    Warning,
    Error,
    Debug,
}

impl MessageCategory {
    /// Three-letter label used in every sink's output
    pub fn label(self) -> &'static str {
        match self {
            Self::Plain => "MSG",
            Self::Info => "INF",
            Self::Warning => "WAR",
            Self::Error => "ERR",
            Self::Debug => "DBG",
        }
    }

    /// ANSI SGR foreground color code
    pub fn ansi_code(self) -> u8 {
        match self {
            Self::Plain => 37,
            Self::Info => 34,
            Self::Warning => 33,
            Self::Error => 31,
            Self::Debug => 32,
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
