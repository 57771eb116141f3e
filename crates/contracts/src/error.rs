//! Layered error definitions
//!
//! Categorized by source: channel I/O / configuration

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single channel write or channel construction
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Log directory could not be created
    #[error("failed to create log directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Day file could not be created
    #[error("failed to create log file {}: {source}", path.display())]
    FileCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Day file could not be opened for appending
    #[error("failed to open log file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output stream rejected the line
    #[error("channel '{channel}' write error: {source}")]
    Write {
        channel: String,
        #[source]
        source: std::io::Error,
    },

    /// Timestamp could not be turned into a usable value
    #[error("timestamp pattern '{pattern}' produced unusable value '{value}'")]
    Timestamp { pattern: String, value: String },

    /// Payload serialization failed
    #[error("channel '{channel}' encode error: {message}")]
    Encode { channel: String, message: String },
}

impl ChannelError {
    /// Create a write error
    pub fn write(channel: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            channel: channel.into(),
            source,
        }
    }

    /// Create an encode error
    pub fn encode(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ContractError {
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}
