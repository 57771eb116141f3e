//! Dispatcher error types

use contracts::ChannelId;
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// A channel is already registered under this id
    #[error("a channel with id {id} is already registered")]
    DuplicateChannel { id: ChannelId },

    /// No channel is registered under this id
    #[error("no channel registered with id {id}")]
    UnknownChannel { id: ChannelId },

    /// Channel creation from configuration failed
    #[error("failed to create channel '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// Typed channel failure, e.g. the file root could not be created
    #[error("channel error: {0}")]
    Channel(#[from] contracts::ChannelError),
}

impl DispatcherError {
    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
