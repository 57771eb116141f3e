//! Channel creation from declarative configuration

use contracts::{shared, Channel, ChannelConfig, ChannelKind, SharedChannel};
use tracing::{debug, instrument};

use crate::error::DispatcherError;
use crate::sinks::{ConsoleChannel, FileChannel, JsonChannel};

/// Create a registered-ready channel from its configuration
#[instrument(
    name = "dispatcher_create_channel",
    skip(config),
    fields(channel_id = config.id, kind = config.kind.as_str())
)]
pub fn create_channel(config: &ChannelConfig) -> Result<SharedChannel, DispatcherError> {
    let name = format!("{}#{}", config.kind.as_str(), config.id);
    let creation_error = |e: String| DispatcherError::sink_creation(&name, e);

    let channel = match config.kind {
        ChannelKind::Console => shared(configure(
            ConsoleChannel::from_params(config.threshold, &config.params)
                .map_err(creation_error)?
                .named(&name),
            config,
        )),
        ChannelKind::File => shared(configure(
            FileChannel::from_params(config.threshold, &config.params)
                .map_err(|e| match e {
                    DispatcherError::SinkCreation { message, .. } => creation_error(message),
                    other => other,
                })?
                .named(&name),
            config,
        )),
        ChannelKind::Json => shared(configure(
            JsonChannel::from_params(config.threshold, &config.params)
                .map_err(creation_error)?
                .named(&name),
            config,
        )),
    };

    debug!(channel = %name, threshold = %config.threshold, "Channel created");
    Ok(channel)
}

fn configure<C: Channel>(mut channel: C, config: &ChannelConfig) -> C {
    if let Some(format) = &config.timestamp_format {
        channel.set_timestamp_format(format.clone());
    }
    channel
}
