//! Configuration validation
//!
//! Rules:
//! - channel ids are unique
//! - a given timestamp_format is non-empty
//! - file channels carry a non-empty `path`
//! - console/json `target` is `stdout` or `stderr`

use std::collections::HashSet;

use contracts::{ChannelConfig, ChannelKind, ContractError, LogConfig};

const TARGETS: [&str; 2] = ["stdout", "stderr"];

/// Validate a LogConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &LogConfig) -> Result<(), ContractError> {
    validate_channel_ids(config)?;
    for channel in &config.channels {
        validate_timestamp_format(channel)?;
        validate_params(channel)?;
    }
    Ok(())
}

fn validate_channel_ids(config: &LogConfig) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for channel in &config.channels {
        if !seen.insert(channel.id) {
            return Err(ContractError::config_validation(
                format!("channels[id={}]", channel.id),
                "duplicate channel id",
            ));
        }
    }
    Ok(())
}

fn validate_timestamp_format(channel: &ChannelConfig) -> Result<(), ContractError> {
    match &channel.timestamp_format {
        Some(format) if format.trim().is_empty() => Err(ContractError::config_validation(
            format!("channels[id={}].timestamp_format", channel.id),
            "timestamp_format must not be empty",
        )),
        _ => Ok(()),
    }
}

fn validate_params(channel: &ChannelConfig) -> Result<(), ContractError> {
    match channel.kind {
        ChannelKind::File => match channel.param("path") {
            Some(path) if !path.trim().is_empty() => Ok(()),
            _ => Err(ContractError::config_validation(
                format!("channels[id={}].params.path", channel.id),
                "file channel requires a non-empty 'path'",
            )),
        },
        ChannelKind::Console | ChannelKind::Json => match channel.param("target") {
            Some(target) if !TARGETS.contains(&target) => Err(ContractError::config_validation(
                format!("channels[id={}].params.target", channel.id),
                format!("target must be one of {TARGETS:?}, got '{target}'"),
            )),
            _ => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ChannelThreshold;
    use std::collections::HashMap;

    fn channel(id: i32, kind: ChannelKind, params: &[(&str, &str)]) -> ChannelConfig {
        ChannelConfig {
            id,
            kind,
            threshold: ChannelThreshold::Normal,
            timestamp_format: None,
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = LogConfig {
            channels: vec![
                channel(0, ChannelKind::Console, &[]),
                channel(1, ChannelKind::File, &[("path", "logs/")]),
                channel(2, ChannelKind::Json, &[("target", "stderr")]),
            ],
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_duplicate_channel_id() {
        let config = LogConfig {
            channels: vec![
                channel(0, ChannelKind::Console, &[]),
                channel(0, ChannelKind::Json, &[]),
            ],
        };
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate channel id"));
    }

    #[test]
    fn test_file_channel_requires_path() {
        let config = LogConfig {
            channels: vec![channel(1, ChannelKind::File, &[("path", "  ")])],
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_target() {
        let config = LogConfig {
            channels: vec![channel(0, ChannelKind::Console, &[("target", "printer")])],
        };
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("printer"));
    }

    #[test]
    fn test_empty_timestamp_format() {
        let mut console = channel(0, ChannelKind::Console, &[]);
        console.timestamp_format = Some(String::new());
        let config = LogConfig {
            channels: vec![console],
        };
        assert!(validate(&config).is_err());
    }
}
