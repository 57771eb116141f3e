//! `info` command implementation.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use contracts::{ChannelConfig, LogConfig, DEFAULT_TIMESTAMP_FORMAT};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    channels: Vec<ChannelInfo>,
}

#[derive(Serialize)]
struct ChannelInfo {
    id: i32,
    kind: String,
    threshold: String,
    timestamp_format: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&config, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config, args);
    }

    Ok(())
}

fn build_channel_info(channel: &ChannelConfig, with_params: bool) -> ChannelInfo {
    ChannelInfo {
        id: channel.id,
        kind: channel.kind.as_str().to_string(),
        threshold: channel.threshold.to_string(),
        timestamp_format: channel
            .timestamp_format
            .clone()
            .unwrap_or_else(|| DEFAULT_TIMESTAMP_FORMAT.to_string()),
        params: if with_params {
            channel.params.clone().into_iter().collect()
        } else {
            BTreeMap::new()
        },
    }
}

fn build_config_info(config: &LogConfig, args: &InfoArgs) -> ConfigInfo {
    let mut channels: Vec<_> = config
        .channels
        .iter()
        .map(|c| build_channel_info(c, args.params))
        .collect();
    // Dispatch visits channels in id order
    channels.sort_by_key(|c| c.id);
    ConfigInfo { channels }
}

fn print_config_info(config: &LogConfig, args: &InfoArgs) {
    let info = build_config_info(config, args);

    println!("chanlog configuration\n");
    println!("Channels ({}), in dispatch order", info.channels.len());
    for (i, channel) in info.channels.iter().enumerate() {
        let is_last = i == info.channels.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!(
            "   {} #{} {} (threshold {}, timestamp \"{}\")",
            prefix, channel.id, channel.kind, channel.threshold, channel.timestamp_format
        );
        for (key, value) in &channel.params {
            println!("   {}  {} = {}", child_prefix, key, value);
        }
    }

    println!();
}
