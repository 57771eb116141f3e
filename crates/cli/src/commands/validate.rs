//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{ChannelKind, ChannelThreshold, LogConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    channel_count: usize,
    console_count: usize,
    file_count: usize,
    json_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            let count = |kind: ChannelKind| config.channels.iter().filter(|c| c.kind == kind).count();

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    channel_count: config.channels.len(),
                    console_count: count(ChannelKind::Console),
                    file_count: count(ChannelKind::File),
                    json_count: count(ChannelKind::Json),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &LogConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.channels.is_empty() {
        warnings.push("No channels configured - every message will be dropped".to_string());
    }

    for channel in &config.channels {
        if channel.kind == ChannelKind::File {
            if let Some(path) = channel.param("path") {
                if !std::path::Path::new(path).exists() {
                    warnings.push(format!(
                        "Channel {}: log directory '{}' does not exist yet and will be created",
                        channel.id, path
                    ));
                }
            }
        }
    }

    if !config.channels.is_empty()
        && config
            .channels
            .iter()
            .all(|c| c.threshold == ChannelThreshold::High)
    {
        warnings.push("Every channel has threshold HIGH - only errors will be emitted".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Channels: {}", summary.channel_count);
            println!("  Console: {}", summary.console_count);
            println!("  File: {}", summary.file_count);
            println!("  JSON: {}", summary.json_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
