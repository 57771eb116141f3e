//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// chanlog - multi-channel logging engine
#[derive(Parser, Debug)]
#[command(
    name = "chanlog",
    author,
    version,
    about = "Multi-channel logging engine",
    long_about = "Fans log messages out to console, day-rotating file, and JSON channels.\n\n\
                  Channels are described in a TOML or JSON configuration file; each \n\
                  channel filters messages by its own severity threshold."
)]
pub struct Cli {
    /// Increase diagnostic verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "CHANLOG_VERBOSE")]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "CHANLOG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Prometheus metrics port (disabled when absent)
    #[arg(long, global = true, env = "CHANLOG_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send messages through the configured channels
    Emit(EmitArgs),

    /// Validate configuration file without sending anything
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `emit` command
#[derive(Parser, Debug, Clone)]
pub struct EmitArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "chanlog.toml", env = "CHANLOG_CONFIG")]
    pub config: PathBuf,

    /// Sender name shown in every line
    #[arg(short, long, default_value = "chanlog", env = "CHANLOG_SENDER")]
    pub sender: String,

    /// Message kind (selects severity and category)
    #[arg(short, long, value_enum, default_value = "msg")]
    pub kind: MessageKind,

    /// Message text; when omitted every stdin line is sent as one message
    pub message: Vec<String>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "chanlog.toml", env = "CHANLOG_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "chanlog.toml", env = "CHANLOG_CONFIG")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show type-specific channel parameters
    #[arg(long)]
    pub params: bool,
}

/// Message kind
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    /// Plain message (low severity)
    #[default]
    Msg,
    /// Info (medium severity)
    Info,
    /// Warning (medium severity)
    Warning,
    /// Error (high severity)
    Error,
    /// Debug (debug severity)
    Debug,
}

/// Diagnostic output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emit() {
        let cli = Cli::try_parse_from([
            "chanlog", "emit", "-c", "log.json", "-s", "main", "-k", "warning", "disk", "low",
        ])
        .unwrap();

        match cli.command {
            Commands::Emit(args) => {
                assert_eq!(args.config, PathBuf::from("log.json"));
                assert_eq!(args.sender, "main");
                assert_eq!(args.kind, MessageKind::Warning);
                assert_eq!(args.message, vec!["disk", "low"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["chanlog", "-q", "-v", "validate"]);
        assert!(result.is_err());
    }
}
