//! `emit` command implementation.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use dispatcher::{DispatchReport, Dispatcher, MessageBuilder};
use tracing::{debug, info};

use crate::cli::{EmitArgs, MessageKind};
use crate::error::CliError;

/// Execute the `emit` command
pub fn run_emit(args: &EmitArgs) -> Result<()> {
    info!(config = %args.config.display(), sender = %args.sender, "Emitting messages");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let config = ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    let dispatcher = Dispatcher::from_config(&config).context("Failed to create channels")?;

    let messages = if args.message.is_empty() {
        read_stdin_messages()?
    } else {
        vec![args.message.join(" ")]
    };

    let mut attempted = 0;
    let mut failed = 0;
    for text in &messages {
        let report = builder(&dispatcher, args).append(text).commit();
        attempted += report.len();
        failed += print_failures(&report);
    }

    for (id, e) in dispatcher.close() {
        eprintln!("channel {id}: flush failed: {e}");
    }

    debug!(messages = messages.len(), attempted, failed, "Emit finished");

    if failed > 0 {
        return Err(CliError::delivery(failed, attempted).into());
    }
    Ok(())
}

fn builder<'a>(dispatcher: &'a Dispatcher, args: &EmitArgs) -> MessageBuilder<'a> {
    let sender = args.sender.as_str();
    match args.kind {
        MessageKind::Msg => dispatcher.log(sender),
        MessageKind::Info => dispatcher.info(sender),
        MessageKind::Warning => dispatcher.warning(sender),
        MessageKind::Error => dispatcher.error(sender),
        MessageKind::Debug => dispatcher.debug(sender),
    }
}

fn read_stdin_messages() -> Result<Vec<String>, CliError> {
    let mut messages = Vec::new();
    for line in io::stdin().lock().lines() {
        messages.push(line?);
    }
    Ok(messages)
}

fn print_failures(report: &DispatchReport) -> usize {
    let mut count = 0;
    for (id, e) in report.failures() {
        eprintln!("channel {id}: {e}");
        count += 1;
    }
    count
}
