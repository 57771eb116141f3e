//! Config Demo
//!
//! Builds the dispatcher from a TOML/JSON file and reports per-channel counters.
//!
//! Run with: cargo run -p demos --bin config_demo -- chanlog.toml

use std::path::Path;

use config_loader::ConfigLoader;
use contracts::LogConfig;
use dispatcher::Dispatcher;

const DEFAULT_CONFIG: &str = r#"
[[channels]]
id = 0
kind = "console"
threshold = "low"

[[channels]]
id = 1
kind = "json"
threshold = "normal"
timestamp_format = "%Y-%m-%dT%H:%M:%S"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config: LogConfig = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading channel config");
        ConfigLoader::load_from_path(Path::new(&path))?
    } else {
        ConfigLoader::load_from_str(DEFAULT_CONFIG, config_loader::ConfigFormat::Toml)?
    };

    let log = Dispatcher::from_config(&config)?;
    tracing::info!(channels = ?log.channel_ids(), "Dispatcher ready");

    for n in 1..=3 {
        let mut message = log.info("config_demo");
        message.push("step ").push(n).push(" of 3");
    }
    log.debug("config_demo").append("only visible on debug channels");

    let report = log.error("config_demo").append("simulated failure").commit();
    tracing::info!(
        written = report.written(),
        filtered = report.filtered(),
        "Error message delivered"
    );

    for (id, snapshot) in log.metrics() {
        tracing::info!(
            channel_id = id,
            written = snapshot.write_count,
            filtered = snapshot.filtered_count,
            failed = snapshot.failure_count,
            "Channel counters"
        );
    }

    log.close();
    Ok(())
}
