//! Channels Demo
//!
//! Registers one channel of each kind at a different threshold and sends one
//! message of every category:
//!
//! | threshold | visible categories      |
//! |-----------|-------------------------|
//! | debug     | MSG, INF, WAR, ERR, DBG |
//! | low       | MSG, INF, WAR, ERR      |
//! | normal    | INF, WAR, ERR           |
//! | high      | ERR                     |
//!
//! Run with: cargo run -p demos --bin channels_demo

use std::io::Write;
use std::sync::Arc;

use dispatcher::{
    shared, ChannelThreshold, ConsoleChannel, Dispatcher, FileChannel, JsonCallback, JsonChannel,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let log = Dispatcher::new();

    // Console: plain and debug messages hidden
    log.add_channel(0, shared(ConsoleChannel::new(ChannelThreshold::Normal)))?;
    // Files under logs/YYYY/MM/DD.log: everything
    log.add_channel(1, shared(FileChannel::new("logs/", ChannelThreshold::Debug)?))?;
    // JSON on stdout: errors only
    let print: JsonCallback = Arc::new(|json: String| {
        let _ = writeln!(std::io::stdout().lock(), "{json}");
    });
    log.add_channel(2, shared(JsonChannel::new(print, ChannelThreshold::High)))?;

    log.log("main").append("This is a normal message.");
    log.info("main").append("This is an info message.");
    log.warning("main").append("This is a warning message.");
    log.error("main").append("This is an error message.");
    log.debug("main").append("This is a debug message.");

    for (id, e) in log.close() {
        tracing::error!(channel_id = id, error = %e, "Flush failed");
    }
    Ok(())
}
