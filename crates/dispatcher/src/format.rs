//! Line and timestamp formatting shared by the sinks

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone};
use contracts::LogRecord;

const ANSI_RESET: &str = "\x1b[0m";

/// Format `epoch_secs` in local time with a strftime `pattern`.
///
/// Returns an empty string when the pattern is invalid or the timestamp is
/// out of range; never panics.
pub fn format_timestamp(epoch_secs: i64, pattern: &str) -> String {
    let Some(datetime) = Local.timestamp_opt(epoch_secs, 0).earliest() else {
        return String::new();
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return String::new();
    }

    let mut out = String::new();
    if write!(out, "{}", datetime.format_with_items(items.iter())).is_err() {
        return String::new();
    }
    out
}

/// Split `text` on every `delimiter`, keeping empty pieces
pub fn split(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter).map(str::to_owned).collect()
}

/// Render one output line (with trailing newline).
///
/// `[<timestamp>] - [<LABEL>] <<sender>> => <message>`; with `colored` the
/// label is wrapped in the category's ANSI color and reset right after.
pub fn render_line(record: &LogRecord<'_>, timestamp_format: &str, colored: bool) -> String {
    let timestamp = format_timestamp(record.timestamp, timestamp_format);
    let label = record.category.label();

    if colored {
        format!(
            "[{timestamp}] - \x1b[{code}m[{label}]{ANSI_RESET} <{sender}> => {message}\n",
            code = record.category.ansi_code(),
            sender = record.sender,
            message = record.message,
        )
    } else {
        format!(
            "[{timestamp}] - [{label}] <{sender}> => {message}\n",
            sender = record.sender,
            message = record.message,
        )
    }
}
