//! FileChannel - day-rotating plain-text log store
//!
//! Layout: `<root>/<YYYY>/<MM>/<DD>.<ext>`, one line per record. Rotation is
//! evaluated lazily on every admitted write; there is no background timer.
//!
//! The channel keeps the current day file in `&mut self` state, so concurrent
//! writers must be serialized by the caller. Registered channels get this
//! from the [`SharedChannel`](contracts::SharedChannel) mutex.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use contracts::{
    Channel, ChannelError, ChannelThreshold, LogRecord, WriteOutcome, DEFAULT_TIMESTAMP_FORMAT,
};
use tracing::{debug, error, instrument, warn};

use crate::error::DispatcherError;
use crate::format::{format_timestamp, render_line, split};

const DAY_PATTERN: &str = "%Y/%m/%d";
const DEFAULT_EXTENSION: &str = "log";

/// Channel that appends lines to one file per calendar day
pub struct FileChannel {
    name: String,
    threshold: ChannelThreshold,
    timestamp_format: String,
    root: PathBuf,
    extension: String,
    current_path: Option<PathBuf>,
}

impl FileChannel {
    /// Create a new FileChannel rooted at `path`.
    ///
    /// An existing directory, or a path without an extension, is the root
    /// itself; a file-like path (`logs/app.log`) is reduced to its parent.
    /// The root is created recursively when missing.
    pub fn new(path: impl AsRef<Path>, threshold: ChannelThreshold) -> Result<Self, ChannelError> {
        let root = resolve_root(path.as_ref());
        fs::create_dir_all(&root).map_err(|source| {
            error!(root = %root.display(), error = %source, "Failed to create log directory");
            ChannelError::DirectoryCreation {
                path: root.clone(),
                source,
            }
        })?;

        Ok(Self {
            name: "file".to_string(),
            threshold,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            root,
            extension: DEFAULT_EXTENSION.to_string(),
            current_path: None,
        })
    }

    /// Create from params map (for factory)
    ///
    /// `path` is required; `extension` defaults to `log`.
    pub fn from_params(
        threshold: ChannelThreshold,
        params: &HashMap<String, String>,
    ) -> Result<Self, DispatcherError> {
        let path = params
            .get("path")
            .ok_or_else(|| DispatcherError::sink_creation("file", "missing 'path' parameter"))?;

        let channel = Self::new(path, threshold)?;
        Ok(match params.get("extension") {
            Some(ext) => channel.with_extension(ext.as_str()),
            None => channel,
        })
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Day file of the most recent admitted write
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    fn day_path(&self, timestamp: i64) -> Result<PathBuf, ChannelError> {
        let date = format_timestamp(timestamp, DAY_PATTERN);
        let parts = split(&date, '/');
        let [year, month, day] = parts.as_slice() else {
            return Err(ChannelError::Timestamp {
                pattern: DAY_PATTERN.to_string(),
                value: date,
            });
        };

        Ok(self
            .root
            .join(year)
            .join(month)
            .join(format!("{day}.{}", self.extension)))
    }

    /// Switch to `target`, creating its directories and touching the file.
    ///
    /// `current_path` only moves once the file exists, so a failed rollover is
    /// retried on the next write.
    #[instrument(
        name = "file_channel_rotate",
        skip(self, target),
        fields(channel = %self.name, file = %target.display())
    )]
    fn rotate_to(&mut self, target: PathBuf) -> Result<(), ChannelError> {
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).map_err(|source| {
                error!(dir = %dir.display(), error = %source, "Failed to create day directory");
                ChannelError::DirectoryCreation {
                    path: dir.to_path_buf(),
                    source,
                }
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&target)
            .map_err(|source| {
                error!(file = %target.display(), error = %source, "Failed to create day file");
                ChannelError::FileCreation {
                    path: target.clone(),
                    source,
                }
            })?;

        debug!(file = %target.display(), "Rotated to new day file");
        self.current_path = Some(target);
        Ok(())
    }

    fn append_line(&self, path: &Path, line: &str) -> Result<(), ChannelError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| ChannelError::FileOpen {
                path: path.to_path_buf(),
                source,
            })?;

        file.write_all(line.as_bytes())
            .map_err(|e| ChannelError::write(&self.name, e))
    }
}

impl Channel for FileChannel {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_channel_write",
        level = "trace",
        skip(self, record),
        fields(channel = %self.name, sender = record.sender)
    )]
    fn write(&mut self, record: &LogRecord<'_>) -> Result<WriteOutcome, ChannelError> {
        if !self.admits(record.severity) {
            return Ok(WriteOutcome::Filtered);
        }

        let target = self.day_path(record.timestamp)?;
        if self.current_path.as_deref() != Some(target.as_path()) {
            self.rotate_to(target.clone())?;
        }

        let line = render_line(record, &self.timestamp_format, false);
        match self.append_line(&target, &line) {
            Ok(()) => {}
            Err(ChannelError::FileOpen { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                // Day directory removed underneath us
                warn!(file = %target.display(), "Day file missing, recreating");
                self.current_path = None;
                self.rotate_to(target.clone())?;
                self.append_line(&target, &line)?;
            }
            Err(e) => return Err(e),
        }
        Ok(WriteOutcome::Written)
    }

    fn threshold(&self) -> ChannelThreshold {
        self.threshold
    }

    fn set_threshold(&mut self, threshold: ChannelThreshold) {
        self.threshold = threshold;
    }

    fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    fn set_timestamp_format(&mut self, format: String) {
        self.timestamp_format = format;
    }
}

fn resolve_root(path: &Path) -> PathBuf {
    if path.is_dir() || path.extension().is_none() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use contracts::{MessageCategory, MessageSeverity};
    use tempfile::tempdir;

    fn local_epoch(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Local
            .with_ymd_and_hms(y, m, d, h, min, s)
            .earliest()
            .unwrap()
            .timestamp()
    }

    fn record(message: &str, severity: MessageSeverity, timestamp: i64) -> LogRecord<'_> {
        LogRecord {
            sender: "main",
            message,
            severity,
            category: MessageCategory::Info,
            timestamp,
        }
    }

    #[test]
    fn test_file_channel_creates_missing_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("logs");

        let channel = FileChannel::new(&root, ChannelThreshold::Debug).unwrap();
        assert!(root.is_dir());
        assert_eq!(channel.root(), root.as_path());
        assert!(channel.current_path().is_none());
    }

    #[test]
    fn test_file_channel_file_path_uses_parent() {
        let dir = tempdir().unwrap();
        let channel =
            FileChannel::new(dir.path().join("app.log"), ChannelThreshold::Debug).unwrap();
        assert_eq!(channel.root(), dir.path());
    }

    #[test]
    fn test_file_channel_root_creation_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let result = FileChannel::new(blocker.join("logs"), ChannelThreshold::Debug);
        assert!(matches!(
            result,
            Err(ChannelError::DirectoryCreation { .. })
        ));
    }

    #[test]
    fn test_file_channel_filtered_write_touches_nothing() {
        let dir = tempdir().unwrap();
        let mut channel = FileChannel::new(dir.path(), ChannelThreshold::Normal).unwrap();

        let ts = local_epoch(2025, 3, 3, 10, 0, 0);
        let outcome = channel.write(&record("quiet", MessageSeverity::Low, ts)).unwrap();

        assert_eq!(outcome, WriteOutcome::Filtered);
        assert!(channel.current_path().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_file_channel_same_day_appends() {
        let dir = tempdir().unwrap();
        let mut channel = FileChannel::new(dir.path(), ChannelThreshold::Debug).unwrap();

        let morning = local_epoch(2025, 3, 3, 10, 0, 0);
        let evening = local_epoch(2025, 3, 3, 22, 30, 0);
        channel.write(&record("first", MessageSeverity::High, morning)).unwrap();
        channel.write(&record("second", MessageSeverity::High, evening)).unwrap();

        let path = dir.path().join("2025").join("03").join("03.log");
        assert_eq!(channel.current_path(), Some(path.as_path()));

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[2025-03-03 10:00:00] - [INF] <main> => first");
        assert_eq!(lines[1], "[2025-03-03 22:30:00] - [INF] <main> => second");
    }

    #[test]
    fn test_file_channel_rotates_on_day_change() {
        let dir = tempdir().unwrap();
        let mut channel = FileChannel::new(dir.path(), ChannelThreshold::Debug).unwrap();

        let day_one = local_epoch(2025, 3, 3, 10, 0, 0);
        let day_two = local_epoch(2025, 3, 4, 0, 0, 1);
        channel.write(&record("one", MessageSeverity::High, day_one)).unwrap();
        channel.write(&record("two", MessageSeverity::High, day_two)).unwrap();

        let first = fs::read_to_string(dir.path().join("2025/03/03.log")).unwrap();
        let second = fs::read_to_string(dir.path().join("2025/03/04.log")).unwrap();
        assert_eq!(first.lines().count(), 1);
        assert!(first.ends_with("<main> => one\n"));
        assert_eq!(second.lines().count(), 1);
        assert!(second.ends_with("<main> => two\n"));
    }

    #[test]
    fn test_file_channel_custom_extension() {
        let dir = tempdir().unwrap();
        let mut params = HashMap::new();
        params.insert("path".to_string(), dir.path().display().to_string());
        params.insert("extension".to_string(), "txt".to_string());

        let mut channel = FileChannel::from_params(ChannelThreshold::Debug, &params).unwrap();
        let ts = local_epoch(2025, 12, 31, 23, 59, 59);
        channel.write(&record("eoy", MessageSeverity::Debug, ts)).unwrap();

        assert!(dir.path().join("2025/12/31.txt").is_file());
    }

    #[test]
    fn test_file_channel_from_params_requires_path() {
        let result = FileChannel::from_params(ChannelThreshold::Debug, &HashMap::new());
        assert!(matches!(result, Err(DispatcherError::SinkCreation { .. })));
    }

    #[test]
    fn test_file_channel_from_params_keeps_root_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let mut params = HashMap::new();
        params.insert(
            "path".to_string(),
            blocker.join("logs").display().to_string(),
        );
        let result = FileChannel::from_params(ChannelThreshold::Debug, &params);
        assert!(matches!(
            result,
            Err(DispatcherError::Channel(ChannelError::DirectoryCreation { .. }))
        ));
    }

    #[test]
    fn test_file_channel_recreates_removed_day_directory() {
        let dir = tempdir().unwrap();
        let mut channel = FileChannel::new(dir.path(), ChannelThreshold::Debug).unwrap();
        let ts = local_epoch(2025, 3, 3, 10, 0, 0);

        channel.write(&record("first", MessageSeverity::High, ts)).unwrap();
        fs::remove_dir_all(dir.path().join("2025")).unwrap();

        for message in ["second", "third"] {
            let outcome = channel.write(&record(message, MessageSeverity::High, ts)).unwrap();
            assert_eq!(outcome, WriteOutcome::Written);
        }

        let path = dir.path().join("2025").join("03").join("03.log");
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("=> second"));
        assert!(content.contains("=> third"));
        assert_eq!(channel.current_path(), Some(path.as_path()));
    }

    #[test]
    fn test_file_channel_day_directory_failure_is_reported() {
        let dir = tempdir().unwrap();
        let mut channel = FileChannel::new(dir.path(), ChannelThreshold::Debug).unwrap();
        // A plain file where the year directory should go
        fs::write(dir.path().join("2025"), b"").unwrap();

        let ts = local_epoch(2025, 3, 3, 10, 0, 0);
        let result = channel.write(&record("lost", MessageSeverity::High, ts));

        assert!(matches!(
            result,
            Err(ChannelError::DirectoryCreation { .. })
        ));
        assert!(channel.current_path().is_none());
    }
}
