//! # Integration Tests
//!
//! End-to-end tests across crates.
//!
//! Covers:
//! - Configuration to live dispatcher
//! - Concurrent producers and registry changes
//! - Day rotation and JSON payloads through the dispatcher

#[cfg(test)]
mod support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// In-memory console target shared with the test
    #[derive(Clone, Default)]
    pub struct Capture(pub Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        pub fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Collects every JSON payload handed to the callback
    pub fn json_sink() -> (dispatcher::JsonCallback, Arc<Mutex<Vec<String>>>) {
        let store = Arc::new(Mutex::new(Vec::new()));
        let sink = store.clone();
        let callback: dispatcher::JsonCallback =
            Arc::new(move |payload: String| sink.lock().unwrap().push(payload));
        (callback, store)
    }
}

#[cfg(test)]
mod concurrency_tests {
    use std::sync::Arc;
    use std::thread;

    use dispatcher::{shared, ChannelThreshold, ConsoleChannel, Dispatcher};

    use crate::support::Capture;

    #[test]
    fn test_concurrent_producers_never_interleave() {
        let dispatcher = Arc::new(Dispatcher::new());
        let out = Capture::default();
        dispatcher
            .add_channel(
                0,
                shared(ConsoleChannel::with_writer(out.clone(), ChannelThreshold::Debug)),
            )
            .unwrap();

        let handles: Vec<_> = (0..100)
            .map(|i| {
                let dispatcher = dispatcher.clone();
                thread::spawn(move || {
                    dispatcher
                        .info(format!("worker-{i}"))
                        .append("payload ")
                        .append(i)
                        .append(" done");
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = out.text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 100);
        for line in &lines {
            let (_, rest) = line.split_once("<worker-").unwrap();
            let (id, tail) = rest.split_once("> => payload ").unwrap();
            assert_eq!(tail, format!("{id} done"));
        }
    }

    #[test]
    fn test_registry_changes_during_dispatch() {
        let dispatcher = Dispatcher::new();
        let stable = Capture::default();
        dispatcher
            .add_channel(
                0,
                shared(ConsoleChannel::with_writer(stable.clone(), ChannelThreshold::Debug)),
            )
            .unwrap();

        thread::scope(|s| {
            for t in 0..4 {
                let dispatcher = &dispatcher;
                s.spawn(move || {
                    for n in 0..50 {
                        dispatcher.log(format!("producer-{t}")).append(n);
                    }
                });
            }

            let dispatcher = &dispatcher;
            s.spawn(move || {
                for round in 0..50 {
                    let id = 100 + round;
                    let channel = ConsoleChannel::with_writer(Capture::default(), ChannelThreshold::Debug);
                    dispatcher.add_channel(id, shared(channel)).unwrap();
                    dispatcher.remove_channel(id).unwrap();
                }
            });
        });

        assert_eq!(dispatcher.channel_ids(), vec![0]);
        assert_eq!(stable.text().lines().count(), 200);
        assert!(stable.text().lines().all(|l| l.contains("[MSG]")));
    }
}

#[cfg(test)]
mod rotation_tests {
    use chrono::{Local, TimeZone};
    use dispatcher::{shared, ChannelThreshold, Dispatcher, FileChannel, MessageCategory, MessageSeverity};
    use tempfile::tempdir;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Local
            .with_ymd_and_hms(y, m, d, h, min, s)
            .earliest()
            .unwrap()
            .timestamp()
    }

    #[test]
    fn test_rotation_across_midnight() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("logs");
        let dispatcher = Dispatcher::new();
        dispatcher
            .add_channel(1, shared(FileChannel::new(&root, ChannelThreshold::Debug).unwrap()))
            .unwrap();

        let report = dispatcher.dispatch_at(
            "clock",
            "before midnight",
            MessageSeverity::Medium,
            MessageCategory::Info,
            local(2025, 3, 3, 23, 59, 59),
        );
        assert!(report.is_clean());
        dispatcher.dispatch_at(
            "clock",
            "after midnight",
            MessageSeverity::Medium,
            MessageCategory::Info,
            local(2025, 3, 4, 0, 0, 1),
        );

        let first = std::fs::read_to_string(root.join("2025/03/03.log")).unwrap();
        let second = std::fs::read_to_string(root.join("2025/03/04.log")).unwrap();
        assert_eq!(first.lines().count(), 1);
        assert!(first.contains("[INF] <clock> => before midnight"));
        assert_eq!(second.lines().count(), 1);
        assert!(second.contains("[INF] <clock> => after midnight"));
    }

    #[test]
    fn test_filtered_message_creates_no_file() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new();
        dispatcher
            .add_channel(1, shared(FileChannel::new(dir.path(), ChannelThreshold::High).unwrap()))
            .unwrap();

        let report = dispatcher.dispatch_at(
            "quiet",
            "ignored",
            MessageSeverity::Medium,
            MessageCategory::Warning,
            local(2025, 3, 3, 12, 0, 0),
        );
        assert_eq!(report.filtered(), 1);
        assert!(!dir.path().join("2025").exists());
    }
}

#[cfg(test)]
mod json_tests {
    use dispatcher::{shared, ChannelThreshold, Dispatcher, JsonChannel, JsonPayload};

    use crate::support::json_sink;

    #[test]
    fn test_json_payload_round_trip() {
        let dispatcher = Dispatcher::new();
        let (callback, store) = json_sink();
        dispatcher
            .add_channel(3, shared(JsonChannel::new(callback, ChannelThreshold::Debug)))
            .unwrap();

        let message = "said \"hi\"\n\tand left";
        dispatcher.warning("quoter").append(message);

        let payloads = store.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert!(!payloads[0].contains('\n'));

        let payload: JsonPayload = serde_json::from_str(&payloads[0]).unwrap();
        assert_eq!(payload.kind, "WAR");
        assert_eq!(payload.sender, "quoter");
        assert_eq!(payload.message, message);

        let raw: serde_json::Value = serde_json::from_str(&payloads[0]).unwrap();
        assert_eq!(raw["type"], "WAR");
    }

    #[test]
    fn test_json_threshold_high_only_errors() {
        let dispatcher = Dispatcher::new();
        let (callback, store) = json_sink();
        dispatcher
            .add_channel(0, shared(JsonChannel::new(callback, ChannelThreshold::High)))
            .unwrap();

        dispatcher.info("svc").append("started");
        dispatcher.warning("svc").append("slow");
        dispatcher.error("svc").append("crashed");

        let payloads = store.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].contains("\"type\":\"ERR\""));
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use dispatcher::Dispatcher;
    use tempfile::tempdir;

    #[test]
    fn test_config_to_dispatcher() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");
        let toml = format!(
            r#"
[[channels]]
id = 2
kind = "file"
threshold = "debug"
timestamp_format = "%H:%M:%S"

[channels.params]
path = "{}"

[[channels]]
id = 1
kind = "console"
threshold = "high"

[channels.params]
target = "stderr"
"#,
            logs.display()
        );

        let config = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();
        let dispatcher = Dispatcher::from_config(&config).unwrap();
        assert_eq!(dispatcher.channel_ids(), vec![1, 2]);

        dispatcher.debug("boot").append("probing");

        let metrics = dispatcher.metrics();
        assert_eq!(metrics[0].1.filtered_count, 1);
        assert_eq!(metrics[1].1.write_count, 1);
        assert!(dispatcher.close().is_empty());
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected_before_dispatch() {
        let json = r#"{ "channels": [
            { "id": 1, "kind": "console" },
            { "id": 1, "kind": "json" }
        ] }"#;

        assert!(ConfigLoader::load_from_str(json, ConfigFormat::Json).is_err());
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{ChannelThreshold, MessageCategory, MessageSeverity};

    #[test]
    fn test_threshold_matrix() {
        let severities = [
            MessageSeverity::Debug,
            MessageSeverity::Low,
            MessageSeverity::Medium,
            MessageSeverity::High,
        ];
        let expected = [
            (ChannelThreshold::Debug, 4),
            (ChannelThreshold::Low, 3),
            (ChannelThreshold::Normal, 2),
            (ChannelThreshold::High, 1),
        ];
        for (threshold, admitted) in expected {
            let count = severities.iter().filter(|s| threshold.admits(**s)).count();
            assert_eq!(count, admitted, "{threshold}");
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(MessageCategory::Plain.label(), "MSG");
        assert_eq!(MessageCategory::Info.label(), "INF");
        assert_eq!(MessageCategory::Warning.label(), "WAR");
        assert_eq!(MessageCategory::Error.label(), "ERR");
        assert_eq!(MessageCategory::Debug.label(), "DBG");
    }
}
