//! Leveled logging into a named output sink

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::entry::LogEntry;
use super::level::LogLevel;
use super::payload::Payload;
use super::sink::{OutputSink, SinkProvider};

/// A named output channel
///
/// Owns its sink exclusively. Every write appends a header line, followed by
/// a payload line when a truthy payload is given. Pass the channel to the code
/// that logs through it; there is no global instance.
pub struct LogChannel<S: OutputSink> {
    name: String,
    sink: S,
    clock: fn() -> DateTime<Utc>,
}

impl<S: OutputSink> LogChannel<S> {
    /// Create a channel, asking `provider` for a sink named `name`
    pub fn new<P>(provider: &P, name: impl Into<String>) -> Result<Self>
    where
        P: SinkProvider<Sink = S>,
    {
        let name = name.into();
        let sink = provider.create(&name)?;
        tracing::debug!(channel = %name, "Created output channel");
        Ok(Self::from_sink(name, sink))
    }

    /// Wrap an already created sink
    pub fn from_sink(name: impl Into<String>, sink: S) -> Self {
        Self {
            name: name.into(),
            sink,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock used to stamp entries
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Display name of the channel
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Write a trace entry
    pub fn trace(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Trace, message, None);
    }

    /// Write a trace entry with a payload
    pub fn trace_with(&mut self, message: impl Into<String>, payload: impl Into<Payload>) {
        self.write(LogLevel::Trace, message, Some(payload.into()));
    }

    /// Write an info entry
    pub fn info(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Info, message, None);
    }

    /// Write an info entry with a payload
    pub fn info_with(&mut self, message: impl Into<String>, payload: impl Into<Payload>) {
        self.write(LogLevel::Info, message, Some(payload.into()));
    }

    /// Write an error entry
    pub fn error(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Error, message, None);
    }

    /// Write an error entry with a payload
    pub fn error_with(&mut self, message: impl Into<String>, payload: impl Into<Payload>) {
        self.write(LogLevel::Error, message, Some(payload.into()));
    }

    /// Write one entry: the header, then the payload line if the payload is truthy
    pub fn write(&mut self, level: LogLevel, message: impl Into<String>, payload: Option<Payload>) {
        let entry = LogEntry::at((self.clock)(), level, message, payload);
        self.sink.append_line(&entry.header());
        if let Some(detail) = entry.detail() {
            self.sink.append_line(&detail);
        }
    }

    /// Reveal the channel's output
    pub fn show(&mut self) {
        self.sink.show();
    }

    /// Release the sink
    pub fn dispose(mut self) {
        self.sink.dispose();
        tracing::debug!(channel = %self.name, "Disposed output channel");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::{TimeZone, Timelike};
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Append(String),
        Show,
        Dispose,
    }

    /// Sink recording every call, shared with the test through `Rc`
    #[derive(Clone, Default)]
    struct RecordingSink {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl RecordingSink {
        fn lines(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .filter_map(|c| match c {
                    Call::Append(line) => Some(line.clone()),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, call: &Call) -> usize {
            self.calls.borrow().iter().filter(|c| *c == call).count()
        }
    }

    impl OutputSink for RecordingSink {
        fn append_line(&mut self, line: &str) {
            self.calls.borrow_mut().push(Call::Append(line.to_string()));
        }

        fn show(&mut self) {
            self.calls.borrow_mut().push(Call::Show);
        }

        fn dispose(&mut self) {
            self.calls.borrow_mut().push(Call::Dispose);
        }
    }

    struct RecordingProvider {
        sink: RecordingSink,
    }

    impl SinkProvider for RecordingProvider {
        type Sink = RecordingSink;

        fn create(&self, _name: &str) -> Result<RecordingSink> {
            Ok(self.sink.clone())
        }
    }

    struct FailingProvider;

    impl SinkProvider for FailingProvider {
        type Sink = RecordingSink;

        fn create(&self, name: &str) -> Result<RecordingSink> {
            bail!("no panel available for {}", name)
        }
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 21, 9, 3, 7)
            .unwrap()
            .with_nanosecond(42_000_000)
            .unwrap()
    }

    fn channel() -> (LogChannel<RecordingSink>, RecordingSink) {
        let sink = RecordingSink::default();
        let channel = LogChannel::from_sink("Test", sink.clone()).with_clock(fixed_clock);
        (channel, sink)
    }

    #[test]
    fn test_new_uses_provider() {
        let provider = RecordingProvider {
            sink: RecordingSink::default(),
        };
        let mut log = LogChannel::new(&provider, "Language Server").unwrap();
        log.info("ready");

        assert_eq!(log.name(), "Language Server");
        assert_eq!(provider.sink.lines().len(), 1);
    }

    #[test]
    fn test_new_propagates_sink_creation_failure() {
        let result = LogChannel::new(&FailingProvider, "Broken");
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "no panel available for Broken");
    }

    #[test]
    fn test_info_without_payload() {
        let (mut log, sink) = channel();
        log.info("Starting");
        assert_eq!(sink.lines(), vec!["[Info  - 09:03:07.42] Starting"]);
    }

    #[test]
    fn test_error_with_stack_trace() {
        let (mut log, sink) = channel();
        log.error_with(
            "Failed",
            Payload::error_with_stack("boom", "Error: boom\n at main (index.js:1:1)"),
        );

        assert_eq!(
            sink.lines(),
            vec![
                "[Error  - 09:03:07.42] Failed",
                "Error: boom\n at main (index.js:1:1)",
            ]
        );
    }

    #[test]
    fn test_trace_with_failure_object() {
        let (mut log, sink) = channel();
        log.trace_with("Result", json!({"success": false, "message": "bad input"}));

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[Trace  - 09:03:07.42] Result");
        assert_eq!(lines[1], "bad input");
    }

    #[test]
    fn test_falsy_payloads_write_header_only() {
        let (mut log, sink) = channel();
        log.info_with("null", Value::Null);
        log.info_with("empty", "");
        log.info_with("zero", 0i64);
        log.info_with("false", false);
        log.write(LogLevel::Info, "none", None);

        let lines = sink.lines();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.starts_with("[Info  - ")));
    }

    #[test]
    fn test_truthy_payload_writes_two_lines() {
        let (mut log, sink) = channel();
        log.info_with("count", 3i64);
        assert_eq!(sink.lines(), vec!["[Info  - 09:03:07.42] count", "3"]);
    }

    #[test]
    fn test_plain_integer_payload() {
        let (mut log, sink) = channel();
        log.info_with("count", 3);
        log.info_with("none", 0);
        assert_eq!(
            sink.lines(),
            vec![
                "[Info  - 09:03:07.42] count",
                "3",
                "[Info  - 09:03:07.42] none",
            ]
        );
    }

    #[test]
    fn test_each_level_uses_its_name() {
        let (mut log, sink) = channel();
        log.trace("a");
        log.info("b");
        log.error("c");

        assert_eq!(
            sink.lines(),
            vec![
                "[Trace  - 09:03:07.42] a",
                "[Info  - 09:03:07.42] b",
                "[Error  - 09:03:07.42] c",
            ]
        );
    }

    #[test]
    fn test_show_and_dispose_call_sink_once() {
        let (mut log, sink) = channel();
        log.show();
        assert_eq!(sink.count(&Call::Show), 1);
        log.show();
        assert_eq!(sink.count(&Call::Show), 2);

        log.dispose();
        assert_eq!(sink.count(&Call::Dispose), 1);
    }

    #[test]
    fn test_wall_clock_header_shape() {
        let sink = RecordingSink::default();
        let mut log = LogChannel::from_sink("Test", sink.clone());
        log.error("live");

        let line = &sink.lines()[0];
        assert!(line.starts_with("[Error  - "));
        assert!(line.ends_with("] live"));
    }
}
