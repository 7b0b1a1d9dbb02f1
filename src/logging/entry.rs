//! A single leveled log entry and its rendered lines

use chrono::{DateTime, Timelike, Utc};

use super::level::LogLevel;
use super::payload::Payload;

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp when the entry was written
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional secondary data
    pub payload: Option<Payload>,
}

impl LogEntry {
    /// Create a new log entry stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>, payload: Option<Payload>) -> Self {
        Self::at(Utc::now(), level, message, payload)
    }

    /// Create a log entry with an explicit timestamp
    pub fn at(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
        payload: Option<Payload>,
    ) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            payload,
        }
    }

    /// Header line: `[<Level>  - <hh>:<mm>:<ss>.<ms>] <message>`
    pub fn header(&self) -> String {
        format!(
            "[{}  - {}] {}",
            self.level,
            format_timestamp(&self.timestamp),
            self.message
        )
    }

    /// Second line, present only for a truthy payload
    pub fn detail(&self) -> Option<String> {
        self.payload
            .as_ref()
            .filter(|p| p.is_truthy())
            .map(|p| p.to_string())
    }

    /// All lines for this entry, header first
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.header()];
        lines.extend(self.detail());
        lines
    }
}

/// Format a timestamp as `hh:mm:ss.ms`
///
/// Hours, minutes and seconds are zero-padded to two digits; milliseconds
/// are not padded.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    // Leap seconds report 1000+ in the sub-second field
    let millis = timestamp.timestamp_subsec_millis().min(999);
    format!(
        "{:02}:{:02}:{:02}.{}",
        timestamp.hour(),
        timestamp.minute(),
        timestamp.second(),
        millis
    )
}
