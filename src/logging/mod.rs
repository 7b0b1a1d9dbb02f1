//! Output channel logging
//!
//! Provides leveled, timestamped logging into named output sinks, with
//! in-memory and file-backed sink implementations.

mod buffer;
mod channel;
mod diagnostics;
mod entry;
mod file_sink;
mod level;
mod payload;
mod sink;

pub use buffer::{BufferProvider, BufferSink, LineBuffer, DEFAULT_MAX_LINES};
pub use channel::LogChannel;
pub use diagnostics::{init_diagnostics, DEFAULT_FILTER};
pub use entry::{format_timestamp, LogEntry};
pub use file_sink::{log_file_path, FileProvider, FileSink};
pub use level::LogLevel;
pub use payload::{OperationResult, Payload};
pub use sink::{OutputSink, SinkProvider};
