//! In-memory output panel
//!
//! Provides a thread-safe ring buffer of output lines that a host UI can render
//! while a channel writes into it.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use anyhow::Result;

use super::sink::{OutputSink, SinkProvider};

/// Default number of lines kept per buffer
pub const DEFAULT_MAX_LINES: usize = 10_000;

/// Thread-safe ring buffer for storing output lines
#[derive(Debug)]
pub struct LineBuffer {
    /// Display name of the panel
    name: String,
    /// Output lines (capped at max_lines)
    lines: RwLock<VecDeque<String>>,
    /// Set once the owner asked for the panel to be shown
    revealed: AtomicBool,
    /// Set once the owner released the panel
    disposed: AtomicBool,
    /// Maximum lines to keep
    max_lines: usize,
}

impl LineBuffer {
    /// Create a new line buffer with the given capacity
    pub fn new(name: impl Into<String>, max_lines: usize) -> Self {
        let max_lines = max_lines.max(1);
        Self {
            name: name.into(),
            lines: RwLock::new(VecDeque::with_capacity(max_lines.min(DEFAULT_MAX_LINES))),
            revealed: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            max_lines,
        }
    }

    /// Display name of the panel
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Push a line, evicting the oldest one when full
    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut lines) = self.lines.write() {
            if lines.len() >= self.max_lines {
                lines.pop_front();
            }
            lines.push_back(line.into());
        }
    }

    /// Get all lines as a vector (for rendering)
    pub fn all_lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get the number of lines in the buffer
    pub fn len(&self) -> usize {
        self.lines.read().map(|l| l.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all lines
    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.write() {
            lines.clear();
        }
    }

    /// Whether the panel has been revealed
    pub fn is_revealed(&self) -> bool {
        self.revealed.load(Ordering::Relaxed)
    }

    /// Whether the panel has been released
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Relaxed)
    }
}

/// Sink writing into a shared [`LineBuffer`]
#[derive(Debug, Clone)]
pub struct BufferSink {
    buffer: Arc<LineBuffer>,
}

impl BufferSink {
    /// Wrap an existing buffer
    pub fn new(buffer: Arc<LineBuffer>) -> Self {
        Self { buffer }
    }

    /// Shared handle to the underlying buffer, for the host UI
    pub fn buffer(&self) -> Arc<LineBuffer> {
        Arc::clone(&self.buffer)
    }
}

impl OutputSink for BufferSink {
    fn append_line(&mut self, line: &str) {
        if self.buffer.is_disposed() {
            return;
        }
        self.buffer.push(line);
    }

    fn show(&mut self) {
        self.buffer.revealed.store(true, Ordering::Relaxed);
    }

    fn dispose(&mut self) {
        self.buffer.disposed.store(true, Ordering::Relaxed);
        self.buffer.clear();
    }
}

/// Creates in-memory panels
#[derive(Debug, Clone)]
pub struct BufferProvider {
    /// Capacity of each created buffer
    pub max_lines: usize,
}

impl BufferProvider {
    /// Create a provider whose buffers keep up to `max_lines` lines
    pub fn new(max_lines: usize) -> Self {
        Self { max_lines }
    }
}

impl Default for BufferProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl SinkProvider for BufferProvider {
    type Sink = BufferSink;

    fn create(&self, name: &str) -> Result<BufferSink> {
        Ok(BufferSink::new(Arc::new(LineBuffer::new(
            name,
            self.max_lines,
        ))))
    }
}
