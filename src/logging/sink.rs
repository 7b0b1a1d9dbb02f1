//! Output sink abstraction
//!
//! A sink is the named, append-only text destination a channel writes into.
//! Hosts provide sinks through a [`SinkProvider`], which plays the role of the
//! UI surface that owns output panels.

use anyhow::Result;

/// Append-only text destination
pub trait OutputSink {
    /// Append one line of text
    fn append_line(&mut self, line: &str);

    /// Reveal the sink's output to the user
    fn show(&mut self);

    /// Release the sink
    ///
    /// Owners must not use the sink after disposing it.
    fn dispose(&mut self);
}

/// Creates named sinks
pub trait SinkProvider {
    type Sink: OutputSink;

    /// Create a sink with the given display name
    fn create(&self, name: &str) -> Result<Self::Sink>;
}
