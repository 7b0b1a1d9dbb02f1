//! Configuration for output channels

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::{
    BufferProvider, BufferSink, FileProvider, FileSink, LineBuffer, LogChannel, OutputSink,
    SinkProvider, DEFAULT_MAX_LINES,
};

/// Where channel output goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// In-memory panel rendered by the host
    #[default]
    Buffer,
    /// One `.log` file per channel in `logs_dir`
    File,
}

/// Channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Display name of the channel
    #[serde(default = "default_name")]
    pub name: String,

    /// Sink kind: "buffer" (default) or "file"
    #[serde(default)]
    pub sink: SinkKind,

    /// Maximum lines kept by an in-memory panel (default: 10000)
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Directory for file sinks
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
}

fn default_name() -> String {
    "Output".to_string()
}

fn default_max_lines() -> usize {
    DEFAULT_MAX_LINES
}

/// Default directory for file sinks
///
/// Falls back to ./.output-channel/logs if the data directory cannot be determined
pub fn default_logs_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("output-channel").join("logs"),
        None => {
            tracing::warn!("Could not determine data directory, using current directory for logs");
            PathBuf::from(".output-channel").join("logs")
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            sink: SinkKind::default(),
            max_lines: default_max_lines(),
            logs_dir: default_logs_dir(),
        }
    }
}

impl ChannelConfig {
    /// Load configuration from file, or return default if not found
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Provider for the configured sink kind
    pub fn provider(&self) -> ConfiguredProvider {
        match self.sink {
            SinkKind::Buffer => ConfiguredProvider::Buffer(BufferProvider::new(self.max_lines)),
            SinkKind::File => ConfiguredProvider::File(FileProvider::new(&self.logs_dir)),
        }
    }

    /// Open the configured channel
    pub fn open(&self) -> Result<LogChannel<ConfiguredSink>> {
        LogChannel::new(&self.provider(), &self.name)
    }
}

/// Provider selected by [`ChannelConfig`]
#[derive(Debug, Clone)]
pub enum ConfiguredProvider {
    Buffer(BufferProvider),
    File(FileProvider),
}

impl SinkProvider for ConfiguredProvider {
    type Sink = ConfiguredSink;

    fn create(&self, name: &str) -> Result<ConfiguredSink> {
        match self {
            ConfiguredProvider::Buffer(p) => p.create(name).map(ConfiguredSink::Buffer),
            ConfiguredProvider::File(p) => p.create(name).map(ConfiguredSink::File),
        }
    }
}

/// Sink created from a [`ConfiguredProvider`]
#[derive(Debug)]
pub enum ConfiguredSink {
    Buffer(BufferSink),
    File(FileSink),
}

impl ConfiguredSink {
    /// The in-memory panel, for buffer sinks
    pub fn buffer(&self) -> Option<Arc<LineBuffer>> {
        match self {
            ConfiguredSink::Buffer(sink) => Some(sink.buffer()),
            ConfiguredSink::File(_) => None,
        }
    }

    /// The backing file, for file sinks
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfiguredSink::Buffer(_) => None,
            ConfiguredSink::File(sink) => Some(sink.path()),
        }
    }
}

impl OutputSink for ConfiguredSink {
    fn append_line(&mut self, line: &str) {
        match self {
            ConfiguredSink::Buffer(sink) => sink.append_line(line),
            ConfiguredSink::File(sink) => sink.append_line(line),
        }
    }

    fn show(&mut self) {
        match self {
            ConfiguredSink::Buffer(sink) => sink.show(),
            ConfiguredSink::File(sink) => sink.show(),
        }
    }

    fn dispose(&mut self) {
        match self {
            ConfiguredSink::Buffer(sink) => sink.dispose(),
            ConfiguredSink::File(sink) => sink.dispose(),
        }
    }
}
