//! File-backed output panel
//!
//! Each channel name maps to one `.log` file in the provider's directory.
//! Lines are appended and flushed immediately so the file can be tailed.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::sink::{OutputSink, SinkProvider};

/// Path of the log file backing the channel `name`
pub fn log_file_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.log", sanitize_name(name)))
}

/// Keep names usable as file names on every platform
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "output".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Sink appending lines to a file
#[derive(Debug)]
pub struct FileSink {
    name: String,
    path: PathBuf,
    /// None once disposed
    file: Option<File>,
}

impl FileSink {
    /// Open (or create) the file at `path` in append mode
    pub fn open(name: impl Into<String>, path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        Ok(Self {
            name: name.into(),
            path,
            file: Some(file),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn append_line(&mut self, line: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        if let Err(e) = writeln!(file, "{}", line).and_then(|_| file.flush()) {
            tracing::warn!(
                channel = %self.name,
                path = %self.path.display(),
                "Failed to write output line: {}",
                e
            );
        }
    }

    fn show(&mut self) {
        tracing::info!(channel = %self.name, "Output written to {}", self.path.display());
    }

    fn dispose(&mut self) {
        if let Some(mut file) = self.file.take() {
            if let Err(e) = file.flush() {
                tracing::warn!(
                    channel = %self.name,
                    path = %self.path.display(),
                    "Failed to flush output on dispose: {}",
                    e
                );
            }
        }
    }
}

/// Creates file-backed panels inside one directory
#[derive(Debug, Clone)]
pub struct FileProvider {
    /// Directory holding the log files
    pub dir: PathBuf,
}

impl FileProvider {
    /// Create a provider writing into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SinkProvider for FileProvider {
    type Sink = FileSink;

    fn create(&self, name: &str) -> Result<FileSink> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create logs directory {}", self.dir.display()))?;

        FileSink::open(name, log_file_path(&self.dir, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_path() {
        let dir = PathBuf::from("/tmp/output-channel/logs");
        let path = log_file_path(&dir, "Language Server");
        assert_eq!(path, dir.join("Language Server.log"));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_name("  "), "output");
        assert_eq!(sanitize_name(".."), "output");
        assert_eq!(sanitize_name("build.log"), "build.log");
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let temp_dir = TempDir::new().unwrap();
        let provider = FileProvider::new(temp_dir.path().join("logs"));

        let mut sink = provider.create("Build").unwrap();
        sink.append_line("first");
        sink.append_line("second");
        sink.dispose();

        let content = fs::read_to_string(temp_dir.path().join("logs/Build.log")).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_file_sink_keeps_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let provider = FileProvider::new(temp_dir.path());

        let mut first = provider.create("Build").unwrap();
        first.append_line("run 1");
        first.dispose();

        let mut second = provider.create("Build").unwrap();
        second.append_line("run 2");
        second.dispose();

        let content = fs::read_to_string(second.path()).unwrap();
        assert_eq!(content, "run 1\nrun 2\n");
    }

    #[test]
    fn test_file_sink_ignores_writes_after_dispose() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = FileProvider::new(temp_dir.path()).create("Build").unwrap();

        sink.dispose();
        sink.append_line("late");
        sink.dispose();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_file_provider_fails_when_dir_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        File::create(&blocker).unwrap();

        let err = FileProvider::new(&blocker).create("Build").unwrap_err();
        assert!(err.to_string().contains("Failed to create logs directory"));
    }
}
