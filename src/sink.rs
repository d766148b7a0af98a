//! Output sinks: where generated pages go.
//!
//! The generator never decides between disk and memory itself; callers
//! inject an [`OutputSink`]. The CLI injects [`DiskSink`], the streaming
//! pipeline injects [`MemorySink`] and hands the files downstream.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GuideError;
use crate::log;

/// A generated file: one rendered HTML page or one JSON context dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Bare file name, e.g. `index.html`
    pub name: String,

    /// Path relative to the destination directory
    pub path: PathBuf,

    /// Rendered bytes
    pub contents: Vec<u8>,
}

/// Strategy interface for page output.
pub trait OutputSink {
    /// Take ownership of one generated file.
    fn emit(&mut self, file: OutputFile) -> Result<(), GuideError>;
}

// ============================================================================
// DiskSink
// ============================================================================

/// Writes each file under a destination directory.
pub struct DiskSink {
    dest: PathBuf,
    quiet: bool,
}

impl DiskSink {
    pub fn new(dest: impl Into<PathBuf>, quiet: bool) -> Self {
        Self {
            dest: dest.into(),
            quiet,
        }
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

impl OutputSink for DiskSink {
    fn emit(&mut self, file: OutputFile) -> Result<(), GuideError> {
        let target = self.dest.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| GuideError::Write(target.clone(), e))?;
        }
        fs::write(&target, &file.contents).map_err(|e| GuideError::Write(target.clone(), e))?;

        if !self.quiet {
            log!("output"; "{}", target.display());
        }
        Ok(())
    }
}

// ============================================================================
// MemorySink
// ============================================================================

/// Collects files in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Vec<OutputFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[OutputFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<OutputFile> {
        self.files
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, file: OutputFile) -> Result<(), GuideError> {
        self.files.push(file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(name: &str, contents: &str) -> OutputFile {
        OutputFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            contents: contents.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_memory_sink_preserves_order() {
        let mut sink = MemorySink::new();
        sink.emit(sample("index.html", "<p>one</p>")).unwrap();
        sink.emit(sample("palette.html", "<p>two</p>")).unwrap();

        let files = sink.into_files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "index.html");
        assert_eq!(files[1].name, "palette.html");
    }

    #[test]
    fn test_disk_sink_writes_file() {
        let dir = tempdir().unwrap();
        let mut sink = DiskSink::new(dir.path(), true);
        sink.emit(sample("index.html", "<p>guide</p>")).unwrap();

        let written = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(written, "<p>guide</p>");
    }

    #[test]
    fn test_disk_sink_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let mut sink = DiskSink::new(dir.path().join("out/nested"), true);
        sink.emit(sample("index.html", "x")).unwrap();

        assert!(dir.path().join("out/nested/index.html").exists());
    }
}
