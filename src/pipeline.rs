//! Streaming pipeline adapter.
//!
//! Models the host build-pipeline contract: file-like units are written
//! in one at a time, and on `end()` the generator runs once over the
//! collected paths, emitting output files in memory instead of on disk.
//!
//! ```no_run
//! use styledoc::{FileInput, GuideConfig, GuidePipeline};
//!
//! let mut pipeline = GuidePipeline::new("styleguide", GuideConfig::default());
//! pipeline.write(FileInput::buffered("css/buttons.css"));
//! pipeline.write(FileInput::buffered("css/forms.css"));
//! let result = pipeline.end();
//! for file in &result.files {
//!     // hand downstream: (file.name, file.path, file.contents)
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::config::GuideConfig;
use crate::context::PageContext;
use crate::generator::{self, PreprocessHook, PreprocessOutcome};
use crate::sink::{MemorySink, OutputFile};

use minijinja::Environment;

/// Plugin identifier carried on every pipeline error.
pub const PLUGIN_NAME: &str = "styledoc";

// ============================================================================
// Inbound units
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Buffered,
    Empty,
    Stream,
}

/// A file-like unit as the host pipeline hands them in.
#[derive(Debug, Clone)]
pub struct FileInput {
    path: PathBuf,
    kind: FileKind,
}

impl FileInput {
    /// A unit with fully materialized content at `path`.
    pub fn buffered(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::Buffered,
        }
    }

    /// A unit with no content; collectors skip these without error.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::Empty,
        }
    }

    /// A live-stream unit; collectors reject these.
    pub fn stream(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::Stream,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == FileKind::Empty
    }

    pub fn is_stream(&self) -> bool {
        self.kind == FileKind::Stream
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// Outbound errors
// ============================================================================

/// A stream-level error event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    /// Emitting plugin, always [`PLUGIN_NAME`]
    pub plugin: &'static str,

    /// Human-readable message
    pub message: String,
}

impl PipelineError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            plugin: PLUGIN_NAME,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.plugin, self.message)
    }
}

/// Everything one pipeline run produced, in emission order.
///
/// Returning from [`GuidePipeline::end`] is the stream-close signal; a
/// result with errors still closed cleanly.
#[derive(Debug, Default)]
pub struct PipelineResult {
    pub files: Vec<OutputFile>,
    pub errors: Vec<PipelineError>,
}

impl PipelineResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Buffers input units, then runs the generator once over them.
///
/// `end()` consumes the pipeline, so completion cannot be signalled
/// twice.
pub struct GuidePipeline {
    dest: PathBuf,
    config: GuideConfig,
    hook: Option<PreprocessHook>,
    files: Vec<PathBuf>,
    errors: Vec<PipelineError>,
}

impl GuidePipeline {
    /// New pipeline generating into `dest` (only used for stylesheet
    /// inlining lookups; nothing is written to disk).
    pub fn new(dest: impl Into<PathBuf>, config: GuideConfig) -> Self {
        Self {
            dest: dest.into(),
            config,
            hook: None,
            files: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Install a per-page `preprocess` hook.
    pub fn preprocess(
        mut self,
        hook: impl Fn(&mut PageContext, &str, &mut Environment<'static>) -> PreprocessOutcome
        + 'static,
    ) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Accept one input unit.
    ///
    /// Empty units are skipped, stream units are rejected with an error
    /// event, buffered units have their path recorded. Never blocks and
    /// never produces output.
    pub fn write(&mut self, input: FileInput) {
        if input.is_empty() {
            return;
        }
        if input.is_stream() {
            self.errors
                .push(PipelineError::new("Streaming not supported"));
            return;
        }
        self.files.push(input.path);
    }

    /// Signal end of input: run the generator and close the stream.
    pub fn end(mut self) -> PipelineResult {
        let mut sink = MemorySink::new();

        // The host pipeline owns the console; keep the generator silent.
        let mut config = self.config.clone();
        config.quiet = true;

        match generator::generate(
            &self.files,
            &self.dest,
            &config,
            self.hook.as_ref(),
            &mut sink,
        ) {
            Ok(report) => {
                for error in report.errors {
                    self.errors.push(PipelineError::new(error.to_string()));
                }
            }
            Err(error) => self.errors.push(PipelineError::new(error.to_string())),
        }

        PipelineResult {
            files: sink.into_files(),
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_unit_skipped() {
        let mut pipeline = GuidePipeline::new("dest", GuideConfig::default());
        pipeline.write(FileInput::empty("a.css"));
        assert!(pipeline.files.is_empty());
        assert!(pipeline.errors.is_empty());
    }

    #[test]
    fn test_stream_unit_rejected() {
        let mut pipeline = GuidePipeline::new("dest", GuideConfig::default());
        pipeline.write(FileInput::stream("a.css"));

        assert!(pipeline.files.is_empty());
        assert_eq!(pipeline.errors.len(), 1);
        assert_eq!(pipeline.errors[0].plugin, PLUGIN_NAME);
        assert!(pipeline.errors[0].message.contains("Streaming not supported"));
    }

    #[test]
    fn test_buffered_units_recorded_in_order() {
        let mut pipeline = GuidePipeline::new("dest", GuideConfig::default());
        pipeline.write(FileInput::buffered("a.css"));
        pipeline.write(FileInput::buffered("b.css"));

        assert_eq!(
            pipeline.files,
            vec![PathBuf::from("a.css"), PathBuf::from("b.css")]
        );
    }

    #[test]
    fn test_stream_rejection_keeps_pipeline_usable() {
        let mut pipeline = GuidePipeline::new("dest", GuideConfig::default());
        pipeline.write(FileInput::stream("bad.css"));
        pipeline.write(FileInput::buffered("good.css"));

        assert_eq!(pipeline.files, vec![PathBuf::from("good.css")]);
        assert_eq!(pipeline.errors.len(), 1);
    }

    #[test]
    fn test_end_with_no_input_closes_cleanly() {
        let pipeline = GuidePipeline::new("dest", GuideConfig::default());
        let result = pipeline.end();

        assert!(result.files.is_empty());
        assert!(result.is_ok());
    }

    #[test]
    fn test_pipeline_error_display() {
        let error = PipelineError::new("boom");
        assert_eq!(format!("{error}"), "styledoc: boom");
    }
}
