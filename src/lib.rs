//! styledoc - a living styleguide generator.
//!
//! Parses documentation comments out of stylesheets (`@section`,
//! `@sectionof`, `@page`, `@example`) and renders them into HTML pages,
//! or serializes the page contexts to JSON. Output goes through an
//! injected [`OutputSink`]: the CLI writes to disk, the streaming
//! [`GuidePipeline`] collects files in memory for a host build pipeline.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod sink;
pub mod utils;

pub use config::GuideConfig;
pub use context::{PageContext, Section};
pub use error::GuideError;
pub use generator::{GenerateReport, PreprocessHook, PreprocessOutcome, generate};
pub use pipeline::{FileInput, GuidePipeline, PipelineError, PipelineResult};
pub use sink::{DiskSink, MemorySink, OutputFile, OutputSink};
