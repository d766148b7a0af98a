//! Generator error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing sources or producing styleguide pages.
#[derive(Debug, Error)]
pub enum GuideError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("section `{0}` referenced by @sectionof was never defined")]
    UndefinedSection(String),

    #[error("section `{0}` is nested inside itself via @sectionof")]
    SectionCycle(String),

    #[error("template rendering failed for page `{page}`")]
    Render {
        page: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("preprocess hook failed for page `{page}`: {message}")]
    Preprocess { page: String, message: String },

    #[error("failed to serialize context for page `{0}`")]
    Serialize(String, #[source] serde_json::Error),

    #[error("failed to write output `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}
