//! Utility modules for the styleguide generator.

pub mod log;
pub mod minify;
