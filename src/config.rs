//! Generator configuration for `styledoc.toml`.
//!
//! # Example
//!
//! ```toml
//! minify = true
//! inline_stylesheets = true
//! template = "guide/template.html"
//! ```
//!
//! CLI flags override file values. The `preprocess` hook is runtime-only
//! state on the pipeline or generator call and never appears here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::BuildArgs;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),
}

/// Root configuration structure representing styledoc.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GuideConfig {
    /// Template file overriding the embedded default
    pub template: Option<PathBuf>,

    /// Collapse insignificant whitespace in rendered HTML
    pub minify: bool,

    /// Emit the serialized page context (`<id>.json`) instead of HTML
    pub stream_context: bool,

    /// Read each input stylesheet and expose its contents to the template
    pub inline_stylesheets: bool,

    /// Suppress generator logging
    pub quiet: bool,
}

impl GuideConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: GuideConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_str(&content)
    }

    /// Apply CLI argument overrides on top of file values.
    pub fn update_with_cli(&mut self, args: &BuildArgs) {
        if let Some(minify) = args.minify {
            self.minify = minify;
        }
        if let Some(template) = &args.template {
            self.template = Some(template.clone());
        }
        self.stream_context |= args.json;
        self.inline_stylesheets |= args.inline;
        self.quiet |= args.quiet;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GuideConfig::default();
        assert!(!config.minify);
        assert!(!config.stream_context);
        assert!(!config.inline_stylesheets);
        assert!(config.template.is_none());
    }

    #[test]
    fn test_from_str() {
        let config = GuideConfig::from_str(
            r#"
minify = true
inline_stylesheets = true
template = "guide/template.html"
"#,
        )
        .unwrap();
        assert!(config.minify);
        assert!(config.inline_stylesheets);
        assert_eq!(
            config.template.as_deref(),
            Some(Path::new("guide/template.html"))
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(GuideConfig::from_str("minfy = true").is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = GuideConfig::from_path(Path::new("/nonexistent/styledoc.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = GuideConfig::from_str("minify = true").unwrap();
        let args = BuildArgs {
            inputs: vec![],
            output: PathBuf::from("styleguide"),
            minify: Some(false),
            json: true,
            inline: false,
            template: Some(PathBuf::from("custom.html")),
            quiet: true,
        };
        config.update_with_cli(&args);

        assert!(!config.minify);
        assert!(config.stream_context);
        assert!(config.quiet);
        assert_eq!(config.template.as_deref(), Some(Path::new("custom.html")));
    }

    #[test]
    fn test_cli_keeps_file_values_when_unset() {
        let mut config = GuideConfig::from_str("minify = true").unwrap();
        let args = BuildArgs {
            inputs: vec![],
            output: PathBuf::from("styleguide"),
            minify: None,
            json: false,
            inline: false,
            template: None,
            quiet: false,
        };
        config.update_with_cli(&args);

        assert!(config.minify);
        assert!(!config.quiet);
    }
}
