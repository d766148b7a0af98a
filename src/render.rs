//! Template rendering via minijinja.
//!
//! The default page template is embedded at compile time; a config
//! `template` path overrides it. The `Environment` handle is passed to
//! user `preprocess` hooks so they can register filters or replacement
//! templates before rendering.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use minijinja::Environment;

use crate::config::GuideConfig;
use crate::context::PageContext;
use crate::error::GuideError;

/// Default page template.
/// Loaded from `src/embed/template.html` at compile time.
pub const DEFAULT_TEMPLATE: &str = include_str!("embed/template.html");

/// Fresh rendering environment for one generator run.
pub fn environment() -> Environment<'static> {
    Environment::new()
}

/// Resolve the template source: config override file, or the embedded default.
pub fn load_template(config: &GuideConfig) -> Result<Cow<'static, str>, GuideError> {
    match &config.template {
        Some(path) => {
            let source =
                fs::read_to_string(path).map_err(|e| GuideError::Io(path.clone(), e))?;
            Ok(Cow::Owned(source))
        }
        None => Ok(Cow::Borrowed(DEFAULT_TEMPLATE)),
    }
}

/// Render the template against one page's context.
pub fn render_page(
    env: &Environment<'_>,
    template: &str,
    context: &PageContext,
) -> Result<String, GuideError> {
    env.render_str(template, context)
        .map_err(|source| GuideError::Render {
            page: context.id.clone(),
            source,
        })
}
