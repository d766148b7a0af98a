//! HTML minification.
//!
//! Collapses insignificant whitespace in rendered pages, with automatic
//! enable/disable based on `GuideConfig`.

use std::borrow::Cow;

use crate::config::GuideConfig;

/// Minify rendered HTML when the config asks for it.
///
/// Returns `Cow::Borrowed` if minify is disabled, `Cow::Owned` if minified.
pub fn minify_html<'a>(html: &'a [u8], config: &GuideConfig) -> Cow<'a, [u8]> {
    if config.minify {
        Cow::Owned(minify_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

/// Minify HTML content using the `minify_html` crate.
fn minify_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    minify_html::minify(html, &cfg)
}
