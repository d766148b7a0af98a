//! Generation orchestration.
//!
//! # Architecture
//!
//! ```text
//! generate(paths, dest, config, hook, sink)
//!     │
//!     ├── read + parse every input (rayon, order-preserving)
//!     ├── assemble section forest, group into page contexts
//!     │       └── a dangling @sectionof fails the whole run here
//!     └── per page, in order:
//!             preprocess hook ──► inline stylesheets ──► render | dump JSON
//!                 ──► minify ──► sink.emit
//! ```
//!
//! Per-page failures are collected into the report and the run continues;
//! only structural errors (unreadable input, dangling references, a bad
//! template path) abort before the page loop. Every page is accounted for
//! exactly once, so `completed` always reaches `expected` on `Ok`.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::Environment;
use rayon::prelude::*;

use crate::config::GuideConfig;
use crate::context::{PageContext, Section};
use crate::error::GuideError;
use crate::log;
use crate::parser::sections::{RootSection, assemble, collect_raw_sections};
use crate::render;
use crate::sink::{OutputFile, OutputSink};
use crate::utils::minify::minify_html;

// ============================================================================
// Preprocess hook
// ============================================================================

/// What a `preprocess` hook decided for one page.
#[derive(Debug)]
pub enum PreprocessOutcome {
    /// Render and emit the page as usual
    Continue,

    /// Emit nothing for this page; not an error, the run continues
    Skip,

    /// Surface an error for this page and emit nothing
    Fail(String),
}

/// User hook run per page before rendering.
///
/// Receives the mutable page context, the template source, and the
/// rendering environment (for registering filters or templates).
pub type PreprocessHook =
    Box<dyn Fn(&mut PageContext, &str, &mut Environment<'static>) -> PreprocessOutcome>;

// ============================================================================
// Report
// ============================================================================

/// Accounting for one generator run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Page contexts constructed from the input
    pub expected: usize,

    /// Pages accounted for (emitted, skipped, or failed)
    pub completed: usize,

    /// Files handed to the sink
    pub emitted: usize,

    /// Per-page failures; the run continued past each
    pub errors: Vec<GuideError>,
}

// ============================================================================
// Public API
// ============================================================================

/// Generate the styleguide for `paths`, emitting every page through `sink`.
///
/// `dest` roots stylesheet-inlining lookups and is reported in the final
/// log line; with an in-memory sink nothing is ever written beneath it.
pub fn generate(
    paths: &[PathBuf],
    dest: &Path,
    config: &GuideConfig,
    hook: Option<&PreprocessHook>,
    sink: &mut dyn OutputSink,
) -> Result<GenerateReport, GuideError> {
    let roots = parse_inputs(paths)?;
    let contexts = build_contexts(roots, paths);
    let template = render::load_template(config)?;
    let mut env = render::environment();

    let mut report = GenerateReport {
        expected: contexts.len(),
        ..Default::default()
    };

    for mut context in contexts {
        match process_page(&mut context, &template, &mut env, dest, config, hook, sink) {
            Ok(emitted) => report.emitted += usize::from(emitted),
            Err(e) => report.errors.push(e),
        }
        // Exactly-once accounting, success or not
        report.completed += 1;
    }
    debug_assert_eq!(report.completed, report.expected);

    if !config.quiet {
        log!("styledoc"; "styleguide generated at `{}`", dest.display());
    }
    Ok(report)
}

// ============================================================================
// Parsing phase
// ============================================================================

/// Read and parse every input file, preserving input order.
fn parse_inputs(paths: &[PathBuf]) -> Result<Vec<RootSection>, GuideError> {
    let per_file: Vec<Result<Vec<_>, GuideError>> = paths
        .par_iter()
        .map(|path| {
            let source =
                fs::read_to_string(path).map_err(|e| GuideError::Io(path.clone(), e))?;
            Ok(collect_raw_sections(&source))
        })
        .collect();

    let mut raws = Vec::new();
    for file_sections in per_file {
        raws.extend(file_sections?);
    }
    assemble(raws)
}

/// Group resolved roots into page contexts, first-reference page order.
fn build_contexts(roots: Vec<RootSection>, paths: &[PathBuf]) -> Vec<PageContext> {
    let stylesheets: Vec<String> = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let all_sections: Vec<Section> = roots.iter().map(|r| r.section.clone()).collect();

    let mut contexts: Vec<PageContext> = Vec::new();
    for root in roots {
        // Group by slug so spellings that share an output file share a
        // context; the first spelling supplies the title.
        let id = Section::slugify(&root.page);
        let idx = match contexts.iter().position(|c| c.id == id) {
            Some(idx) => idx,
            None => {
                contexts.push(PageContext::new(&root.page));
                contexts.len() - 1
            }
        };
        contexts[idx].sections.push(root.section);
    }

    let page_ids: Vec<String> = contexts.iter().map(|c| c.id.clone()).collect();
    for context in &mut contexts {
        context.all_sections = all_sections.clone();
        context.stylesheets = stylesheets.clone();
        context.pages = page_ids.clone();
    }
    contexts
}

// ============================================================================
// Page phase
// ============================================================================

/// Drive one page through hook, inlining, rendering, and emission.
///
/// Returns whether a file was emitted (`Skip` completes without one).
fn process_page(
    context: &mut PageContext,
    template: &str,
    env: &mut Environment<'static>,
    dest: &Path,
    config: &GuideConfig,
    hook: Option<&PreprocessHook>,
    sink: &mut dyn OutputSink,
) -> Result<bool, GuideError> {
    if let Some(hook) = hook {
        match hook(context, template, env) {
            PreprocessOutcome::Continue => {}
            PreprocessOutcome::Skip => return Ok(false),
            PreprocessOutcome::Fail(message) => {
                return Err(GuideError::Preprocess {
                    page: context.id.clone(),
                    message,
                });
            }
        }
    }

    if config.inline_stylesheets {
        inline_stylesheets(context, dest)?;
    }

    let (name, contents) = if config.stream_context {
        let json = serde_json::to_vec_pretty(context)
            .map_err(|e| GuideError::Serialize(context.id.clone(), e))?;
        (format!("{}.json", context.id), json)
    } else {
        let html = render::render_page(env, template, context)?;
        let html = minify_html(html.as_bytes(), config).into_owned();
        (format!("{}.html", context.id), html)
    };

    sink.emit(OutputFile {
        path: PathBuf::from(&name),
        name,
        contents,
    })?;
    Ok(true)
}

/// Read every referenced stylesheet and append its raw contents.
///
/// Relative references resolve against the destination directory, the
/// same root the disk sink writes under.
fn inline_stylesheets(context: &mut PageContext, dest: &Path) -> Result<(), GuideError> {
    for sheet in context.stylesheets.clone() {
        let reference = Path::new(&sheet);
        let path = if reference.is_absolute() {
            reference.to_path_buf()
        } else {
            dest.join(reference)
        };
        let contents =
            fs::read_to_string(&path).map_err(|e| GuideError::Io(path.clone(), e))?;
        context.parsed_stylesheets.push(contents);
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
