//! styledoc - generate a living styleguide from stylesheet doc comments.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use styledoc::cli::{Cli, Commands};
use styledoc::{DiskSink, GuideConfig, generate, log};

/// Stylesheet extensions picked up when an input is a directory.
const STYLESHEET_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let Commands::Build { build_args } = &cli.command;

    let mut config = if cli.config.exists() {
        GuideConfig::from_path(&cli.config)
            .with_context(|| format!("failed to load `{}`", cli.config.display()))?
    } else {
        GuideConfig::default()
    };
    config.update_with_cli(build_args);

    let inputs = collect_inputs(&build_args.inputs);
    if inputs.is_empty() {
        anyhow::bail!("no stylesheet files found in the given inputs");
    }
    if !config.quiet {
        log!("build"; "parsing {} stylesheet(s)", inputs.len());
    }

    let mut sink = DiskSink::new(&build_args.output, config.quiet);
    let report = generate(&inputs, &build_args.output, &config, None, &mut sink)?;

    for error in &report.errors {
        log!("error"; "{error}");
    }
    if !report.errors.is_empty() {
        anyhow::bail!("{} page(s) failed", report.errors.len());
    }
    Ok(())
}

/// Expand directory inputs into stylesheet files; keep files as given.
fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if is_stylesheet(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| STYLESHEET_EXTENSIONS.contains(&ext))
}
