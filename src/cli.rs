//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Styledoc living-styleguide generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file name (default: styledoc.toml)
    #[arg(short = 'C', long, default_value = "styledoc.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Build arguments for the Build command
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Input stylesheet files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Destination directory for generated pages
    #[arg(short, long, default_value = "styleguide")]
    pub output: PathBuf,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Emit the raw page context as JSON instead of rendered HTML
    #[arg(long)]
    pub json: bool,

    /// Inline input stylesheets into the generated pages
    #[arg(long)]
    pub inline: bool,

    /// Template file overriding the embedded default
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Suppress generator logging
    #[arg(short, long)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the styleguide into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

impl Cli {
    pub fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Commands::Build { build_args } => build_args,
        }
    }
}
