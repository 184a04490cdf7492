//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Static site builder for the German Odoo partner directory and blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: directory.toml)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate all pages, listings, feed and sitemaps from the data snapshot
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Check the generated site
    #[command(visible_alias = "v")]
    Validate {
        /// Which validator to run
        #[arg(value_enum, default_value = "all")]
        check: ValidateCheck,

        #[command(flatten)]
        args: ValidateArgs,
    },

    /// Show which articles still need generated images
    #[command(visible_alias = "i")]
    Images {
        /// List every pending slug instead of a summary
        #[arg(short, long)]
        list: bool,
    },
}

/// Validator selection for `validate`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateCheck {
    /// Internal link targets and external link attributes
    Links,
    /// Inline and standalone SVG markup policy
    Markup,
    /// Both validators
    All,
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Output directory to validate (default: build.output)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Treat validation failures as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,

    /// Enable verbose output, listing every checked file
    #[arg(short, long)]
    pub verbose: bool,
}

/// Build command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Remove the output directory before building
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub clean: Option<bool>,

    /// Minify generated XML (sitemaps, feed)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Use the bundled sample data when the snapshot is unavailable
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub fallback: Option<bool>,

    /// Snapshot directory (default: build.data)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub data: Option<PathBuf>,

    /// Output directory (default: build.output)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Override site URL, e.g. for a staging deployment
    #[arg(long)]
    pub site_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
