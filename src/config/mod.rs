//! Site configuration management for `directory.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   ├── build      # [build]
//! │   ├── blog       # [blog]
//! │   └── validate   # [validate]
//! ├── types/         # ConfigError, diagnostics, field paths
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The loaded `SiteConfig` is immutable and passed by reference into every
//! stage; nothing reads configuration from global state.

pub mod section;
pub mod types;

pub use section::{
    BlogConfig, BuildSectionConfig, SiteSectionConfig, ValidateConfig,
    ValidateLevel,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands, ValidateArgs},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "directory.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `directory.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory, parent of the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub blog: BlogConfig,

    #[serde(default)]
    pub validate: ValidateConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// A missing default `directory.toml` falls back to built-in defaults;
    /// a missing file passed via `--config` is an error.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let (config_path, explicit) = match &cli.config {
            Some(path) => (cwd.join(path), true),
            None => (cwd.join(CONFIG_FILE), false),
        };

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else if explicit {
            return Err(ConfigError::NotFound(config_path).into());
        } else {
            debug!("config"; "no {} found, using defaults", CONFIG_FILE);
            Self::default()
        };

        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.config_path = config_path;
        config.finalize(&root, cli);
        config.validate()?;

        Ok(config)
    }

    /// Resolve paths and apply command-line overrides.
    fn finalize(&mut self, root: &Path, cli: &Cli) {
        self.root = root.to_path_buf();
        self.apply_command_options(&cli.command);
        self.build.normalize(root);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Unknown keys are reported, never fatal.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warn"; "unknown fields in {} are ignored: {}", display_path, fields.join(", "));
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, command: &Commands) {
        match command {
            Commands::Build { args } => self.apply_build_args(args),
            Commands::Validate { args, .. } => self.apply_validate_args(args),
            Commands::Images { .. } => {}
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.clean, args.clean.as_ref());
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.fallback, args.fallback.as_ref());
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.data, args.data.as_ref());
        Self::update_option(&mut self.site.url, args.site_url.as_ref());
    }

    fn apply_validate_args(&mut self, args: &ValidateArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.output, args.output.as_ref());
        if args.warn_only {
            self.validate.level = ValidateLevel::Warn;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate all sections, reporting every error at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.blog.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a config snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Defaults with paths rooted at `root`, as after a real load.
#[cfg(test)]
pub fn test_config_at(root: &Path, content: &str) -> SiteConfig {
    let mut config = test_parse_config(content);
    config.root = root.to_path_buf();
    config.config_path = root.join(CONFIG_FILE);
    config.build.normalize(root);
    config
}

// ============================================================================
// tests
// ============================================================================
