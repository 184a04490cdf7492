//! `[validate]` section configuration.
//!
//! Configuration for the `validate links` and `validate markup` commands.
//!
//! # Example
//!
//! ```toml
//! [validate]
//! level = "error"          # Failure level: error | warn
//! svg_max_bytes = 51200    # larger SVG blocks are reported as a performance warning
//!
//! [validate.links]
//! enable = true
//!
//! [validate.markup]
//! enable = true
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// How to treat validation failures.
    pub level: ValidateLevel,

    /// Size threshold for the SVG performance warning.
    pub svg_max_bytes: usize,

    pub links: CheckToggle,

    pub markup: CheckToggle,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            level: ValidateLevel::default(),
            svg_max_bytes: 50 * 1024,
            links: CheckToggle::default(),
            markup: CheckToggle::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckToggle {
    pub enable: bool,
}

impl Default for CheckToggle {
    fn default() -> Self {
        Self { enable: true }
    }
}

/// Validation error level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidateLevel {
    /// Treat validation failures as errors (nonzero exit).
    #[default]
    Error,
    /// Report failures, exit 0.
    Warn,
}

// ============================================================================
// Tests
// ============================================================================
