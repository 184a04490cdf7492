//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! data = "data"                 # snapshot written by the fetch step
//! output = "dist"               # generated site
//! assets = "assets"             # static assets (author avatars)
//! image_cache = ".image-cache/generated-images.json"
//! fallback = false              # use bundled sample data when the snapshot is missing
//! minify = false
//! clean = false
//! templates = "templates"       # optional header.html / footer.html overrides
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    pub data: PathBuf,
    pub output: PathBuf,
    pub assets: PathBuf,
    pub image_cache: PathBuf,
    pub templates: Option<PathBuf>,
    pub fallback: bool,
    pub minify: bool,
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            data: "data".into(),
            output: "dist".into(),
            assets: "assets".into(),
            image_cache: ".image-cache/generated-images.json".into(),
            templates: None,
            fallback: false,
            minify: false,
            clean: false,
        }
    }
}

impl BuildSectionConfig {
    /// Resolve every path against `root`, expanding `~`.
    pub fn normalize(&mut self, root: &Path) {
        self.data = resolve(root, &self.data);
        self.output = resolve(root, &self.output);
        self.assets = resolve(root, &self.assets);
        self.image_cache = resolve(root, &self.image_cache);
        if let Some(templates) = self.templates.take() {
            self.templates = Some(resolve(root, &templates));
        }
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let path = PathBuf::from(shellexpand::tilde(&raw).into_owned());
    if path.is_relative() {
        root.join(path)
    } else {
        path
    }
}
