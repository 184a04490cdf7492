//! Read-only view of the image generation cache.
//!
//! The generator writes `slug → entry` to `generated-images.json`. Only
//! entries with `generated: true` are trusted; paths are stored as written
//! by the generator (often filesystem paths below `dist/`) and are mapped
//! back to site paths here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePaths {
    pub hero: Option<String>,
    pub thumbnail: Option<String>,
    pub social: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageEntry {
    pub generated: bool,
    pub timestamp: Option<String>,
    pub prompt: Option<String>,
    pub paths: ImagePaths,
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    entries: BTreeMap<String, ImageEntry>,
}

impl ImageCache {
    /// Load the cache file. A missing file is an empty cache.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read image cache {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid image cache {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let entries = serde_json::from_str(content)?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: BTreeMap<String, ImageEntry>) -> Self {
        Self { entries }
    }

    fn generated(&self, slug: &str) -> Option<&ImageEntry> {
        self.entries.get(slug).filter(|e| e.generated)
    }

    pub fn has_image(&self, slug: &str) -> bool {
        self.hero(slug).is_some()
    }

    /// Site path of the generated hero image.
    pub fn hero(&self, slug: &str) -> Option<String> {
        self.generated(slug)?.paths.hero.as_deref().and_then(site_path)
    }

    /// Card thumbnail, else hero.
    pub fn thumbnail(&self, slug: &str) -> Option<String> {
        self.generated(slug)
            .and_then(|e| e.paths.thumbnail.as_deref())
            .and_then(site_path)
            .or_else(|| self.hero(slug))
    }

    /// Social preview image, else hero.
    pub fn social(&self, slug: &str) -> Option<String> {
        self.generated(slug)
            .and_then(|e| e.paths.social.as_deref())
            .and_then(site_path)
            .or_else(|| self.hero(slug))
    }

    /// Number of entries marked as generated.
    pub fn generated_count(&self) -> usize {
        self.entries.values().filter(|e| e.generated).count()
    }
}

/// Map a stored path to something a page can reference.
///
/// URLs and site paths pass through; filesystem paths are cut at `/assets/`.
fn site_path(stored: &str) -> Option<String> {
    let stored = stored.trim().replace('\\', "/");
    if stored.is_empty() {
        return None;
    }
    if stored.starts_with("http://") || stored.starts_with("https://") {
        return Some(stored);
    }
    if let Some(idx) = stored.find("/assets/") {
        return Some(stored[idx..].to_string());
    }
    if stored.starts_with("assets/") {
        return Some(format!("/{stored}"));
    }
    stored.starts_with('/').then_some(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CACHE: &str = r#"{
        "dsgvo-fuer-odoo": {
            "generated": true,
            "timestamp": "2025-01-15T10:00:00Z",
            "prompt": "…",
            "paths": {
                "hero": "/home/ci/site/dist/assets/images/blog/articles/dsgvo-fuer-odoo/dsgvo-fuer-odoo-hero.jpg",
                "social": "https://cdn.example/social.jpg"
            }
        },
        "pending": { "generated": false, "paths": { "hero": "/assets/x.jpg" } }
    }"#;

    #[test]
    fn test_hero_resolution() {
        let cache = ImageCache::parse(CACHE).unwrap();
        assert_eq!(
            cache.hero("dsgvo-fuer-odoo").as_deref(),
            Some("/assets/images/blog/articles/dsgvo-fuer-odoo/dsgvo-fuer-odoo-hero.jpg")
        );
        assert_eq!(cache.social("dsgvo-fuer-odoo").as_deref(), Some("https://cdn.example/social.jpg"));
        assert_eq!(cache.thumbnail("dsgvo-fuer-odoo"), cache.hero("dsgvo-fuer-odoo"));
        assert!(cache.hero("pending").is_none());
        assert!(cache.hero("unknown").is_none());
        assert_eq!(cache.generated_count(), 1);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let cache = ImageCache::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(cache.generated_count(), 0);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(ImageCache::load(&path).is_err());
    }

    #[test]
    fn test_site_path() {
        assert_eq!(site_path("assets/a.jpg").as_deref(), Some("/assets/a.jpg"));
        assert_eq!(site_path("C:\\site\\dist\\assets\\a.jpg").as_deref(), Some("/assets/a.jpg"));
        assert_eq!(site_path("relative/a.jpg"), None);
        assert_eq!(site_path(""), None);
    }
}
