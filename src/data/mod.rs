//! Snapshot loading and dataset preparation.
//!
//! The fetch step writes one JSON array per table into the data directory.
//! Loading turns them into records; `prepare` turns records into the
//! build-ready dataset (published only, unique slugs, resolved authors).
//!
//! When the snapshot is unavailable and `build.fallback` is set, a bundled
//! sample dataset is used instead.

use crate::config::SiteConfig;
use crate::model::author::AuthorDirectory;
use crate::model::{Article, ArticleRecord, AuthorPersona, Issue, Partner};
use crate::utils::slug::SlugRegistry;
use crate::{debug, log};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const ARTICLES_FILE: &str = "blog-articles.json";
pub const PARTNERS_FILE: &str = "partners.json";
pub const PERSONAS_FILE: &str = "author-personas.json";

/// Author avatars, relative to the static assets directory.
const AVATAR_ASSETS: &str = "images/authors";

const SAMPLE_ARTICLES: &str = include_str!("sample/blog-articles.json");
const SAMPLE_PARTNERS: &str = include_str!("sample/partners.json");
const SAMPLE_PERSONAS: &str = include_str!("sample/author-personas.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Snapshot(PathBuf),
    Sample,
}

/// Raw records as read from disk.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub articles: Vec<ArticleRecord>,
    pub partners: Vec<Partner>,
    pub personas: Vec<AuthorPersona>,
    pub source: Source,
}

impl Snapshot {
    /// Load the configured snapshot, falling back to sample data if allowed.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let dir = &config.build.data;
        match Self::from_dir(dir) {
            Ok(snapshot) => Ok(snapshot),
            Err(err) if config.build.fallback => {
                log!("warn"; "snapshot unavailable ({:#}), using bundled sample data", err);
                Self::sample()
            }
            Err(err) => Err(err.context("run the fetch step first or build with --fallback")),
        }
    }

    /// Read a snapshot directory. Articles and partners are required,
    /// personas are optional.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            bail!("data directory `{}` not found", dir.display());
        }

        let articles = read_json(&dir.join(ARTICLES_FILE))?;
        let partners = read_json(&dir.join(PARTNERS_FILE))?;

        let personas_path = dir.join(PERSONAS_FILE);
        let personas = if personas_path.exists() {
            read_json(&personas_path)?
        } else {
            debug!("data"; "no {} found, authors use inline data only", PERSONAS_FILE);
            Vec::new()
        };

        Ok(Self {
            articles,
            partners,
            personas,
            source: Source::Snapshot(dir.to_path_buf()),
        })
    }

    /// Bundled sample dataset.
    pub fn sample() -> Result<Self> {
        Ok(Self {
            articles: serde_json::from_str(SAMPLE_ARTICLES).context("invalid sample articles")?,
            partners: serde_json::from_str(SAMPLE_PARTNERS).context("invalid sample partners")?,
            personas: serde_json::from_str(SAMPLE_PERSONAS).context("invalid sample personas")?,
            source: Source::Sample,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// File names in the author avatar directory (empty if it does not exist).
pub fn avatar_files(assets: &Path) -> FxHashSet<String> {
    let Ok(entries) = fs::read_dir(assets.join(AVATAR_ASSETS)) else {
        return FxHashSet::default();
    };
    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect()
}

// ============================================================================
// Preparation
// ============================================================================

/// Build-ready records plus everything that had to be repaired on the way.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Published articles, newest first.
    pub articles: Vec<Article>,
    /// Partners in directory order.
    pub partners: Vec<Partner>,
    pub issues: Vec<Issue>,
}

/// Normalize a snapshot. Pure: the snapshot is consumed, nothing is mutated
/// in place outside the returned value.
pub fn prepare(snapshot: Snapshot, avatars: &FxHashSet<String>) -> Dataset {
    let mut issues = Vec::new();
    let authors = AuthorDirectory::new(&snapshot.personas, avatars);

    let mut slugs = SlugRegistry::new();
    let mut articles = Vec::with_capacity(snapshot.articles.len());
    for record in snapshot.articles {
        if !record.is_published() {
            debug!("data"; "skipping unpublished article {}", record.id);
            continue;
        }
        if record.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            issues.push(Issue::new(
                format!("article:{}", record.id),
                "missing title, using default",
            ));
        }

        let base = record.base_slug();
        let (slug, renamed) = slugs.claim(&base);
        if renamed {
            issues.push(Issue::new(
                format!("article:{}", record.id),
                format!("slug `{base}` already taken, using `{slug}`"),
            ));
        }

        let author = authors.resolve(record.author.as_ref());
        articles.push(Article::from_record(record, slug, author));
    }
    // Stable: equal dates keep input order
    articles.sort_by(|a, b| b.published.cmp(&a.published));

    let mut slugs = SlugRegistry::new();
    let mut partners = Vec::with_capacity(snapshot.partners.len());
    for mut partner in snapshot.partners {
        let base = partner.normalize();
        let (slug, renamed) = slugs.claim(&base);
        if renamed {
            issues.push(Issue::new(
                format!("partner:{}", partner.id),
                format!("slug `{base}` already taken, using `{slug}`"),
            ));
        }
        partner.slug = slug;
        partners.push(partner);
    }
    partners.sort_by(Partner::directory_order);

    Dataset {
        articles,
        partners,
        issues,
    }
}
