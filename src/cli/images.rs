//! `images` command: image cache status per article.
//!
//! Generation itself is done by an external job; this only reads the cache
//! and reports which published articles are still on the placeholder.

use crate::config::SiteConfig;
use crate::data::{self, Snapshot};
use crate::log;
use crate::model::{Article, ImageCache};
use crate::utils::plural_count;
use anyhow::Result;

/// Articles split by whether the cache holds a generated hero image.
#[derive(Debug, Default)]
pub struct ImageStatus<'a> {
    pub ready: Vec<&'a Article>,
    pub pending: Vec<&'a Article>,
}

impl<'a> ImageStatus<'a> {
    pub fn collect(articles: &'a [Article], cache: &ImageCache) -> Self {
        let (ready, pending) = articles.iter().partition(|a| cache.has_image(&a.slug));
        Self { ready, pending }
    }
}

pub fn run(config: &SiteConfig, list: bool) -> Result<()> {
    let snapshot = Snapshot::load(config)?;
    let avatars = data::avatar_files(&config.build.assets);
    let dataset = data::prepare(snapshot, &avatars);

    let path = &config.build.image_cache;
    if !path.exists() {
        log!("images"; "no cache at {}, nothing generated yet", path.display());
    }
    let cache = ImageCache::load(path)?;

    let status = ImageStatus::collect(&dataset.articles, &cache);
    log!(
        "images";
        "{} with images, {} pending ({} cache entries)",
        plural_count(status.ready.len(), "article"),
        status.pending.len(),
        cache.generated_count()
    );

    if list {
        for article in &status.pending {
            log!("pending"; "{}", article.slug);
        }
    } else if !status.pending.is_empty() {
        crate::debug!("images"; "run with --list to see every pending slug");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArticleRecord, Author, ImageEntry};
    use std::collections::BTreeMap;

    fn article(slug: &str) -> Article {
        let record: ArticleRecord = serde_json::from_str(r#"{"id": 1, "title": "T"}"#).unwrap();
        Article::from_record(record, slug.into(), Author::default())
    }

    #[test]
    fn test_status_split() {
        let articles = [article("a"), article("b"), article("c")];
        let mut entries = BTreeMap::new();
        let mut done = ImageEntry {
            generated: true,
            ..Default::default()
        };
        done.paths.hero = Some("/assets/images/blog/a-hero.jpg".into());
        entries.insert("a".to_string(), done);
        entries.insert(
            "b".to_string(),
            ImageEntry {
                generated: false,
                ..Default::default()
            },
        );
        let cache = ImageCache::from_entries(entries);

        let status = ImageStatus::collect(&articles, &cache);
        let pending: Vec<&str> = status.pending.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(status.ready.len(), 1);
        assert_eq!(pending, ["b", "c"]);
    }
}
