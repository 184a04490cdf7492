//! RSS 2.0 feed of the most recent articles at `blog/feed.xml`.

use super::{minify_xml, write_output};
use crate::config::SiteConfig;
use crate::log;
use crate::model::Article;
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

pub const FEED_FILE: &str = "blog/feed.xml";

/// Build and write the feed.
pub fn build_feed(config: &SiteConfig, articles: &[Article]) -> Result<()> {
    let feed = RssFeed::build(config, articles);
    let count = feed.articles.len();
    let xml = feed.into_xml()?;
    write_output(&config.build.output, FEED_FILE, &minify_xml(&xml, config.build.minify))?;
    log!("rss"; "{} ({} items)", FEED_FILE, count);
    Ok(())
}

pub struct RssFeed<'a> {
    config: &'a SiteConfig,
    articles: Vec<&'a Article>,
}

impl<'a> RssFeed<'a> {
    /// Dated articles, newest first, capped at `blog.feed_limit`.
    pub fn build(config: &'a SiteConfig, articles: &'a [Article]) -> Self {
        let mut articles: Vec<&Article> = articles.iter().filter(|a| a.published.is_some()).collect();
        articles.sort_by(|a, b| b.published.cmp(&a.published));
        articles.truncate(config.blog.feed_limit);
        Self { config, articles }
    }

    pub fn into_xml(self) -> Result<String> {
        let site = &self.config.site;
        let items: Vec<_> = self
            .articles
            .iter()
            .filter_map(|article| article_to_rss_item(article, self.config))
            .collect();

        let channel = ChannelBuilder::default()
            .title(site.name.clone())
            .link(site.absolute("/blog/"))
            .description(site.description.clone())
            .language(Some(rss_language(&site.locale)))
            .generator(Some("odoo-directory".to_string()))
            .last_build_date(self.articles.first().and_then(|a| a.published).map(|d| d.to_rfc2822()))
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

/// `de_DE` -> `de-DE`.
fn rss_language(locale: &str) -> String {
    locale.replace('_', "-")
}

fn article_to_rss_item(article: &Article, config: &SiteConfig) -> Option<rss::Item> {
    let pub_date = article.published?.to_rfc2822();
    let link = config.site.absolute(&article.path());
    let categories = article
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
        .collect::<Vec<_>>();

    Some(
        ItemBuilder::default()
            .title(Some(article.title.clone()))
            .link(Some(link.clone()))
            .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
            .description(Some(article.summary().to_string()).filter(|s| !s.is_empty()))
            .pub_date(Some(pub_date))
            .author(normalize_rss_author(&article.author.name, config))
            .categories(categories)
            .build(),
    )
}

/// RSS wants `email (Name)`; plain names borrow the site email.
fn normalize_rss_author(author: &str, config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("valid regex")
    });

    let author = author.trim();
    if author.is_empty() {
        return None;
    }
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.to_string());
    }
    Some(format!("{} ({})", config.site.email, author))
}
