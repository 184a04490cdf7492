//! `[blog]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [blog]
//! per_page = 12            # articles per listing page
//! feed_limit = 20          # most recent articles in feed.xml
//! related_limit = 3        # related articles under each article
//! toc_min_headings = 3     # fewer headings: no table of contents
//! words_per_minute = 200   # reading time estimate
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub per_page: usize,
    pub feed_limit: usize,
    pub related_limit: usize,
    pub toc_min_headings: usize,
    pub words_per_minute: usize,
    /// Recent articles shown on the homepage.
    pub home_articles: usize,
    /// Featured partners shown on the homepage.
    pub home_partners: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            per_page: 12,
            feed_limit: 20,
            related_limit: 3,
            toc_min_headings: 3,
            words_per_minute: 200,
            home_articles: 3,
            home_partners: 6,
        }
    }
}

impl BlogConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let positive = [
            ("blog.per_page", self.per_page),
            ("blog.feed_limit", self.feed_limit),
            ("blog.words_per_minute", self.words_per_minute),
            ("blog.toc_min_headings", self.toc_min_headings),
        ];
        for (field, value) in positive {
            if value == 0 {
                diag.error(FieldPath::new(field), "must be greater than 0");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_blog_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.blog.per_page, 12);
        assert_eq!(config.blog.feed_limit, 20);
        assert_eq!(config.blog.related_limit, 3);
    }

    #[test]
    fn test_blog_zero_rejected() {
        let config = test_parse_config("[blog]\nper_page = 0\nwords_per_minute = 0");
        let mut diag = ConfigDiagnostics::new();
        config.blog.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
    }
}
