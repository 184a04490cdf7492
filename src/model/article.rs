//! Blog articles.

use super::{Author, nullable, non_empty, string_or_number};
use crate::utils::date::DateTimeUtc;
use crate::utils::slug::slugify;
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled Article";
pub const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_CODE_LANGUAGE: &str = "python";

/// Row of `blog-articles.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub content: String,
    #[serde(deserialize_with = "nullable")]
    pub excerpt: String,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub author: Option<super::AuthorRef>,
    #[serde(deserialize_with = "nullable")]
    pub meta_description: String,
    #[serde(deserialize_with = "nullable")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub faq_section: Vec<FaqEntry>,
    #[serde(deserialize_with = "nullable")]
    pub code_examples: Vec<CodeExample>,
    #[serde(deserialize_with = "nullable")]
    pub svg_visualizations: Vec<Visualization>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub status: Option<String>,
}

impl ArticleRecord {
    /// Title, or the documented default.
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(UNTITLED)
    }

    /// Explicit slug (normalized), else slug of the title, else of the id.
    pub fn base_slug(&self) -> String {
        [self.slug.as_deref(), Some(self.display_title()), Some(self.id.as_str())]
            .into_iter()
            .flatten()
            .map(slugify)
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(UNTITLED))
    }

    /// Records without a status are treated as published.
    pub fn is_published(&self) -> bool {
        non_empty(self.status.as_deref()).is_none_or(|s| s.eq_ignore_ascii_case("published"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqEntry {
    #[serde(deserialize_with = "nullable")]
    pub question: String,
    #[serde(deserialize_with = "nullable")]
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeExample {
    pub language: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub code: String,
    pub filename: Option<String>,
}

impl CodeExample {
    pub fn language(&self) -> String {
        non_empty(self.language.as_deref())
            .unwrap_or(DEFAULT_CODE_LANGUAGE)
            .to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Visualization {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub svg_content: String,
}

/// Normalized article with resolved slug, dates and author.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// Untrusted body as stored; sanitized during rendering.
    pub content: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: String,
    pub author: Author,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub faq: Vec<FaqEntry>,
    pub code_examples: Vec<CodeExample>,
    pub visualizations: Vec<Visualization>,
    pub published: Option<DateTimeUtc>,
    pub updated: Option<DateTimeUtc>,
}

impl Article {
    /// Build from a record. `slug` is the unique slug assigned by the caller.
    pub fn from_record(record: ArticleRecord, slug: String, author: Author) -> Self {
        let title = record.display_title().to_string();
        let category = non_empty(record.category.as_deref())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        let mut tags: Vec<String> = Vec::with_capacity(record.tags.len());
        for tag in record.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push(tag.to_string());
            }
        }

        let faq = record
            .faq_section
            .into_iter()
            .filter(|f| !f.question.trim().is_empty() && !f.answer.trim().is_empty())
            .collect();

        let published = record.published_at.as_deref().and_then(DateTimeUtc::parse);
        let updated = record.updated_at.as_deref().and_then(DateTimeUtc::parse);

        Self {
            id: record.id,
            slug,
            title,
            content: record.content,
            excerpt: record.excerpt.trim().to_string(),
            tags,
            category,
            author,
            meta_description: record.meta_description.trim().to_string(),
            keywords: record.keywords,
            faq,
            code_examples: record
                .code_examples
                .into_iter()
                .filter(|c| !c.code.trim().is_empty())
                .collect(),
            visualizations: record
                .svg_visualizations
                .into_iter()
                .filter(|v| !v.svg_content.trim().is_empty())
                .collect(),
            published,
            updated,
        }
    }

    /// Site path of the article page.
    pub fn path(&self) -> String {
        format!("/blog/{}/", self.slug)
    }

    /// Meta description, else excerpt.
    pub fn summary(&self) -> &str {
        if self.meta_description.is_empty() {
            &self.excerpt
        } else {
            &self.meta_description
        }
    }

    /// Last modification: update time, else publish time.
    pub fn modified(&self) -> Option<DateTimeUtc> {
        self.updated.or(self.published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> ArticleRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_base_slug_from_title() {
        let r = record(r#"{"id": 1, "title": "DSGVO für Odoo", "slug": null}"#);
        assert_eq!(r.base_slug(), "dsgvo-fuer-odoo");
    }

    #[test]
    fn test_base_slug_explicit_is_normalized() {
        let r = record(r#"{"id": 1, "title": "x", "slug": "Mein Slug"}"#);
        assert_eq!(r.base_slug(), "mein-slug");
    }

    #[test]
    fn test_missing_title_defaults() {
        let r = record(r#"{"id": "abc"}"#);
        assert_eq!(r.display_title(), UNTITLED);
        assert_eq!(r.base_slug(), "untitled-article");

        let r = record(r#"{"id": "x", "title": "!!!"}"#);
        assert_eq!(r.base_slug(), "x");
    }

    #[test]
    fn test_status_filter() {
        assert!(record(r#"{"id": 1}"#).is_published());
        assert!(record(r#"{"id": 1, "status": "published"}"#).is_published());
        assert!(!record(r#"{"id": 1, "status": "draft"}"#).is_published());
    }

    #[test]
    fn test_from_record_normalizes() {
        let r = record(
            r#"{"id": 7, "title": "T", "tags": ["ERP", " erp ", "", "DSGVO"], "category": null,
                "faq_section": [{"question": "Q?", "answer": "A."}, {"question": "", "answer": "x"}],
                "published_at": "2025-01-15", "updated_at": null}"#,
        );
        let a = Article::from_record(r, "t".into(), Author::default());
        assert_eq!(a.tags, ["ERP", "DSGVO"]);
        assert_eq!(a.category, DEFAULT_CATEGORY);
        assert_eq!(a.faq.len(), 1);
        assert_eq!(a.path(), "/blog/t/");
        assert_eq!(a.modified(), Some(DateTimeUtc::from_ymd(2025, 1, 15)));
    }

    #[test]
    fn test_code_language_default() {
        assert_eq!(CodeExample::default().language(), "python");
        let c = CodeExample {
            language: Some("XML".into()),
            ..Default::default()
        };
        assert_eq!(c.language(), "xml");
    }
}
