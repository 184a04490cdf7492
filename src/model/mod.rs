//! Input records and their build-ready forms.
//!
//! Records come from the JSON snapshot written by the fetch step. Database
//! columns are frequently `null`, and ids may be numbers or strings, so the
//! serde helpers here map both to plain Rust defaults.
//!
//! # Module Structure
//!
//! ```text
//! model/
//! ├── article.rs   # ArticleRecord (raw), Article (normalized)
//! ├── partner.rs   # Partner, Location, Tier
//! ├── author.rs    # AuthorPersona, AuthorRef, Author + enrichment
//! └── image.rs     # read-only image generation cache
//! ```

pub mod article;
pub mod author;
pub mod image;
pub mod partner;

pub use article::{Article, ArticleRecord, CodeExample, FaqEntry, Visualization};
pub use author::{Author, AuthorPersona, AuthorRef};
pub use image::{ImageCache, ImageEntry};
pub use partner::{Partner, Tier};

use serde::{Deserialize, Deserializer};
use std::fmt;

/// A per-record problem. The record is repaired or excluded, the build goes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// What the issue is about (`article:<id>`, `partner:<slug>`).
    pub subject: String,
    pub message: String,
}

impl Issue {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

// ============================================================================
// serde helpers
// ============================================================================

/// `null` becomes `T::default()`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a string or a number, e.g. numeric ids and `"founded": 2012`.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Flexible>::deserialize(deserializer)? {
        Some(Flexible::Text(s)) => s,
        Some(Flexible::Int(n)) => n.to_string(),
        Some(Flexible::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Trimmed value, `None` when blank.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "nullable")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "string_or_number")]
        id: String,
    }

    #[test]
    fn test_nullable_and_flexible_ids() {
        let p: Probe = serde_json::from_str(r#"{"tags": null, "id": 42}"#).unwrap();
        assert!(p.tags.is_empty());
        assert_eq!(p.id, "42");

        let p: Probe = serde_json::from_str(r#"{"id": "a-b"}"#).unwrap();
        assert_eq!(p.id, "a-b");

        let p: Probe = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(p.id, "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  x ")), Some("x"));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
