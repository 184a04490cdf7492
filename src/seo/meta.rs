//! Document head composition.
//!
//! Every value is written through `dom::Element`, so attribute and text
//! escaping happens in one place. JSON-LD blocks are appended verbatim from
//! `jsonld::script`.

use super::jsonld;
use super::og::OpenGraph;
use crate::dom::Element;
use serde_json::Value;

pub const DEFAULT_ROBOTS: &str = "index, follow";

/// Everything that goes into `<head>` besides the fixed skeleton.
#[derive(Debug, Clone)]
pub struct Head {
    /// Full `<title>` text.
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// `None` means `index, follow`.
    pub robots: Option<String>,
    /// Absolute canonical URL.
    pub canonical: String,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub og: OpenGraph,
    pub json_ld: Vec<Value>,
}

impl Head {
    pub fn new(title: impl Into<String>, description: impl Into<String>, canonical: impl Into<String>, og: OpenGraph) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            keywords: Vec::new(),
            robots: None,
            canonical: canonical.into(),
            prev: None,
            next: None,
            og,
            json_ld: Vec::new(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut elements = vec![
            Element::new("title").text(self.title.as_str()),
            meta("description", &self.description),
        ];
        if !self.keywords.is_empty() {
            elements.push(meta("keywords", &self.keywords.join(", ")));
        }
        elements.push(meta("robots", self.robots.as_deref().unwrap_or(DEFAULT_ROBOTS)));
        elements.push(link("canonical", &self.canonical));
        if let Some(prev) = &self.prev {
            elements.push(link("prev", prev));
        }
        if let Some(next) = &self.next {
            elements.push(link("next", next));
        }
        elements.extend(self.og.tags());

        let mut lines: Vec<String> = elements.iter().map(Element::to_html).collect();
        lines.extend(self.json_ld.iter().map(jsonld::script));
        lines.join("\n    ")
    }
}

/// Keywords followed by tags, trimmed and deduplicated case-insensitively.
pub fn keywords(keywords: &[String], tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in keywords.iter().chain(tags).map(|k| k.trim()).filter(|k| !k.is_empty()) {
        if !out.iter().any(|k| k.eq_ignore_ascii_case(word)) {
            out.push(word.to_string());
        }
    }
    out
}

fn meta(name: &str, content: &str) -> Element {
    Element::new("meta").with("name", name).with("content", content)
}

fn link(rel: &str, href: &str) -> Element {
    Element::new("link").with("rel", rel).with("href", href)
}
