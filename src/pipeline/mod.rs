//! Content processing pipeline.
//!
//! Turns an untrusted article body into safe, anchored, classified HTML:
//!
//! ```text
//! raw ─▶ markdown? ─▶ parse ─▶ sanitize ─▶ HeadingIds ─▶ LinkClassifier ─▶ HTML
//! ```
//!
//! Every step after parsing works on the owned `dom::Fragment`; there is no
//! regex over markup. Sanitizing comes first so later transforms only ever
//! see allow-listed content.

pub mod heading;
pub mod link;
pub mod markdown;
pub mod sanitize;

use crate::core::SiteHosts;
use crate::dom::{Fragment, ParseError};

pub use heading::{Heading, HeadingIds};
pub use link::LinkClassifier;
pub use sanitize::{Finding, Profile};

// =============================================================================
// Transform composition
// =============================================================================

/// One tree-to-tree step.
pub trait Transform {
    fn transform(self, fragment: Fragment) -> Fragment;
}

/// Threads a fragment through a chain of transforms.
pub struct Pipeline {
    fragment: Fragment,
}

impl Pipeline {
    pub fn new(fragment: Fragment) -> Self {
        Self { fragment }
    }

    pub fn pipe<T: Transform>(self, step: T) -> Self {
        Self {
            fragment: step.transform(self.fragment),
        }
    }

    pub fn into_inner(self) -> Fragment {
        self.fragment
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Result of processing one article body.
#[derive(Debug, Clone)]
pub struct ProcessedContent {
    pub html: String,
    /// Level 2..=4 headings with ids, for the table of contents.
    pub headings: Vec<Heading>,
    pub findings: Vec<Finding>,
    pub words: usize,
}

/// Full body pipeline. A parse failure excludes the body from output.
pub fn process_content(raw: &str, hosts: &SiteHosts) -> Result<ProcessedContent, ParseError> {
    let html = markdown::normalize(raw);
    let (fragment, mut findings) = sanitize::clean(Fragment::parse(&html)?, Profile::Html);
    if let Some(finding) = sanitize::check_reduction(html.trim().len(), fragment.to_html().len()) {
        findings.push(finding);
    }

    let fragment = Pipeline::new(fragment)
        .pipe(HeadingIds)
        .pipe(LinkClassifier::new(hosts))
        .into_inner();

    Ok(ProcessedContent {
        headings: heading::collect(&fragment),
        words: count_words(&fragment.readable_text()),
        html: fragment.to_html(),
        findings,
    })
}

/// Sanitize and classify a short snippet (FAQ question/answer).
pub fn process_snippet(raw: &str, hosts: &SiteHosts) -> Result<String, ParseError> {
    let (fragment, _) = sanitize::clean(Fragment::parse(raw)?, Profile::Html);
    let fragment = Pipeline::new(fragment)
        .pipe(LinkClassifier::new(hosts))
        .into_inner();
    Ok(fragment.to_html().trim().to_string())
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
