//! Heading anchors.
//!
//! Headings without an `id` get `slugify(text)`; collisions within one
//! document get `-2`, `-3` suffixes. Existing ids are kept and reserved first
//! so generated ids never shadow them.

use super::Transform;
use crate::dom::{Element, Fragment};
use crate::utils::slug::{SlugRegistry, slugify};

/// Id used when a heading has no sluggable text.
const FALLBACK_ID: &str = "abschnitt";

/// A heading that can appear in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// Assigns ids to all headings of a fragment.
#[derive(Debug, Default)]
pub struct HeadingIds;

impl Transform for HeadingIds {
    fn transform(self, mut fragment: Fragment) -> Fragment {
        let mut registry = SlugRegistry::new();
        fragment.for_each_element(&mut |e| {
            if heading_level(e).is_some()
                && let Some(id) = e.get("id")
            {
                registry.claim(id);
            }
        });

        fragment.for_each_element_mut(&mut |e| {
            if heading_level(e).is_none() || e.has("id") {
                return;
            }
            let base = slugify(&e.text_content());
            let base = if base.is_empty() { FALLBACK_ID.to_string() } else { base };
            let (id, _) = registry.claim(&base);
            e.set("id", id);
        });

        fragment
    }
}

/// `h1`..`h6` level, if the element is a heading.
pub fn heading_level(e: &Element) -> Option<u8> {
    let bytes = e.name.as_bytes();
    match bytes {
        [b'h', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

/// Headings of level 2..=4 that carry an id, in document order.
pub fn collect(fragment: &Fragment) -> Vec<Heading> {
    let mut headings = Vec::new();
    fragment.for_each_element(&mut |e| {
        let Some(level @ 2..=4) = heading_level(e) else {
            return;
        };
        let Some(id) = e.get("id").filter(|id| !id.is_empty()) else {
            return;
        };
        let text = e.text_content().split_whitespace().collect::<Vec<_>>().join(" ");
        headings.push(Heading {
            level,
            id: id.to_string(),
            text,
        });
    });
    headings
}
