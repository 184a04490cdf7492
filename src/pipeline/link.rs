//! Anchor classification (internal vs external).
//!
//! Every `<a>` without a `class` gets exactly one policy:
//!
//! | Scope | Added attributes |
//! |-------|------------------|
//! | internal | `class="od-internal-link"` |
//! | external | `target="_blank" rel="noopener noreferrer" class="od-external-link"` |
//!
//! Anchors that already carry a class are left untouched, which makes the
//! transform idempotent.

use super::Transform;
use crate::core::{LinkScope, SiteHosts};
use crate::dom::{Element, Fragment};

pub const INTERNAL_CLASS: &str = "od-internal-link";
pub const EXTERNAL_CLASS: &str = "od-external-link";
pub const EXTERNAL_REL: &str = "noopener noreferrer";

pub struct LinkClassifier<'a> {
    hosts: &'a SiteHosts,
}

impl<'a> LinkClassifier<'a> {
    pub fn new(hosts: &'a SiteHosts) -> Self {
        Self { hosts }
    }

    fn classify(&self, e: &mut Element) {
        if !e.is("a") || e.has("class") {
            return;
        }
        let scope = e
            .get("href")
            .map_or(LinkScope::Internal, |href| self.hosts.scope(href));
        apply(e, scope);
    }
}

impl Transform for LinkClassifier<'_> {
    fn transform(self, mut fragment: Fragment) -> Fragment {
        fragment.for_each_element_mut(&mut |e| self.classify(e));
        fragment
    }
}

/// Set the attributes of a link policy on an anchor.
pub fn apply(e: &mut Element, scope: LinkScope) {
    match scope {
        LinkScope::Internal => e.set("class", INTERNAL_CLASS),
        LinkScope::External => {
            e.set("target", "_blank");
            e.set("rel", EXTERNAL_REL);
            e.set("class", EXTERNAL_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(html: &str) -> String {
        let hosts = SiteHosts::new(["odoo-experten-deutschland.de", "odoo-directory.de"]);
        LinkClassifier::new(&hosts)
            .transform(Fragment::parse(html).unwrap())
            .to_html()
    }

    #[test]
    fn test_internal_links() {
        assert_eq!(
            classify("<a href=\"/partner/\">Partner</a>"),
            "<a href=\"/partner/\" class=\"od-internal-link\">Partner</a>"
        );
        assert_eq!(
            classify("<a href=\"https://odoo-directory.de/blog/\">x</a>"),
            "<a href=\"https://odoo-directory.de/blog/\" class=\"od-internal-link\">x</a>"
        );
    }

    #[test]
    fn test_external_links() {
        assert_eq!(
            classify("<a href=\"https://www.odoo.com\">Odoo</a>"),
            "<a href=\"https://www.odoo.com\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"od-external-link\">Odoo</a>"
        );
    }

    #[test]
    fn test_existing_class_untouched() {
        let html = "<a href=\"https://www.odoo.com\" class=\"btn\">Odoo</a>";
        assert_eq!(classify(html), html);
    }

    #[test]
    fn test_every_anchor_gets_one_class_and_is_idempotent() {
        let input = "<p><a href=\"/a/\">a</a> <a href=\"https://x.example\">b</a> \
                     <a href=\"mailto:x@y.de\">c</a> <a>d</a> <a href=\"#faq\">e</a></p>";
        let once = classify(input);
        assert_eq!(classify(&once), once);

        let frag = Fragment::parse(&once).unwrap();
        for a in frag.find_all("a") {
            let class = a.get("class").unwrap();
            assert!(class == INTERNAL_CLASS || class == EXTERNAL_CLASS, "{class}");
        }
    }
}
