//! Code example blocks.

use super::trusted;
use crate::dom::Element;
use crate::model::CodeExample;
use crate::utils::hash;

const COPY_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" aria-hidden="true"><rect x="9" y="9" width="13" height="13" rx="2" ry="2" fill="none" stroke="currentColor" stroke-width="2"/><path d="M5 15H4a2 2 0 0 1-2-2V4a2 2 0 0 1 2-2h9a2 2 0 0 1 2 2v1" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#;

/// Element id of a code block.
///
/// Derived from the article, the position and the code itself, so ids are
/// stable across builds and unique within a page.
pub fn code_id(slug: &str, index: usize, code: &str) -> String {
    format!("code-{}", hash::fingerprint(&format!("{slug}\n{index}\n{code}")))
}

/// Render one example. The code is always text, never markup.
pub fn code_block(example: &CodeExample, index: usize, slug: &str) -> Element {
    let language = example.language();
    let id = code_id(slug, index, &example.code);

    let mut block = Element::new("div")
        .class("od-code-block")
        .with("data-language", language.as_str());

    if let Some(filename) = example.filename.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        block = block.child(Element::new("div").class("od-code-block__filename").text(filename));
    }

    let copy = Element::new("button")
        .with("type", "button")
        .class("od-code-block__copy")
        .with("data-code-id", id.as_str())
        .with("aria-label", "Code kopieren")
        .children(trusted(COPY_ICON))
        .child(Element::new("span").class("od-code-block__copy-text").text("Kopieren"));

    let header = Element::new("div")
        .class("od-code-block__header")
        .child(Element::new("span").class("od-code-block__language").text(language.as_str()))
        .child(copy);

    let pre = Element::new("pre").class("od-code-block__pre").child(
        Element::new("code")
            .class(format!("language-{language}"))
            .with("id", id)
            .text(example.code.trim_end()),
    );

    block.child(header).child(pre)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(language: Option<&str>, code: &str, filename: Option<&str>) -> CodeExample {
        CodeExample {
            language: language.map(Into::into),
            code: code.into(),
            filename: filename.map(Into::into),
        }
    }

    #[test]
    fn test_code_is_escaped() {
        let html = code_block(&example(Some("XML"), "<record id=\"x\"/>", None), 0, "a").to_html();
        assert!(html.contains("&lt;record id=&quot;x&quot;/&gt;"));
        assert!(html.contains("class=\"language-xml\""));
        assert!(!html.contains("od-code-block__filename"));
    }

    #[test]
    fn test_default_language_and_filename() {
        let html = code_block(&example(None, "print(1)", Some("models.py")), 0, "a").to_html();
        assert!(html.contains("data-language=\"python\""));
        assert!(html.contains("<div class=\"od-code-block__filename\">models.py</div>"));
    }

    #[test]
    fn test_ids_stable_and_distinct() {
        assert_eq!(code_id("a", 0, "x"), code_id("a", 0, "x"));
        assert_ne!(code_id("a", 0, "x"), code_id("a", 1, "x"));
        assert_ne!(code_id("a", 0, "x"), code_id("b", 0, "x"));

        let html = code_block(&example(None, "x", None), 3, "a").to_html();
        let id = code_id("a", 3, "x");
        assert!(html.contains(&format!("data-code-id=\"{id}\"")));
        assert!(html.contains(&format!("id=\"{id}\"")));
    }
}
