//! Markdown fallback for plain-text article bodies.
//!
//! Records from the database are usually HTML. Bodies without a single tag
//! are treated as lightly marked text and converted with pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("valid regex"));

/// True when the content contains at least one HTML tag.
pub fn looks_like_html(content: &str) -> bool {
    TAG.is_match(content)
}

/// Convert Markdown to HTML. Raw HTML in the input is kept for the sanitizer.
pub fn to_html(markdown: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, opts);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// HTML as-is, or Markdown converted to HTML.
pub fn normalize(content: &str) -> String {
    if looks_like_html(content) {
        content.to_string()
    } else {
        to_html(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<p>Hallo</p>"));
        assert!(looks_like_html("Text mit <br> Umbruch"));
        assert!(!looks_like_html("## Überschrift\n\nText"));
        assert!(!looks_like_html("a < b und c > d"));
    }

    #[test]
    fn test_markdown_converted() {
        let html = normalize("## Einführung\n\nOdoo ist **modular**.\n\n- eins\n- zwei");
        assert!(html.contains("<h2>Einführung</h2>"));
        assert!(html.contains("<strong>modular</strong>"));
        assert!(html.contains("<li>eins</li>"));
    }

    #[test]
    fn test_html_passthrough() {
        let input = "<p>Schon HTML</p>";
        assert_eq!(normalize(input), input);
    }
}
