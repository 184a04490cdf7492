//! Owned HTML tree used by every markup transform.
//!
//! Markup is parsed with `tl` and converted into plain owned nodes, so
//! sanitization, link classification and heading ids operate on elements
//! instead of pattern-matching strings.
//!
//! Serialization decodes nothing and escapes everything: text nodes and
//! attribute values hold decoded strings and are escaped on output. This
//! makes `parse → to_html → parse → to_html` a fixed point.

use crate::utils::html::{escape, escape_attr, is_raw_text_element, is_void_element, unescape};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use thiserror::Error;

/// Nesting limit; deeper markup is rejected rather than recursed into.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("markup could not be parsed: {0}")]
    Syntax(String),

    #[error("markup nested deeper than {0} levels")]
    TooDeep(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            Self::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    /// Decoded attribute values in source order.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder: set `class`.
    pub fn class(self, value: impl Into<String>) -> Self {
        self.with("class", value)
    }

    /// Builder: append several children.
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Builder: append a child.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Builder: append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Attribute lookup, case-insensitive on the key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
    }

    /// Concatenated text of all descendants (script/style excluded).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

/// A parsed markup fragment (zero or more top-level nodes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Parse markup into an owned tree. Comments are dropped.
    pub fn parse(html: &str) -> Result<Self, ParseError> {
        let source = escape_stray_lt(html);
        let dom = tl::parse(&source, tl::ParserOptions::default())
            .map_err(|e| ParseError::Syntax(format!("{e:?}")))?;
        let parser = dom.parser();

        let mut nodes = Vec::new();
        for handle in dom.children() {
            if let Some(node) = convert(*handle, parser, 0)? {
                nodes.push(node);
            }
        }
        Ok(Self { nodes })
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(node, false, &mut out);
        }
        out
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.nodes, &mut out);
        out
    }

    /// Text with block boundaries turned into spaces, for word counts and
    /// summaries.
    pub fn readable_text(&self) -> String {
        let mut out = String::new();
        collect_readable(&self.nodes, &mut out);
        out
    }

    /// Visit every element in document order.
    pub fn for_each_element(&self, f: &mut impl FnMut(&Element)) {
        visit(&self.nodes, f);
    }

    /// Visit every element in document order, mutably.
    pub fn for_each_element_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        visit_mut(&mut self.nodes, f);
    }

    /// All elements with the given tag name, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_named(&self.nodes, name, &mut found);
        found
    }
}

// ============================================================================
// tl conversion
// ============================================================================

fn convert(
    handle: tl::NodeHandle,
    parser: &tl::Parser,
    depth: usize,
) -> Result<Option<Node>, ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::TooDeep(MAX_DEPTH));
    }
    let Some(node) = handle.get(parser) else {
        return Ok(None);
    };

    match node {
        tl::Node::Tag(tag) => {
            // Self-closing syntax (`<br/>`, `<g/>`) ends up in the name
            let name = tag.name().as_utf8_str();
            let mut element = Element::new(name.trim_end_matches('/'));
            for (key, value) in tag.attributes().iter() {
                let key: &str = key.as_ref();
                let value = value.map(|v| unescape(&v).into_owned()).unwrap_or_default();
                element.attrs.push((key.to_string(), value));
            }

            let raw_text = is_raw_text_element(&element.name);
            for child in tag.children().top().iter() {
                if raw_text {
                    // Keep script/style bodies verbatim
                    if let Some(tl::Node::Raw(bytes)) = child.get(parser) {
                        element.children.push(Node::Text(bytes.as_utf8_str().into_owned()));
                    }
                    continue;
                }
                if let Some(node) = convert(*child, parser, depth + 1)? {
                    element.children.push(node);
                }
            }
            Ok(Some(Node::Element(element)))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            Ok(Some(Node::Text(unescape(&text).into_owned())))
        }
        tl::Node::Comment(_) => Ok(None),
    }
}

/// Encode `<` that cannot start a tag, so text like `Preis <5 Euro` stays
/// text. Script and style bodies are copied unchanged.
fn escape_stray_lt(html: &str) -> Cow<'_, str> {
    let bytes = html.as_bytes();
    let starts_tag = |i: usize| {
        bytes
            .get(i + 1)
            .is_some_and(|&b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
    };
    if !(0..bytes.len()).any(|i| bytes[i] == b'<' && !starts_tag(i)) {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len() + 8);
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        if !starts_tag(i) {
            out.push_str(&html[copied..i]);
            out.push_str("&lt;");
            i += 1;
            copied = i;
            continue;
        }
        i = skip_raw_text(html, i);
    }
    out.push_str(&html[copied..]);
    Cow::Owned(out)
}

/// Position after the body of a `<script>` or `<style>` opened at `start`,
/// or just past the `<` for any other tag.
fn skip_raw_text(html: &str, start: usize) -> usize {
    let rest = &html[start + 1..];
    for name in ["script", "style"] {
        let opens = rest
            .get(..name.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(name))
            && rest[name.len()..]
                .bytes()
                .next()
                .is_none_or(|b| b == b'>' || b == b'/' || b.is_ascii_whitespace());
        if opens {
            let close = format!("</{name}");
            let lower = rest.to_ascii_lowercase();
            return match lower.find(&close) {
                Some(pos) => start + 1 + pos + close.len(),
                None => html.len(),
            };
        }
    }
    start + 1
}

// ============================================================================
// Serialization
// ============================================================================

/// SVG leaf elements written as `<path/>` when empty.
fn is_svg_leaf(name: &str) -> bool {
    matches!(
        name,
        "path"
            | "circle"
            | "ellipse"
            | "rect"
            | "line"
            | "polyline"
            | "polygon"
            | "stop"
            | "use"
            | "fegaussianblur"
            | "feoffset"
            | "feblend"
            | "fecolormatrix"
            | "feflood"
            | "fecomposite"
            | "femergenode"
    )
}

/// Restore SVG camelCase tag names lost to lowercasing.
fn svg_tag_name(name: &str) -> &str {
    match name {
        "lineargradient" => "linearGradient",
        "radialgradient" => "radialGradient",
        "clippath" => "clipPath",
        "foreignobject" => "foreignObject",
        "fegaussianblur" => "feGaussianBlur",
        "feoffset" => "feOffset",
        "feblend" => "feBlend",
        "fecolormatrix" => "feColorMatrix",
        "feflood" => "feFlood",
        "fecomposite" => "feComposite",
        "femerge" => "feMerge",
        "femergenode" => "feMergeNode",
        "textpath" => "textPath",
        other => other,
    }
}

fn write_node(node: &Node, raw_text: bool, out: &mut String) {
    match node {
        Node::Text(text) if raw_text => out.push_str(text),
        Node::Text(text) => out.push_str(&defang(escape(text))),
        Node::Element(e) => write_element(e, out),
    }
}

fn write_element(e: &Element, out: &mut String) {
    let name = svg_tag_name(&e.name);
    out.push('<');
    out.push_str(name);
    for (key, value) in &e.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&defang(escape_attr(value)));
        out.push('"');
    }

    if is_void_element(&e.name) {
        out.push('>');
        return;
    }
    if e.children.is_empty() && is_svg_leaf(&e.name) {
        out.push_str("/>");
        return;
    }

    out.push('>');
    let raw_text = is_raw_text_element(&e.name);
    for child in &e.children {
        write_node(child, raw_text, out);
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Entity-encode the trigger characters of script vectors that survive as
/// plain text (`javascript:`, `onload=`). Renders identically.
fn defang(s: Cow<'_, str>) -> Cow<'_, str> {
    static SCHEME: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)(javascript|vbscript):").expect("valid regex"));
    static HANDLER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)(on[a-z]+)(\s*)=").expect("valid regex"));

    if !SCHEME.is_match(&s) && !HANDLER.is_match(&s) {
        return s;
    }
    let s = SCHEME.replace_all(&s, "$1&#58;").into_owned();
    Cow::Owned(HANDLER.replace_all(&s, "$1$2&#61;").into_owned())
}

// ============================================================================
// Traversal
// ============================================================================

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if is_raw_text_element(&e.name) => {}
            Node::Element(e) => collect_text(&e.children, out),
        }
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" | "br" | "blockquote"
            | "pre" | "tr" | "td" | "th" | "figcaption" | "dt" | "dd"
    )
}

fn collect_readable(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if is_raw_text_element(&e.name) => {}
            Node::Element(e) => {
                collect_readable(&e.children, out);
                if is_block(&e.name) {
                    out.push(' ');
                }
            }
        }
    }
}

fn visit(nodes: &[Node], f: &mut impl FnMut(&Element)) {
    for node in nodes {
        if let Node::Element(e) = node {
            f(e);
            visit(&e.children, f);
        }
    }
}

fn visit_mut(nodes: &mut [Node], f: &mut impl FnMut(&mut Element)) {
    for node in nodes {
        if let Node::Element(e) = node {
            f(e);
            visit_mut(&mut e.children, f);
        }
    }
}

fn collect_named<'a>(nodes: &'a [Node], name: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(e) = node {
            if e.name == name {
                found.push(e);
            }
            collect_named(&e.children, name, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(html: &str) -> String {
        Fragment::parse(html).unwrap().to_html()
    }

    #[test]
    fn test_parse_simple() {
        let frag = Fragment::parse("<p class=\"x\">Hallo <b>Welt</b></p>").unwrap();
        assert_eq!(frag.nodes.len(), 1);
        let p = frag.nodes[0].as_element().unwrap();
        assert!(p.is("p"));
        assert_eq!(p.get("class"), Some("x"));
        assert_eq!(p.text_content(), "Hallo Welt");
    }

    #[test]
    fn test_entities_decoded_and_reescaped() {
        let frag = Fragment::parse("<p title=\"a &amp; b\">M&uuml;ller &lt;3</p>").unwrap();
        let p = frag.nodes[0].as_element().unwrap();
        assert_eq!(p.get("title"), Some("a & b"));
        assert_eq!(p.text_content(), "Müller <3");
        assert_eq!(frag.to_html(), "<p title=\"a &amp; b\">Müller &lt;3</p>");
    }

    #[test]
    fn test_roundtrip_fixed_point() {
        let inputs = [
            "<p>Hallo <em>Welt</em></p>",
            "<ul><li>a</li><li>b &amp; c</li></ul>",
            "<p>Zeile<br>zwei</p><img src=\"/a.jpg\" alt=\"A\">",
            "<svg viewBox=\"0 0 10 10\"><path d=\"M0 0L10 10\"/></svg>",
        ];
        for input in inputs {
            let once = roundtrip(input);
            assert_eq!(roundtrip(&once), once, "not stable: {input}");
        }
    }

    #[test]
    fn test_void_and_svg_leaf_serialization() {
        assert_eq!(roundtrip("<p>a<br>b</p>"), "<p>a<br>b</p>");
        assert_eq!(
            roundtrip("<svg><circle cx=\"1\"/></svg>"),
            "<svg><circle cx=\"1\"/></svg>"
        );
    }

    #[test]
    fn test_svg_camel_case_restored() {
        let html = roundtrip("<svg><linearGradient id=\"g\"></linearGradient></svg>");
        assert!(html.contains("<linearGradient id=\"g\"></linearGradient>"));
    }

    #[test]
    fn test_comments_dropped() {
        assert_eq!(roundtrip("<p>a<!-- hidden -->b</p>"), "<p>ab</p>");
    }

    #[test]
    fn test_defang_text() {
        let frag = Fragment::new(vec![Node::text("javascript:alert(1) onload=x")]);
        let html = frag.to_html();
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("onload="));
        assert_eq!(Fragment::parse(&html).unwrap().text_content(), "javascript:alert(1) onload=x");
    }

    #[test]
    fn test_find_all_and_mutation() {
        let mut frag = Fragment::parse("<div><a href=\"/x\">x</a><p><a href=\"/y\">y</a></p></div>").unwrap();
        assert_eq!(frag.find_all("a").len(), 2);
        frag.for_each_element_mut(&mut |e| {
            if e.is("a") {
                e.set("class", "c");
            }
        });
        assert_eq!(frag.to_html().matches("class=\"c\"").count(), 2);
    }

    #[test]
    fn test_readable_text_separates_blocks() {
        let frag = Fragment::parse("<h2>Start</h2><p>Hallo <b>Welt</b></p><ul><li>a</li><li>b</li></ul>").unwrap();
        assert_eq!(frag.text_content(), "StartHallo Weltab");
        assert_eq!(frag.readable_text().split_whitespace().count(), 5);
    }

    #[test]
    fn test_too_deep_rejected() {
        let html = "<div>".repeat(MAX_DEPTH + 5);
        assert_eq!(Fragment::parse(&html), Err(ParseError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn test_self_closing_tags() {
        assert_eq!(roundtrip("<p>x<br/>y</p>"), "<p>x<br>y</p>");
        assert_eq!(roundtrip("<p>a</p><hr/><p>b</p>"), "<p>a</p><hr><p>b</p>");
        assert_eq!(
            roundtrip("<svg viewBox=\"0 0 1 1\"><g/><stop/><rect/></svg>"),
            "<svg viewBox=\"0 0 1 1\"><g></g><stop/><rect/></svg>"
        );
    }

    #[test]
    fn test_stray_lt_is_text() {
        assert_eq!(roundtrip("<p>Preis <5 Euro</p>"), "<p>Preis &lt;5 Euro</p>");
        assert_eq!(roundtrip("<p>a < b</p>"), "<p>a &lt; b</p>");
        assert_eq!(roundtrip("<p>x<</p>"), "<p>x&lt;</p>");
        assert_eq!(escape_stray_lt("<p>ok</p>"), "<p>ok</p>");
        assert_eq!(
            escape_stray_lt("<style>a<1</style><p>1 < 2</p>"),
            "<style>a<1</style><p>1 &lt; 2</p>"
        );
    }

    #[test]
    fn test_defang_inside_words() {
        let frag = Fragment::new(vec![
            Element::new("p").with("title", "xjavascript:1").text("aonerror=1 _onload=2").into(),
        ]);
        let html = frag.to_html().to_ascii_lowercase();
        for needle in ["javascript:", "onerror=", "onload="] {
            assert!(!html.contains(needle), "{html}");
        }
    }

    #[test]
    fn test_builder() {
        let e = Element::new("a").with("href", "/blog/").text("Blog & mehr");
        assert_eq!(e.to_html(), "<a href=\"/blog/\">Blog &amp; mehr</a>");
    }
}
