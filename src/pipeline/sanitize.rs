//! Allow-list sanitizer for untrusted markup.
//!
//! Two profiles share one walker:
//!
//! - `Profile::Html`: article bodies and FAQ fields. Inline `<svg>` subtrees
//!   switch to the SVG rules.
//! - `Profile::Svg`: vector graphics (visualizations, standalone files).
//!
//! Dangerous elements are dropped together with their subtree. Unknown but
//! harmless elements are unwrapped (children kept). Attributes outside the
//! allow-list are removed, and URL attributes with script schemes are removed
//! even when the attribute itself is allowed.

use crate::dom::{Element, Fragment, Node, ParseError};

/// Byte reduction above which a sanitize pass is flagged for audit.
const REDUCTION_THRESHOLD: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Html,
    Svg,
}

/// Something the sanitizer removed or noticed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A script vector was removed (`<script>`, `onload`, `javascript:` URL).
    Forbidden(String),
    /// Absolute http(s) reference inside SVG, removed.
    ExternalReference(String),
    /// Output is noticeably smaller than input. Advisory only.
    SignificantReduction { before: usize, after: usize },
}

impl Finding {
    /// Advisory findings never fail validation.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::SignificantReduction { .. })
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden(what) => write!(f, "forbidden content removed: {what}"),
            Self::ExternalReference(url) => write!(f, "external reference removed: {url}"),
            Self::SignificantReduction { before, after } => write!(
                f,
                "sanitizing removed {:.0}% of the content ({before} -> {after} bytes)",
                reduction(*before, *after) * 100.0
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sanitized {
    pub html: String,
    pub findings: Vec<Finding>,
}

/// Parse and sanitize a markup string.
///
/// Parse failures are returned as errors; callers drop the item instead of
/// passing the input through.
pub fn sanitize(input: &str, profile: Profile) -> Result<Sanitized, ParseError> {
    let fragment = Fragment::parse(input)?;
    let (clean, mut findings) = clean(fragment, profile);
    let html = clean.to_html();
    if let Some(finding) = check_reduction(input.trim().len(), html.len()) {
        findings.push(finding);
    }
    Ok(Sanitized { html, findings })
}

/// Sanitize an already parsed fragment.
pub fn clean(fragment: Fragment, profile: Profile) -> (Fragment, Vec<Finding>) {
    let mut findings = Vec::new();
    let nodes = clean_nodes(fragment.nodes, profile, &mut findings);
    (Fragment::new(nodes), findings)
}

/// Flag a pass that removed more than the threshold share of bytes.
pub fn check_reduction(before: usize, after: usize) -> Option<Finding> {
    (reduction(before, after) > REDUCTION_THRESHOLD)
        .then_some(Finding::SignificantReduction { before, after })
}

#[allow(clippy::cast_precision_loss)]
fn reduction(before: usize, after: usize) -> f64 {
    if before == 0 || after >= before {
        return 0.0;
    }
    (before - after) as f64 / before as f64
}

// ============================================================================
// Tree walk
// ============================================================================

fn clean_nodes(nodes: Vec<Node>, profile: Profile, findings: &mut Vec<Finding>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => out.push(Node::Text(text)),
            Node::Element(element) => clean_element(element, profile, findings, &mut out),
        }
    }
    out
}

fn clean_element(mut e: Element, profile: Profile, findings: &mut Vec<Finding>, out: &mut Vec<Node>) {
    if is_dangerous(&e.name) {
        findings.push(Finding::Forbidden(format!("<{}>", e.name)));
        return;
    }

    // Inline SVG inside HTML content follows the SVG rules
    let profile = if e.is("svg") { Profile::Svg } else { profile };

    if !tag_allowed(&e.name, profile) {
        if !is_opaque(&e.name) {
            out.extend(clean_nodes(e.children, profile, findings));
        }
        return;
    }

    let tag = e.name.clone();
    e.attrs = std::mem::take(&mut e.attrs)
        .into_iter()
        .filter(|(key, value)| keep_attr(&tag, key, value, profile, findings))
        .collect();
    e.children = clean_nodes(e.children, profile, findings);
    out.push(Node::Element(e));
}

fn keep_attr(tag: &str, key: &str, value: &str, profile: Profile, findings: &mut Vec<Finding>) -> bool {
    let key = key.to_ascii_lowercase();

    if key.starts_with("on") {
        findings.push(Finding::Forbidden(format!("{key} on <{tag}>")));
        return false;
    }
    if !attr_allowed(&key, profile) {
        return false;
    }

    if is_url_attr(&key) {
        if has_script_scheme(value) {
            findings.push(Finding::Forbidden(format!("script URL in {key} on <{tag}>")));
            return false;
        }
        if profile == Profile::Svg && is_http(value) {
            findings.push(Finding::ExternalReference(value.trim().to_string()));
            return false;
        }
    }

    if key == "style" && !style_is_safe(value) {
        findings.push(Finding::Forbidden(format!("style on <{tag}>")));
        return false;
    }

    true
}

// ============================================================================
// Policy tables
// ============================================================================

/// Dropped with their whole subtree and reported.
fn is_dangerous(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "iframe" | "object" | "embed" | "applet" | "foreignobject" | "base" | "meta" | "link"
    )
}

/// Not allowed and not reported, but their text must not leak into output.
fn is_opaque(tag: &str) -> bool {
    matches!(tag, "style" | "template" | "noscript" | "title" | "head" | "textarea" | "select")
}

fn tag_allowed(tag: &str, profile: Profile) -> bool {
    match profile {
        Profile::Html => matches!(
            tag,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
                | "p" | "br" | "hr"
                | "strong" | "b" | "em" | "i" | "u" | "s" | "mark" | "small" | "sub" | "sup"
                | "code" | "pre" | "kbd"
                | "ul" | "ol" | "li" | "dl" | "dt" | "dd"
                | "a" | "img" | "figure" | "figcaption"
                | "blockquote" | "cite" | "q"
                | "table" | "caption" | "thead" | "tbody" | "tfoot" | "tr" | "th" | "td"
                | "div" | "span"
        ),
        Profile::Svg => matches!(
            tag,
            "svg" | "g" | "defs" | "symbol" | "use" | "title" | "desc"
                | "path" | "circle" | "ellipse" | "rect" | "line" | "polyline" | "polygon"
                | "text" | "tspan" | "textpath"
                | "lineargradient" | "radialgradient" | "stop" | "pattern"
                | "clippath" | "mask" | "marker" | "filter"
                | "fegaussianblur" | "feoffset" | "feblend" | "fecolormatrix" | "feflood"
                | "fecomposite" | "femerge" | "femergenode"
        ),
    }
}

fn attr_allowed(key: &str, profile: Profile) -> bool {
    if key.starts_with("aria-") {
        return true;
    }
    match profile {
        Profile::Html => matches!(
            key,
            "href" | "src" | "alt" | "title" | "class" | "id" | "target" | "rel"
                | "datetime" | "lang" | "dir" | "width" | "height" | "colspan" | "rowspan"
                | "loading" | "role"
        ),
        Profile::Svg => matches!(
            key,
            "xmlns" | "xmlns:xlink" | "viewbox" | "preserveaspectratio" | "width" | "height"
                | "class" | "id" | "role" | "style" | "transform" | "opacity"
                | "fill" | "fill-opacity" | "fill-rule" | "clip-rule"
                | "stroke" | "stroke-width" | "stroke-linecap" | "stroke-linejoin"
                | "stroke-dasharray" | "stroke-dashoffset" | "stroke-opacity"
                | "d" | "cx" | "cy" | "r" | "rx" | "ry" | "x" | "y" | "x1" | "y1" | "x2" | "y2"
                | "fx" | "fy" | "dx" | "dy" | "points" | "pathlength"
                | "text-anchor" | "dominant-baseline" | "font-size" | "font-family" | "font-weight"
                | "offset" | "stop-color" | "stop-opacity"
                | "gradientunits" | "gradienttransform" | "patternunits" | "patterntransform"
                | "clip-path" | "clippathunits" | "mask" | "filter"
                | "stddeviation" | "in" | "in2" | "result" | "mode" | "values" | "type"
                | "markerwidth" | "markerheight" | "refx" | "refy" | "orient"
                | "href" | "xlink:href" | "focusable"
        ),
    }
}

fn is_url_attr(key: &str) -> bool {
    matches!(key, "href" | "src" | "xlink:href")
}

fn is_http(value: &str) -> bool {
    let v = value.trim_start().to_ascii_lowercase();
    v.starts_with("http://") || v.starts_with("https://") || v.starts_with("//")
}

/// `javascript:`, `vbscript:` and non-image `data:` URLs.
///
/// Whitespace and control characters are ignored the way browsers ignore
/// them inside a scheme (`java\tscript:`).
fn has_script_scheme(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect();
    compact.starts_with("javascript:")
        || compact.starts_with("vbscript:")
        || (compact.starts_with("data:") && !compact.starts_with("data:image/"))
}

fn style_is_safe(value: &str) -> bool {
    let v = value.to_ascii_lowercase();
    !(v.contains("javascript:") || v.contains("expression(") || v.contains("@import") || v.contains("url(http"))
}
