//! SVG markup policy, for standalone `.svg` files and inline `<svg>` blocks.
//!
//! Each graphic is sanitized again; anything the sanitizer would still
//! remove is an error. Namespace, `viewBox` and size are checked on top:
//!
//! | Check | Standalone | Inline |
//! |-------|------------|--------|
//! | forbidden element/attribute | error | error |
//! | external `http(s)` reference | error | error |
//! | >10% removed by sanitizing | warning | warning |
//! | missing `xmlns` | error | warning |
//! | missing `viewBox` | warning | warning |
//! | larger than `svg_max_bytes` | warning | warning |

use super::report::FileFindings;
use crate::dom::{Element, Fragment};
use crate::pipeline::sanitize::{self, Profile};
use quick_xml::{Reader, events::Event};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Check a standalone SVG document.
pub fn check_svg_file(content: &str, max_bytes: usize) -> FileFindings {
    let mut findings = FileFindings::default();
    let target = "svg";

    let root = match root_attributes(content) {
        Ok(Some(attrs)) => attrs,
        Ok(None) => {
            findings.error(target, "no <svg> root element");
            return findings;
        }
        Err(e) => {
            findings.error(target, format!("not well-formed XML: {e}"));
            return findings;
        }
    };

    if !root.iter().any(|(k, v)| k == "xmlns" && v == SVG_NS) {
        findings.error(target, "missing xmlns declaration");
    }
    if !root.iter().any(|(k, _)| k.eq_ignore_ascii_case("viewBox")) {
        findings.warning(target, "missing viewBox");
    }
    check_common(content, target, max_bytes, &mut findings);
    findings
}

/// Check every inline `<svg>` of a parsed HTML document.
pub fn check_inline(fragment: &Fragment, max_bytes: usize) -> FileFindings {
    let mut findings = FileFindings::default();
    for (i, svg) in outermost_svgs(fragment).into_iter().enumerate() {
        let target = format!("svg #{}", i + 1);
        if !svg.has("xmlns") {
            findings.warning(&target, "missing xmlns declaration");
        }
        if !svg.has("viewBox") {
            findings.warning(&target, "missing viewBox");
        }
        check_common(&svg.to_html(), &target, max_bytes, &mut findings);
    }
    findings
}

/// Sanitizer findings and size, shared by both kinds.
fn check_common(markup: &str, target: &str, max_bytes: usize, findings: &mut FileFindings) {
    match sanitize::sanitize(markup, Profile::Svg) {
        Ok(result) => {
            for finding in result.findings {
                if finding.is_advisory() {
                    findings.warning(target, finding.to_string());
                } else {
                    findings.error(target, finding.to_string());
                }
            }
        }
        Err(e) => findings.error(target, format!("unparseable: {e}")),
    }
    if markup.len() > max_bytes {
        findings.warning(
            target,
            format!("{} KB exceeds {} KB", markup.len() / 1024, max_bytes / 1024),
        );
    }
}

/// `<svg>` elements not nested inside another `<svg>`.
fn outermost_svgs(fragment: &Fragment) -> Vec<&Element> {
    fn walk<'a>(nodes: &'a [crate::dom::Node], out: &mut Vec<&'a Element>) {
        for node in nodes {
            if let Some(e) = node.as_element() {
                if e.is("svg") {
                    out.push(e);
                } else {
                    walk(&e.children, out);
                }
            }
        }
    }
    let mut out = Vec::new();
    walk(&fragment.nodes, &mut out);
    out
}

/// Attributes of the root `<svg>`, after checking the whole document is
/// well-formed.
fn root_attributes(content: &str) -> Result<Option<Vec<(String, String)>>, quick_xml::Error> {
    let mut reader = Reader::from_str(content);
    let mut root = None;
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if !seen_root => {
                seen_root = true;
                if e.local_name().as_ref() == b"svg" {
                    let attrs = e
                        .attributes()
                        .filter_map(Result::ok)
                        .map(|a| {
                            (
                                String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                                String::from_utf8_lossy(&a.value).into_owned(),
                            )
                        })
                        .collect();
                    root = Some(attrs);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="blue"/></svg>"#;

    fn reasons(items: &[super::super::report::ValidationError]) -> Vec<&str> {
        items.iter().map(|e| e.reason.as_str()).collect()
    }

    #[test]
    fn test_clean_standalone_svg() {
        let findings = check_svg_file(GOOD, 51200);
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_standalone_svg_policy() {
        let svg = r#"<svg viewBox="0 0 10 10"><script>alert(1)</script><rect width="10" height="10"/></svg>"#;
        let findings = check_svg_file(svg, 51200);
        let errors = reasons(&findings.errors);
        assert!(errors.contains(&"missing xmlns declaration"));
        assert!(errors.iter().any(|r| r.starts_with("forbidden content removed")));
    }

    #[test]
    fn test_malformed_and_oversized() {
        let findings = check_svg_file("<svg><g></svg>", 51200);
        assert!(reasons(&findings.errors)[0].starts_with("not well-formed XML"));

        let findings = check_svg_file(GOOD, 16);
        assert!(findings.errors.is_empty());
        assert_eq!(findings.warnings.len(), 1);
        assert!(findings.warnings[0].reason.contains("exceeds"));
    }

    #[test]
    fn test_inline_svg_blocks() {
        let html = format!(
            r#"<div>{GOOD}<p>text</p><svg xmlns="http://www.w3.org/2000/svg"><use href="https://evil.example/x.svg#icon"/></svg></div>"#
        );
        let fragment = Fragment::parse(&html).unwrap();
        let findings = check_inline(&fragment, 51200);

        assert!(findings.errors.iter().all(|e| e.target == "svg #2"));
        assert!(findings.errors.iter().any(|e| e.reason.starts_with("external reference removed")));
        assert!(findings.warnings.iter().any(|e| e.target == "svg #2" && e.reason == "missing viewBox"));
    }
}
