//! Link integrity over generated HTML.
//!
//! Checks `a[href]`, `link[href]`, `script[src]` and `img[src]`:
//!
//! - internal targets must resolve to a file below the output directory
//!   (`index.html` is appended for directory style and extension-less paths)
//! - external anchors must carry the external link class, and `noopener
//!   noreferrer` when they open a new tab
//! - internal anchors without the internal link class are a warning
//! - `javascript:` URLs are always an error

use super::report::FileFindings;
use crate::core::{LinkKind, LinkScope, SiteHosts};
use crate::dom::{Element, Fragment};
use crate::pipeline::link::{EXTERNAL_CLASS, INTERNAL_CLASS};
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

/// Check every reference in one parsed document.
///
/// `file` is the document's path below `output`.
pub fn check_document(fragment: &Fragment, file: &Path, output: &Path, hosts: &SiteHosts) -> FileFindings {
    let mut findings = FileFindings::default();
    fragment.for_each_element(&mut |e| {
        if let Some(target) = reference(e) {
            check_reference(e, target, file, output, hosts, &mut findings);
        }
    });
    findings
}

/// The URL attribute this validator looks at, if any.
fn reference(e: &Element) -> Option<&str> {
    let attr = match e.name.as_str() {
        "a" | "link" => "href",
        "script" | "img" => "src",
        _ => return None,
    };
    e.get(attr).map(str::trim).filter(|v| !v.is_empty())
}

fn check_reference(
    e: &Element,
    target: &str,
    file: &Path,
    output: &Path,
    hosts: &SiteHosts,
    findings: &mut FileFindings,
) {
    let lower = target.to_ascii_lowercase();
    if lower.starts_with("javascript:") {
        findings.error(target, "script URL");
        return;
    }

    match hosts.scope(target) {
        LinkScope::External => {
            if e.is("a") {
                check_external_anchor(e, target, findings);
            }
        }
        LinkScope::Internal => {
            let Some(path) = internal_path(target, file) else {
                return;
            };
            if !resolves(output, &path) {
                findings.error(target, "target not found");
            }
            if e.is("a") && !has_class(e, INTERNAL_CLASS) {
                findings.warning(target, format!("missing class `{INTERNAL_CLASS}`"));
            }
        }
    }
}

fn check_external_anchor(e: &Element, target: &str, findings: &mut FileFindings) {
    if e.get("target") == Some("_blank") {
        let rel = e.get("rel").unwrap_or_default();
        let tokens: Vec<&str> = rel.split_ascii_whitespace().collect();
        for required in ["noopener", "noreferrer"] {
            if !tokens.contains(&required) {
                findings.error(target, format!("target=_blank without rel `{required}`"));
            }
        }
    }
    if !has_class(e, EXTERNAL_CLASS) {
        findings.error(target, format!("missing class `{EXTERNAL_CLASS}`"));
    }
}

fn has_class(e: &Element, class: &str) -> bool {
    e.get("class")
        .is_some_and(|c| c.split_ascii_whitespace().any(|token| token == class))
}

/// Site path (leading `/`) of an internal reference, or `None` when there
/// is nothing on disk to check (fragments, `mailto:`, `data:` ...).
fn internal_path(target: &str, file: &Path) -> Option<String> {
    let path = match LinkKind::parse(target) {
        LinkKind::Fragment(_) => return None,
        LinkKind::SiteRoot(path) => path.to_string(),
        LinkKind::FileRelative(path) => relative_to(file, path),
        LinkKind::Scheme(url) if LinkKind::is_http(url) => {
            let absolute = if url.starts_with("//") {
                format!("https:{url}")
            } else {
                url.to_string()
            };
            url::Url::parse(&absolute).ok()?.path().to_string()
        }
        LinkKind::Scheme(_) => return None,
    };
    let path = strip_query(&path);
    Some(percent_decode_str(path).decode_utf8_lossy().into_owned())
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or_default()
}

/// Resolve `path` against the directory of `file`, both relative to the
/// output root.
fn relative_to(file: &Path, path: &str) -> String {
    let mut parts: Vec<String> = file
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    for segment in strip_query(path).split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other.to_string()),
        }
    }
    let mut joined = format!("/{}", parts.join("/"));
    if path.ends_with('/') && !joined.ends_with('/') {
        joined.push('/');
    }
    joined
}

/// Whether a site path maps to an existing output file.
fn resolves(output: &Path, site_path: &str) -> bool {
    let relative = site_path.trim_start_matches('/');
    if relative.split('/').any(|s| s == "..") {
        return false;
    }
    let mut file = PathBuf::from(output);
    file.push(relative);
    if site_path.ends_with('/') || relative.is_empty() || file.extension().is_none() {
        file.push("index.html");
    }
    file.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn hosts() -> SiteHosts {
        SiteHosts::new(["odoo-experten-deutschland.de"])
    }

    fn output() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog/a")).unwrap();
        fs::write(dir.path().join("index.html"), "").unwrap();
        fs::write(dir.path().join("blog/a/index.html"), "").unwrap();
        fs::create_dir_all(dir.path().join("assets/css")).unwrap();
        fs::write(dir.path().join("assets/css/od-site.css"), "").unwrap();
        dir
    }

    fn check(html: &str, dir: &TempDir) -> FileFindings {
        let fragment = Fragment::parse(html).unwrap();
        check_document(&fragment, Path::new("blog/a/index.html"), dir.path(), &hosts())
    }

    #[test]
    fn test_internal_targets() {
        let dir = output();
        let findings = check(
            r##"<a href="/blog/a/" class="od-internal-link">ok</a>
               <a href="/blog/a" class="od-internal-link">no slash</a>
               <a href="/blog/a/?x=1#faq" class="od-internal-link">query</a>
               <a href="../../" class="od-internal-link">relative</a>
               <a href="https://odoo-experten-deutschland.de/blog/a/" class="od-internal-link">own host</a>
               <link rel="stylesheet" href="/assets/css/od-site.css">
               <a href="#faq">fragment</a>
               <a href="mailto:info@example.com">mail</a>"##,
            &dir,
        );
        assert!(findings.errors.is_empty(), "{:?}", findings.errors);
        assert!(findings.warnings.is_empty(), "{:?}", findings.warnings);
    }

    #[test]
    fn test_broken_targets() {
        let dir = output();
        let findings = check(
            r#"<a href="/blog/missing/" class="od-internal-link">x</a>
               <img src="/assets/images/none.jpg" alt="">
               <script src="/assets/js/none.js"></script>
               <a href="javascript:void(0)">js</a>"#,
            &dir,
        );
        let targets: Vec<&str> = findings.errors.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(
            targets,
            ["/blog/missing/", "/assets/images/none.jpg", "/assets/js/none.js", "javascript:void(0)"]
        );
    }

    #[test]
    fn test_external_anchor_policy() {
        let dir = output();
        let findings = check(
            r#"<a href="https://www.odoo.com/" target="_blank" rel="noopener noreferrer" class="od-external-link">ok</a>
               <a href="https://www.odoo.com/a" target="_blank" rel="noopener" class="od-external-link">rel</a>
               <a href="https://www.odoo.com/b">class</a>
               <img src="https://cdn.example.com/x.png" alt="">"#,
            &dir,
        );
        let reasons: Vec<(&str, &str)> = findings
            .errors
            .iter()
            .map(|e| (e.target.as_str(), e.reason.as_str()))
            .collect();
        assert_eq!(
            reasons,
            [
                ("https://www.odoo.com/a", "target=_blank without rel `noreferrer`"),
                ("https://www.odoo.com/b", "missing class `od-external-link`"),
            ]
        );
    }

    #[test]
    fn test_unclassified_internal_anchor_warns() {
        let dir = output();
        let findings = check(r#"<a href="/">home</a>"#, &dir);
        assert!(findings.errors.is_empty());
        assert_eq!(findings.warnings.len(), 1);
    }
}
