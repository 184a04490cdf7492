//! Link classification utilities.

use crate::config::SiteSectionConfig;

/// Syntactic classification of links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Link with URL scheme (https://, mailto:, tel:, etc.)
    Scheme(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Site-root-relative path (/about, /blog/x/).
    SiteRoot(&'a str),
    /// File-relative path (./image.png, ../other).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if has_scheme(link) || link.starts_with("//") {
            Self::Scheme(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Check if link is HTTP/HTTPS (including protocol-relative).
    #[inline]
    pub fn is_http(link: &str) -> bool {
        let lower = link.trim_start().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
    }
}

/// `scheme:` prefix per RFC 3986 (letter, then letters/digits/`+-.`).
fn has_scheme(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// ============================================================================
// Scope (internal vs external)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    Internal,
    External,
}

/// Hostnames that count as "this site".
#[derive(Debug, Clone, Default)]
pub struct SiteHosts {
    hosts: Vec<String>,
}

impl SiteHosts {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    pub fn from_config(site: &SiteSectionConfig) -> Self {
        Self::new(site.own_hosts())
    }

    /// Classify a link destination.
    ///
    /// Only absolute http(s) URLs to a foreign host are external. Relative
    /// paths, fragments and non-web schemes (`mailto:`, `tel:`) are internal,
    /// as is an anchor without `href`.
    pub fn scope(&self, href: &str) -> LinkScope {
        let href = href.trim();
        if !LinkKind::is_http(href) {
            return LinkScope::Internal;
        }

        let absolute = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };
        match url::Url::parse(&absolute).ok().and_then(|u| u.host_str().map(str::to_ascii_lowercase)) {
            Some(host) if self.is_own(&host) => LinkScope::Internal,
            _ => LinkScope::External,
        }
    }

    /// Exact host or a subdomain of it (`www.`).
    fn is_own(&self, host: &str) -> bool {
        self.hosts.iter().any(|own| {
            host == own
                || host
                    .strip_suffix(own.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> SiteHosts {
        SiteHosts::new(["odoo-experten-deutschland.de", "odoo-directory.de"])
    }

    #[test]
    fn test_parse_scheme() {
        assert!(matches!(
            LinkKind::parse("https://example.com"),
            LinkKind::Scheme("https://example.com")
        ));
        assert!(matches!(
            LinkKind::parse("mailto:user@example.com"),
            LinkKind::Scheme("mailto:user@example.com")
        ));
        assert!(matches!(
            LinkKind::parse("tel:+49301234567"),
            LinkKind::Scheme("tel:+49301234567")
        ));
        assert!(matches!(
            LinkKind::parse("//cdn.example.com/x.js"),
            LinkKind::Scheme(_)
        ));
    }

    #[test]
    fn test_parse_fragment() {
        assert!(matches!(
            LinkKind::parse("#section"),
            LinkKind::Fragment("section")
        ));
        assert!(matches!(LinkKind::parse("#"), LinkKind::Fragment("")));
    }

    #[test]
    fn test_parse_site_root() {
        assert!(matches!(
            LinkKind::parse("/partner/"),
            LinkKind::SiteRoot("/partner/")
        ));
        assert!(matches!(
            LinkKind::parse("/blog/x/#faq"),
            LinkKind::SiteRoot("/blog/x/#faq")
        ));
    }

    #[test]
    fn test_parse_file_relative() {
        assert!(matches!(
            LinkKind::parse("./image.png"),
            LinkKind::FileRelative("./image.png")
        ));
        assert!(matches!(
            LinkKind::parse("../other"),
            LinkKind::FileRelative("../other")
        ));
        // A colon after a slash is not a scheme
        assert!(matches!(
            LinkKind::parse("a/b:c"),
            LinkKind::FileRelative("a/b:c")
        ));
    }

    #[test]
    fn test_is_http() {
        assert!(LinkKind::is_http("http://example.com"));
        assert!(LinkKind::is_http("HTTPS://example.com"));
        assert!(!LinkKind::is_http("mailto:user@example.com"));
        assert!(!LinkKind::is_http("/about"));
    }

    #[test]
    fn test_scope() {
        let hosts = hosts();
        assert_eq!(hosts.scope("/blog/"), LinkScope::Internal);
        assert_eq!(hosts.scope("#faq"), LinkScope::Internal);
        assert_eq!(hosts.scope("mailto:info@example.com"), LinkScope::Internal);
        assert_eq!(hosts.scope("https://odoo-directory.de/partner/"), LinkScope::Internal);
        assert_eq!(hosts.scope("https://www.odoo-experten-deutschland.de/"), LinkScope::Internal);
        assert_eq!(hosts.scope("https://www.odoo.com/"), LinkScope::External);
        assert_eq!(hosts.scope("https://notodoo-directory.de/"), LinkScope::External);
        assert_eq!(hosts.scope("//cdn.example.com/x"), LinkScope::External);
    }
}
