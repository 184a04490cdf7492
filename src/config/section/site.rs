//! `[site]` section configuration.
//!
//! Site identity shared by every generated page: name, canonical URL,
//! language and the hostnames treated as internal links.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Deutsche Odoo Experten"
//! url = "https://odoo-experten-deutschland.de"
//! hosts = ["odoo-directory.de", "deutsche-odoo-experten.de"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site name, appended to page titles.
    pub name: String,

    /// Canonical site URL without trailing slash.
    pub url: String,

    /// Default meta description for listing pages.
    pub description: String,

    /// `<html lang>` and RSS language.
    pub language: String,

    /// Open Graph locale.
    pub locale: String,

    /// Fallback author for articles without persona.
    pub author: String,

    /// Contact address (Organization JSON-LD, RSS).
    pub email: String,

    /// Site-root-relative logo path.
    pub logo: String,

    /// Hero placeholder used until an image has been generated.
    pub default_image: String,

    /// Default social preview image for non-article pages.
    pub og_image: String,

    /// Additional hostnames counted as internal links.
    pub hosts: Vec<String>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            name: "Deutsche Odoo Experten".into(),
            url: "https://odoo-experten-deutschland.de".into(),
            description: "Das Verzeichnis zertifizierter Odoo Partner in Deutschland mit \
                          Fachartikeln zu ERP, DSGVO und Digitalisierung."
                .into(),
            language: "de".into(),
            locale: "de_DE".into(),
            author: "Odoo Directory Team".into(),
            email: "info@odoo-experten-deutschland.de".into(),
            logo: "/assets/images/logo.png".into(),
            default_image: "/assets/images/blog/default-hero.svg".into(),
            og_image: "/assets/og-image.jpg".into(),
            hosts: vec![
                "odoo-directory.de".into(),
                "deutsche-odoo-experten.de".into(),
            ],
        }
    }
}

impl SiteSectionConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const HOSTS: FieldPath = FieldPath::new("site.hosts");
    pub const NAME: FieldPath = FieldPath::new("site.name");

    /// Site URL without trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL for a site-root-relative path. Absolute inputs pass through.
    pub fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/{}", self.base_url(), path)
        }
    }

    /// Hostnames whose links are internal: the site URL host plus `hosts`.
    pub fn own_hosts(&self) -> Vec<String> {
        let mut hosts: Vec<String> = url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            .into_iter()
            .collect();
        for host in &self.hosts {
            let host = host.trim().to_ascii_lowercase();
            if !host.is_empty() && !hosts.contains(&host) {
                hosts.push(host);
            }
        }
        hosts
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error(Self::NAME, "site name must not be empty");
        }

        match url::Url::parse(&self.url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::URL,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::URL,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }

        if self.hosts.iter().any(|h| h.trim().is_empty()) {
            diag.warn(Self::HOSTS, "empty hostname ignored");
        }
    }
}
