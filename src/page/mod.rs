//! Page assembly.
//!
//! Every page kind builds its body as `dom` elements plus its `Head`, then
//! hands both to the shared [`Skeleton`]. Pages depend only on the
//! [`RenderContext`] and the prepared records, so the build renders them in
//! parallel.
//!
//! # Module Structure
//!
//! ```text
//! page/
//! ├── card.rs       # Article and partner cards shared by listings
//! ├── home.rs       # /
//! ├── listing.rs    # /blog/, /blog/page/N/
//! ├── article.rs    # /blog/{slug}/
//! ├── directory.rs  # /partner/
//! └── partner.rs    # /partner/{slug}/
//! ```

pub mod article;
pub mod card;
pub mod directory;
pub mod home;
pub mod listing;
pub mod partner;

use crate::config::SiteConfig;
use crate::core::SiteHosts;
use crate::debug;
use crate::dom::Element;
use crate::embed::page::{BASE_HTML, ChromeVars, DocumentVars, FOOTER_HTML, HEADER_HTML};
use crate::enhance::reading_time;
use crate::model::{Article, ImageCache};
use crate::pipeline::{self, link::INTERNAL_CLASS};
use crate::seo::{Head, jsonld};
use anyhow::{Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A finished document and the site path it is served under.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Site path with trailing slash, e.g. `/blog/slug/`.
    pub path: String,
    pub html: String,
}

impl RenderedPage {
    /// `index.html` below `output` for this page's path.
    pub fn output_file(&self, output: &Path) -> PathBuf {
        let relative = self.path.trim_matches('/');
        if relative.is_empty() {
            output.join("index.html")
        } else {
            output.join(relative).join("index.html")
        }
    }

    pub fn write(&self, output: &Path) -> Result<PathBuf> {
        let file = self.output_file(output);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&file, &self.html)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        Ok(file)
    }
}

// ============================================================================
// Skeleton
// ============================================================================

/// Header and footer rendered once, wrapped around every page body.
#[derive(Debug, Clone)]
pub struct Skeleton {
    lang: String,
    site_name: String,
    header: String,
    footer: String,
}

impl Skeleton {
    /// Render header and footer, preferring overrides from `build.templates`.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let chrome = ChromeVars::from_config(config);
        let dir = config.build.templates.as_deref();

        let header = match read_override(dir, HEADER_HTML.name())? {
            Some(content) => HEADER_HTML.with_content(content),
            None => HEADER_HTML,
        };
        let footer = match read_override(dir, FOOTER_HTML.name())? {
            Some(content) => FOOTER_HTML.with_content(content),
            None => FOOTER_HTML,
        };

        Ok(Self {
            lang: config.site.language.clone(),
            site_name: config.site.name.clone(),
            header: header.render(&chrome)?,
            footer: footer.render(&chrome)?,
        })
    }

    /// Complete document. Pure: equal inputs give byte-identical output.
    pub fn document(&self, head: &Head, body: &Element, body_class: &str) -> Result<String> {
        let html = BASE_HTML.render(&DocumentVars {
            lang: self.lang.clone(),
            site_name: self.site_name.clone(),
            body_class: body_class.to_string(),
            head: head.to_html(),
            header: self.header.clone(),
            body: body.to_html(),
            footer: self.footer.clone(),
        })?;
        Ok(html)
    }
}

fn read_override(dir: Option<&Path>, name: &str) -> Result<Option<String>> {
    let Some(path) = dir.map(|d| d.join(name)).filter(|p| p.is_file()) else {
        return Ok(None);
    };
    debug!("template"; "using {}", path.display());
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    Ok(Some(content))
}

// ============================================================================
// Render context
// ============================================================================

/// Shared read-only inputs of every page.
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    pub hosts: SiteHosts,
    pub images: &'a ImageCache,
    pub skeleton: Skeleton,
    /// Reading time in minutes by article slug.
    reading: FxHashMap<String, usize>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig, images: &'a ImageCache, articles: &[Article]) -> Result<Self> {
        let hosts = SiteHosts::from_config(&config.site);
        let per_minute = config.blog.words_per_minute;
        let reading = articles
            .par_iter()
            .map(|a| {
                let words = pipeline::process_content(&a.content, &hosts)
                    .map(|c| c.words)
                    .unwrap_or(0);
                (a.slug.clone(), reading_time(words, per_minute))
            })
            .collect();

        Ok(Self {
            config,
            hosts,
            images,
            skeleton: Skeleton::load(config)?,
            reading,
        })
    }

    pub fn reading_minutes(&self, slug: &str) -> usize {
        self.reading.get(slug).copied().unwrap_or(1)
    }

    /// Hero image site path, else the placeholder.
    pub fn hero(&self, slug: &str) -> String {
        self.images
            .hero(slug)
            .unwrap_or_else(|| self.config.site.default_image.clone())
    }

    pub fn thumbnail(&self, slug: &str) -> String {
        self.images
            .thumbnail(slug)
            .unwrap_or_else(|| self.config.site.default_image.clone())
    }

    /// Absolute social preview image.
    pub fn social_image(&self, slug: &str) -> String {
        let path = self
            .images
            .social(slug)
            .unwrap_or_else(|| self.config.site.default_image.clone());
        self.config.site.absolute(&path)
    }

    /// `{title} | {site name}`.
    pub fn title(&self, title: &str) -> String {
        format!("{title} | {}", self.config.site.name)
    }

    /// Visible breadcrumb nav and its `BreadcrumbList` from `(name, path)`
    /// pairs; the last pair is the current page.
    pub fn breadcrumbs(&self, trail: &[(&str, &str)]) -> (Element, Value) {
        let last = trail.len().saturating_sub(1);
        let items = trail.iter().enumerate().map(|(i, (name, path))| {
            let item = Element::new("li").class("od-breadcrumbs__item");
            if i == last {
                item.child(Element::new("span").with("aria-current", "page").text(*name))
            } else {
                item.child(internal_link(path, name))
            }
        });
        let nav = Element::new("nav")
            .class("od-breadcrumbs")
            .with("aria-label", "Breadcrumb")
            .child(Element::new("ol").children(items.map(Into::into)));

        let absolute: Vec<(String, String)> = trail
            .iter()
            .map(|(name, path)| (name.to_string(), self.config.site.absolute(path)))
            .collect();
        (nav, jsonld::breadcrumbs(&absolute))
    }
}

// ============================================================================
// Shared fragments
// ============================================================================

/// Anchor to a page of this site.
pub fn internal_link(href: &str, text: &str) -> Element {
    Element::new("a")
        .with("href", href)
        .class(INTERNAL_CLASS)
        .text(text)
}

/// `<time>` with RFC 3339 `datetime` and German display text.
pub fn time(date: crate::utils::date::DateTimeUtc) -> Element {
    Element::new("time")
        .with("datetime", date.to_rfc3339())
        .text(date.to_german())
}

/// Cut `text` at a word boundary so it fits `max` characters, adding `…`.
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    let at_boundary = text.chars().nth(max).is_some_and(char::is_whitespace);
    let cut = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 && !at_boundary => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end_matches([',', '.', ';', ':', ' ']))
}

/// German label of a service key. Unknown keys pass through.
pub fn service_label(service: &str) -> &str {
    match service {
        "erp_implementation" => "ERP Implementierung",
        "customization" => "Anpassungen",
        "migration" => "Migration",
        "support" => "Support & Wartung",
        "training" => "Schulungen",
        "consulting" => "Beratung",
        "integration" => "Integration",
        "development" => "Entwicklung",
        other => other,
    }
}

/// Icon and color of a certification badge.
pub fn certification_badge(name: &str) -> (&'static str, &'static str) {
    match name {
        "TÜV" => ("✓", "#0066CC"),
        "DSGVO" => ("🛡️", "#00A36C"),
        "ISO 27001" => ("🏆", "#FF6B35"),
        "GoBD" => ("📋", "#7B68EE"),
        _ => ("•", "#666"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::seo::OpenGraph;
    use tempfile::TempDir;

    #[test]
    fn test_output_file() {
        let out = Path::new("/out");
        let page = |path: &str| RenderedPage {
            path: path.into(),
            html: String::new(),
        };
        assert_eq!(page("/").output_file(out), Path::new("/out/index.html"));
        assert_eq!(
            page("/blog/page/2/").output_file(out),
            Path::new("/out/blog/page/2/index.html")
        );
    }

    #[test]
    fn test_skeleton_override_and_purity() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        fs::write(
            dir.path().join("templates/header.html"),
            "<header class=\"custom\">{{site_name}}</header>",
        )
        .unwrap();
        let config = test_config_at(dir.path(), "[build]\ntemplates = \"templates\"");

        let skeleton = Skeleton::load(&config).unwrap();
        let head = Head::new("T", "D", "https://x.de/", OpenGraph::website(&config));
        let body = Element::new("main").text("<b>");

        let first = skeleton.document(&head, &body, "od-page").unwrap();
        let second = skeleton.document(&head, &body, "od-page").unwrap();
        assert_eq!(first, second);
        assert!(first.contains("<header class=\"custom\">Deutsche Odoo Experten</header>"));
        assert!(first.contains("<main>&lt;b&gt;</main>"));
        assert!(first.contains("<footer class=\"od-footer\">"));
    }

    #[test]
    fn test_override_with_unknown_variable_fails() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        fs::write(dir.path().join("templates/footer.html"), "{{nope}}").unwrap();
        let config = test_config_at(dir.path(), "[build]\ntemplates = \"templates\"");
        assert!(Skeleton::load(&config).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("kurz", 10), "kurz");
        assert_eq!(truncate("Odoo ist ein ERP System", 12), "Odoo ist ein…");
        assert_eq!(truncate("Odoo, ERP", 6), "Odoo…");
    }

    #[test]
    fn test_labels() {
        assert_eq!(service_label("support"), "Support & Wartung");
        assert_eq!(service_label("custom_x"), "custom_x");
        assert_eq!(certification_badge("DSGVO").1, "#00A36C");
        assert_eq!(certification_badge("Other"), ("•", "#666"));
    }

    #[test]
    fn test_breadcrumbs() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path(), "");
        let images = ImageCache::default();
        let ctx = RenderContext::new(&config, &images, &[]).unwrap();
        let (nav, value) = ctx.breadcrumbs(&[("Startseite", "/"), ("Blog", "/blog/")]);
        let html = nav.to_html();
        assert!(html.contains("<a href=\"/\" class=\"od-internal-link\">Startseite</a>"));
        assert!(html.contains("<span aria-current=\"page\">Blog</span>"));
        assert_eq!(
            value["itemListElement"][1]["item"],
            "https://odoo-experten-deutschland.de/blog/"
        );
    }
}
