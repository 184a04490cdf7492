//! Sitemap generation.
//!
//! `sitemap.xml` lists the homepage, both index pages, every article and
//! every partner profile. `sitemap-images.xml` lists the generated hero
//! image of each article under the image extension namespace.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/slug/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.7</priority>
//!   </url>
//! </urlset>
//! ```

use super::{escape_xml, minify_xml, write_output};
use crate::config::SiteConfig;
use crate::log;
use crate::model::{Article, ImageCache, Partner};
use crate::utils::date::DateTimeUtc;
use anyhow::Result;
use std::fmt::Write;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const IMAGE_SITEMAP_FILE: &str = "sitemap-images.xml";

/// Write both sitemaps into the output directory.
pub fn build_sitemaps(
    config: &SiteConfig,
    articles: &[Article],
    partners: &[Partner],
    images: &ImageCache,
) -> Result<()> {
    let output = &config.build.output;
    let minify = config.build.minify;

    let sitemap = Sitemap::build(config, articles, partners);
    let count = sitemap.urls.len();
    write_output(output, SITEMAP_FILE, &minify_xml(&sitemap.into_xml(), minify))?;
    log!("sitemap"; "{} ({} urls)", SITEMAP_FILE, count);

    let images = ImageSitemap::build(config, articles, images);
    let count = images.entries.len();
    write_output(output, IMAGE_SITEMAP_FILE, &minify_xml(&images.into_xml(), minify))?;
    log!("sitemap"; "{} ({} images)", IMAGE_SITEMAP_FILE, count);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

impl Sitemap {
    pub fn build(config: &SiteConfig, articles: &[Article], partners: &[Partner]) -> Self {
        let site = &config.site;
        let newest_article = articles.iter().filter_map(Article::modified).max();
        let newest_partner = partners.iter().filter_map(Partner::modified).max();

        let mut urls = vec![
            entry(site.absolute("/"), newest_article.max(newest_partner), ChangeFreq::Daily, 1.0),
            entry(site.absolute("/blog/"), newest_article, ChangeFreq::Daily, 0.9),
            entry(site.absolute("/partner/"), newest_partner, ChangeFreq::Daily, 0.9),
        ];
        urls.extend(articles.iter().map(|a| {
            entry(site.absolute(&a.path()), a.modified(), ChangeFreq::Weekly, 0.7)
        }));
        urls.extend(partners.iter().map(|p| {
            entry(
                site.absolute(&p.path()),
                p.modified(),
                ChangeFreq::Monthly,
                p.tier().sitemap_priority(),
            )
        }));

        Self { urls }
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 160);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(xml, "<urlset xmlns=\"{SITEMAP_NS}\">");

        for entry in self.urls {
            xml.push_str("  <url>\n");
            let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
            if let Some(lastmod) = entry.lastmod {
                let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
            }
            let _ = writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq.as_str());
            let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

fn entry(loc: String, lastmod: Option<DateTimeUtc>, changefreq: ChangeFreq, priority: f32) -> UrlEntry {
    UrlEntry {
        loc,
        lastmod: lastmod.map(DateTimeUtc::to_date),
        changefreq,
        priority,
    }
}

// ============================================================================
// Image sitemap
// ============================================================================

#[derive(Debug, Clone)]
pub struct ImageUrl {
    /// Absolute page URL.
    pub page: String,
    /// Absolute image URL.
    pub image: String,
    pub title: String,
    pub caption: String,
}

#[derive(Debug, Clone, Default)]
pub struct ImageSitemap {
    pub entries: Vec<ImageUrl>,
}

impl ImageSitemap {
    /// One entry per article with a generated hero image.
    pub fn build(config: &SiteConfig, articles: &[Article], images: &ImageCache) -> Self {
        let entries = articles
            .iter()
            .filter_map(|a| {
                let hero = images.hero(&a.slug)?;
                Some(ImageUrl {
                    page: config.site.absolute(&a.path()),
                    image: config.site.absolute(&hero),
                    title: a.title.clone(),
                    caption: a.summary().to_string(),
                })
            })
            .collect();
        Self { entries }
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.entries.len() * 320);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(xml, "<urlset xmlns=\"{SITEMAP_NS}\" xmlns:image=\"{IMAGE_NS}\">");

        for entry in self.entries {
            xml.push_str("  <url>\n");
            let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.page));
            xml.push_str("    <image:image>\n");
            let _ = writeln!(xml, "      <image:loc>{}</image:loc>", escape_xml(&entry.image));
            let _ = writeln!(xml, "      <image:title>{}</image:title>", escape_xml(&entry.title));
            if !entry.caption.is_empty() {
                let _ = writeln!(
                    xml,
                    "      <image:caption>{}</image:caption>",
                    escape_xml(&entry.caption)
                );
            }
            xml.push_str("    </image:image>\n");
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::model::{ArticleRecord, Author, ImageEntry};
    use std::collections::BTreeMap;

    fn article(slug: &str, json: &str) -> Article {
        let record: ArticleRecord = serde_json::from_str(json).unwrap();
        Article::from_record(record, slug.into(), Author::default())
    }

    fn partner(json: &str) -> Partner {
        let mut p: Partner = serde_json::from_str(json).unwrap();
        p.slug = p.normalize();
        p
    }

    #[test]
    fn test_priorities_and_lastmod() {
        let config = test_parse_config("");
        let articles = [article(
            "a",
            r#"{"id": 1, "title": "A", "published_at": "2025-01-15", "updated_at": "2025-02-01T10:00:00Z"}"#,
        )];
        let partners = [partner(
            r#"{"id": 1, "company_name": "E", "subscription_tier": "enterprise", "created_at": "2024-12-01"}"#,
        )];
        let xml = Sitemap::build(&config, &articles, &partners).into_xml();

        let base = config.site.base_url();
        assert!(xml.contains(&format!(
            "<loc>{base}/</loc>\n    <lastmod>2025-02-01</lastmod>\n    <changefreq>daily</changefreq>\n    <priority>1.0</priority>"
        )));
        assert!(xml.contains(&format!(
            "<loc>{base}/partner/</loc>\n    <lastmod>2024-12-01</lastmod>\n    <changefreq>daily</changefreq>\n    <priority>0.9</priority>"
        )));
        assert!(xml.contains(&format!(
            "<loc>{base}/blog/a/</loc>\n    <lastmod>2025-02-01</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>0.7</priority>"
        )));
        assert!(xml.contains(&format!(
            "<loc>{base}/partner/e/</loc>\n    <lastmod>2024-12-01</lastmod>\n    <changefreq>monthly</changefreq>\n    <priority>0.8</priority>"
        )));
    }

    #[test]
    fn test_empty_dataset_keeps_root_entries() {
        let config = test_parse_config("");
        let xml = Sitemap::build(&config, &[], &[]).into_xml();
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(!xml.contains("<lastmod>"));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_image_sitemap_only_generated() {
        let config = test_parse_config("");
        let articles = [
            article("a", r#"{"id": 1, "title": "A & B", "excerpt": "Kurz"}"#),
            article("b", r#"{"id": 2, "title": "B"}"#),
        ];
        let mut entries = BTreeMap::new();
        let mut hero = ImageEntry {
            generated: true,
            ..Default::default()
        };
        hero.paths.hero = Some("/assets/images/blog/a-hero.jpg".into());
        entries.insert("a".to_string(), hero);
        let images = ImageCache::from_entries(entries);

        let xml = ImageSitemap::build(&config, &articles, &images).into_xml();
        assert!(xml.contains(&format!("xmlns:image=\"{IMAGE_NS}\"")));
        assert_eq!(xml.matches("<image:image>").count(), 1);
        assert!(xml.contains("<image:title>A &amp; B</image:title>"));
        assert!(xml.contains("<image:caption>Kurz</image:caption>"));
        assert!(xml.contains("/assets/images/blog/a-hero.jpg</image:loc>"));
    }
}
