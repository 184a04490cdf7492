//! Open Graph and Twitter Card meta tags.

use crate::config::SiteConfig;
use crate::dom::Element;

/// Article-specific Open Graph properties.
#[derive(Debug, Clone, Default)]
pub struct ArticleOg {
    pub published: Option<String>,
    pub modified: Option<String>,
    pub author: String,
    pub section: String,
    pub tags: Vec<String>,
}

/// Open Graph data of one page. `url` and `image` are absolute.
#[derive(Debug, Clone)]
pub struct OpenGraph {
    pub og_type: &'static str,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub image_alt: String,
    pub site_name: String,
    pub locale: String,
    pub article: Option<ArticleOg>,
}

impl OpenGraph {
    /// Website defaults; callers override title, url and type.
    pub fn website(config: &SiteConfig) -> Self {
        Self {
            og_type: "website",
            title: config.site.name.clone(),
            description: config.site.description.clone(),
            url: config.site.absolute("/"),
            image: config.site.absolute(&config.site.og_image),
            image_alt: config.site.name.clone(),
            site_name: config.site.name.clone(),
            locale: config.site.locale.clone(),
            article: None,
        }
    }

    /// `<meta property="og:*">` followed by the Twitter Card tags.
    pub fn tags(&self) -> Vec<Element> {
        let mut tags = vec![
            property("og:type", self.og_type),
            property("og:title", &self.title),
            property("og:description", &self.description),
            property("og:url", &self.url),
            property("og:image", &self.image),
            property("og:image:alt", &self.image_alt),
            property("og:site_name", &self.site_name),
            property("og:locale", &self.locale),
        ];

        if let Some(article) = &self.article {
            if let Some(published) = &article.published {
                tags.push(property("article:published_time", published));
            }
            if let Some(modified) = &article.modified {
                tags.push(property("article:modified_time", modified));
            }
            tags.push(property("article:author", &article.author));
            tags.push(property("article:section", &article.section));
            tags.extend(article.tags.iter().map(|t| property("article:tag", t)));
        }

        tags.extend([
            name("twitter:card", "summary_large_image"),
            name("twitter:title", &self.title),
            name("twitter:description", &self.description),
            name("twitter:image", &self.image),
            name("twitter:image:alt", &self.image_alt),
        ]);
        tags
    }
}

fn property(key: &str, content: &str) -> Element {
    Element::new("meta").with("property", key).with("content", content)
}

fn name(key: &str, content: &str) -> Element {
    Element::new("meta").with("name", key).with("content", content)
}
