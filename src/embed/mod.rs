//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `page` - Page skeleton templates (base, header, footer)
//! - `ASSETS` - Stylesheet and script written next to the generated pages
//! - `HERO_PLACEHOLDER`, `AVATAR_PLACEHOLDER` - Default images, written
//!   unless the static assets directory provides its own
//!
//! # Usage
//!
//! ```ignore
//! use embed::page::{HEADER_HTML, ChromeVars};
//!
//! let header = HEADER_HTML.render(&ChromeVars::from_config(&config))?;
//! ```

mod template;

pub use template::{Template, TemplateVars, Value};

pub mod page {
    use super::{Template, TemplateVars, Value};
    use crate::config::SiteConfig;
    use crate::utils::date::DateTimeUtc;

    /// Variables of the document skeleton. Everything but `lang`, `site_name`
    /// and `body_class` is trusted markup.
    pub struct DocumentVars {
        pub lang: String,
        pub site_name: String,
        pub body_class: String,
        pub head: String,
        pub header: String,
        pub body: String,
        pub footer: String,
    }

    impl TemplateVars for DocumentVars {
        fn get(&self, name: &str) -> Option<Value<'_>> {
            Some(match name {
                "lang" => Value::Text(&self.lang),
                "site_name" => Value::Text(&self.site_name),
                "body_class" => Value::Text(&self.body_class),
                "head" => Value::Html(&self.head),
                "header" => Value::Html(&self.header),
                "body" => Value::Html(&self.body),
                "footer" => Value::Html(&self.footer),
                _ => return None,
            })
        }
    }

    /// Site-wide values available to header and footer.
    pub struct ChromeVars {
        pub site_name: String,
        pub site_description: String,
        pub email: String,
        pub year: String,
    }

    impl ChromeVars {
        pub fn from_config(config: &SiteConfig) -> Self {
            Self {
                site_name: config.site.name.clone(),
                site_description: config.site.description.clone(),
                email: config.site.email.clone(),
                year: DateTimeUtc::now().year.to_string(),
            }
        }
    }

    impl TemplateVars for ChromeVars {
        fn get(&self, name: &str) -> Option<Value<'_>> {
            Some(match name {
                "site_name" => Value::Text(&self.site_name),
                "site_description" => Value::Text(&self.site_description),
                "email" => Value::Text(&self.email),
                "year" => Value::Text(&self.year),
                _ => return None,
            })
        }
    }

    /// `<!DOCTYPE html>` skeleton around every page.
    pub const BASE_HTML: Template<DocumentVars> =
        Template::new("base.html", include_str!("templates/base.html"));

    /// Site navigation. Overridable via `build.templates/header.html`.
    pub const HEADER_HTML: Template<ChromeVars> =
        Template::new("header.html", include_str!("templates/header.html"));

    /// Site footer. Overridable via `build.templates/footer.html`.
    pub const FOOTER_HTML: Template<ChromeVars> =
        Template::new("footer.html", include_str!("templates/footer.html"));
}

/// A static file compiled into the binary.
pub struct EmbeddedAsset {
    /// Output path relative to the site root.
    pub path: &'static str,
    pub content: &'static str,
}

/// Files referenced by the page skeleton.
pub const ASSETS: [EmbeddedAsset; 2] = [
    EmbeddedAsset {
        path: "assets/css/od-site.css",
        content: include_str!("assets/od-site.css"),
    },
    EmbeddedAsset {
        path: "assets/js/od-site.js",
        content: include_str!("assets/od-site.js"),
    },
];

/// Article hero shown until an image has been generated.
pub const HERO_PLACEHOLDER: &str = include_str!("assets/default-hero.svg");

/// Avatar of authors without a photo.
pub const AVATAR_PLACEHOLDER: &str = include_str!("assets/default-avatar.svg");

#[cfg(test)]
mod tests {
    use super::page::*;
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_embedded_templates_render() {
        let config = test_parse_config("[site]\nname = \"A & B\"");
        let chrome = ChromeVars::from_config(&config);
        let header = HEADER_HTML.render(&chrome).unwrap();
        let footer = FOOTER_HTML.render(&chrome).unwrap();
        assert!(header.contains("A &amp; B"));
        assert!(footer.contains(&format!("&copy; {} A &amp; B", chrome.year)));

        let doc = BASE_HTML
            .render(&DocumentVars {
                lang: "de".into(),
                site_name: "A & B".into(),
                body_class: "od-page".into(),
                head: "<title>T</title>".into(),
                header,
                body: "<p>x</p>".into(),
                footer,
            })
            .unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>\n<html lang=\"de\">"));
        assert!(doc.contains("<title>T</title>"));
        assert!(doc.contains("<p>x</p>"));
    }

    #[test]
    fn test_assets_present() {
        assert!(ASSETS.iter().all(|a| !a.content.is_empty()));
        assert!(BASE_HTML.content().contains(ASSETS[0].path));
    }

    #[test]
    fn test_placeholders_pass_svg_sanitizer() {
        use crate::pipeline::sanitize::{Profile, sanitize};

        for svg in [HERO_PLACEHOLDER, AVATAR_PLACEHOLDER] {
            let out = sanitize(svg, Profile::Svg).unwrap();
            assert!(out.findings.is_empty(), "{:?}", out.findings);
            assert!(svg.contains("viewBox"));
        }
    }
}
