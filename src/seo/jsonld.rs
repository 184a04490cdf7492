//! JSON-LD structured data.
//!
//! Values are built with `serde_json::json!` and embedded by `script`, which
//! escapes the characters that could end the surrounding `<script>` element.

use crate::config::SiteConfig;
use crate::enhance::FaqItem;
use crate::model::{Article, Partner};
use serde_json::{Value, json};

const CONTEXT: &str = "https://schema.org";

/// One `<script type="application/ld+json">` block.
pub fn script(value: &Value) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "{}".into());
    let json = json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026");
    format!("<script type=\"application/ld+json\">{json}</script>")
}

fn publisher(config: &SiteConfig) -> Value {
    json!({
        "@type": "Organization",
        "name": config.site.name,
        "logo": {
            "@type": "ImageObject",
            "url": config.site.absolute(&config.site.logo),
        },
    })
}

/// `Article` data for a blog post.
pub fn article(article: &Article, config: &SiteConfig, image: &str, words: usize) -> Value {
    let url = config.site.absolute(&article.path());
    let mut value = json!({
        "@context": CONTEXT,
        "@type": "Article",
        "headline": article.title,
        "description": article.summary(),
        "image": image,
        "author": {
            "@type": "Person",
            "name": article.author.name,
        },
        "publisher": publisher(config),
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": url,
        },
        "url": url,
        "articleSection": article.category,
        "wordCount": words,
        "inLanguage": "de-DE",
    });

    if let Some(object) = value.as_object_mut() {
        if let Some(published) = article.published {
            object.insert("datePublished".into(), json!(published.to_rfc3339()));
        }
        if let Some(modified) = article.modified() {
            object.insert("dateModified".into(), json!(modified.to_rfc3339()));
        }
        let keywords = super::meta::keywords(&article.keywords, &article.tags);
        if !keywords.is_empty() {
            object.insert("keywords".into(), json!(keywords.join(", ")));
        }
    }
    value
}

/// `FAQPage` data. Uses the same sanitized items as the visible block.
pub fn faq_page(items: &[FaqItem]) -> Value {
    let entities: Vec<Value> = items
        .iter()
        .map(|item| {
            json!({
                "@type": "Question",
                "name": item.question_text(),
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": item.answer_text(),
                },
            })
        })
        .collect();

    json!({
        "@context": CONTEXT,
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// `BreadcrumbList` from `(name, absolute url)` pairs.
pub fn breadcrumbs(trail: &[(String, String)]) -> Value {
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": url,
            })
        })
        .collect();

    json!({
        "@context": CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// Site-wide `Organization`, emitted on the homepage only.
pub fn organization(config: &SiteConfig) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "Organization",
        "name": config.site.name,
        "url": config.site.absolute("/"),
        "logo": config.site.absolute(&config.site.logo),
        "description": config.site.description,
        "email": config.site.email,
        "areaServed": {
            "@type": "Country",
            "name": "Deutschland",
        },
    })
}

/// `LocalBusiness` data for a partner profile.
pub fn local_business(partner: &Partner, config: &SiteConfig) -> Value {
    let location = &partner.location;
    let price_range = if partner.tier().is_paid() { "€€" } else { "€" };
    let url = partner
        .website()
        .map_or_else(|| config.site.absolute(&partner.path()), str::to_string);
    let mut value = json!({
        "@context": CONTEXT,
        "@type": "LocalBusiness",
        "name": partner.company_name,
        "description": partner.description,
        "url": url,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": location.address,
            "addressLocality": location.city,
            "addressRegion": location.state,
            "postalCode": location.postal_code,
            "addressCountry": location.country,
        },
        "priceRange": price_range,
    });

    if let Some(object) = value.as_object_mut() {
        if let Some(logo) = partner.logo() {
            object.insert("image".into(), json!(config.site.absolute(logo)));
        }
        if let Some(phone) = partner.phone() {
            object.insert("telephone".into(), json!(phone));
        }
        if let Some(email) = partner.email() {
            object.insert("email".into(), json!(email));
        }
        if let Some((latitude, longitude)) = location.geo() {
            object.insert(
                "geo".into(),
                json!({
                    "@type": "GeoCoordinates",
                    "latitude": latitude,
                    "longitude": longitude,
                }),
            );
        }
        if !partner.services.is_empty() {
            let services: Vec<&str> = partner
                .services
                .iter()
                .map(|s| crate::page::service_label(s))
                .collect();
            object.insert("knowsAbout".into(), json!(services));
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_script_cannot_break_out() {
        let html = script(&json!({ "name": "</script><script>alert(1)</script> & co" }));
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains("\\u003c/script\\u003e"));
        assert!(html.contains("\\u0026 co"));
    }

    #[test]
    fn test_faq_page_order() {
        let items = vec![
            FaqItem {
                question: "Erste?".into(),
                answer: "<p>Eins</p>".into(),
            },
            FaqItem {
                question: "Zweite?".into(),
                answer: "Zwei".into(),
            },
        ];
        let value = faq_page(&items);
        assert_eq!(value["@type"], "FAQPage");
        assert_eq!(value["mainEntity"][0]["name"], "Erste?");
        assert_eq!(value["mainEntity"][0]["acceptedAnswer"]["text"], "Eins");
        assert_eq!(value["mainEntity"][1]["name"], "Zweite?");
    }

    #[test]
    fn test_breadcrumb_positions() {
        let value = breadcrumbs(&[
            ("Startseite".into(), "https://x.de/".into()),
            ("Blog".into(), "https://x.de/blog/".into()),
        ]);
        assert_eq!(value["itemListElement"][1]["position"], 2);
        assert_eq!(value["itemListElement"][1]["name"], "Blog");
    }

    #[test]
    fn test_local_business() {
        let config = test_parse_config("");
        let mut partner: Partner = serde_json::from_str(
            r#"{"id": 1, "company_name": "Alpha GmbH", "subscription_tier": "premium",
                "phone": "+49 30 1", "services": ["migration"],
                "location": {"city": "Berlin", "latitude": 52.5, "longitude": 13.4}}"#,
        )
        .unwrap();
        partner.slug = partner.normalize();

        let value = local_business(&partner, &config);
        assert_eq!(value["@type"], "LocalBusiness");
        assert_eq!(value["priceRange"], "€€");
        assert_eq!(value["address"]["addressCountry"], "Deutschland");
        assert_eq!(value["geo"]["latitude"], 52.5);
        assert_eq!(value["telephone"], "+49 30 1");
        assert_eq!(value["url"], "https://odoo-experten-deutschland.de/partner/alpha-gmbh/");
        assert_eq!(value["knowsAbout"][0], "Migration");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_organization() {
        let config = test_parse_config("");
        let value = organization(&config);
        assert_eq!(value["@type"], "Organization");
        assert_eq!(value["url"], "https://odoo-experten-deutschland.de/");
    }
}
