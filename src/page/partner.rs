//! Partner profile page `/partner/{slug}/`.

use super::card::tier_badge;
use super::{RenderContext, RenderedPage, certification_badge, service_label};
use crate::core::LinkKind;
use crate::dom::Element;
use crate::model::Partner;
use crate::pipeline::link;
use crate::seo::{Head, OpenGraph, jsonld};
use anyhow::Result;

pub fn render(ctx: &RenderContext, partner: &Partner) -> Result<RenderedPage> {
    let config = ctx.config;
    let path = partner.path();
    let url = config.site.absolute(&path);
    let tier = partner.tier();

    let (crumbs, crumbs_ld) = ctx.breadcrumbs(&[
        ("Startseite", "/"),
        ("Partner", "/partner/"),
        (partner.company_name.as_str(), path.as_str()),
    ]);

    let mut header = Element::new("header").class("od-partner-profile__header");
    if let Some(logo) = partner.logo() {
        header = header.child(
            Element::new("img")
                .class("od-partner-profile__logo")
                .with("src", logo)
                .with("alt", format!("{} Logo", partner.company_name))
                .with("width", "120")
                .with("height", "120"),
        );
    }
    header = header.child(
        Element::new("h1")
            .class("od-partner-profile__name")
            .text(partner.company_name.as_str()),
    );
    if let Some(badge) = tier_badge(tier) {
        header = header.child(badge);
    }
    let location = partner.location.display();
    if !location.is_empty() {
        header = header.child(
            Element::new("p")
                .class("od-partner-profile__location")
                .text(format!("📍 {location}")),
        );
    }

    let mut main = Element::new("article")
        .class(format!("od-partner-profile od-partner-profile--{}", tier.as_str()))
        .child(crumbs)
        .child(header);

    if !partner.description.trim().is_empty() {
        main = main.child(
            section("Über uns", "about")
                .child(Element::new("p").text(partner.description.trim())),
        );
    }
    if !partner.services.is_empty() {
        main = main.child(section("Leistungen", "services").child(tag_list(
            partner.services.iter().map(|s| service_label(s)),
        )));
    }
    if !partner.industries.is_empty() {
        main = main.child(
            section("Branchen", "industries")
                .child(tag_list(partner.industries.iter().map(String::as_str))),
        );
    }
    if !partner.certifications.is_empty() {
        main = main.child(section("Zertifizierungen", "certifications").child(certifications(partner)));
    }
    if let Some(facts) = facts(partner) {
        main = main.child(section("Unternehmen", "facts").child(facts));
    }
    main = main.child(contact(ctx, partner));

    let description = if partner.description.trim().is_empty() {
        format!("{} ist Odoo Partner in {}.", partner.company_name, partner.location.country)
    } else {
        super::truncate(&partner.description, 160)
    };

    let mut og = OpenGraph::website(config);
    og.og_type = "business.business";
    og.title = format!("{} - Odoo Partner", partner.company_name);
    og.description = description.clone();
    og.url = url.clone();
    if let Some(logo) = partner.logo() {
        og.image = config.site.absolute(logo);
        og.image_alt = format!("{} Logo", partner.company_name);
    }

    let mut head = Head::new(
        ctx.title(&format!("{} - Odoo Partner", partner.company_name)),
        description,
        url,
        og,
    );
    head.keywords = partner
        .services
        .iter()
        .map(|s| service_label(s).to_string())
        .chain(["Odoo Partner".to_string(), partner.location.city.clone()])
        .filter(|k| !k.trim().is_empty())
        .collect();
    head.json_ld.push(jsonld::local_business(partner, config));
    head.json_ld.push(crumbs_ld);

    let html = ctx.skeleton.document(&head, &main, "od-page od-page--partner")?;
    Ok(RenderedPage { path, html })
}

fn section(title: &str, key: &str) -> Element {
    Element::new("section")
        .class(format!("od-partner-profile__section od-partner-profile__{key}"))
        .child(Element::new("h2").text(title))
}

fn tag_list<'a>(items: impl Iterator<Item = &'a str>) -> Element {
    Element::new("ul").class("od-tag-list").children(
        items.map(|item| Element::new("li").class("od-tag").text(item).into()),
    )
}

fn certifications(partner: &Partner) -> Element {
    Element::new("ul").class("od-certifications").children(
        partner.certifications.iter().map(|cert| {
            let (icon, color) = certification_badge(cert);
            Element::new("li")
                .class("od-certification")
                .with("style", format!("--badge-color: {color}"))
                .child(
                    Element::new("span")
                        .class("od-certification__icon")
                        .with("aria-hidden", "true")
                        .text(icon),
                )
                .child(Element::new("span").class("od-certification__name").text(cert.as_str()))
                .into()
        }),
    )
}

fn facts(partner: &Partner) -> Option<Element> {
    let rows: Vec<(&str, &str)> = [
        ("Mitarbeiter", partner.employees.trim()),
        ("Gegründet", partner.founded.trim()),
        ("Land", partner.location.country.trim()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .collect();
    if rows.is_empty() {
        return None;
    }

    let mut list = Element::new("dl").class("od-partner-profile__facts");
    for (term, value) in rows {
        list = list
            .child(Element::new("dt").text(term))
            .child(Element::new("dd").text(value));
    }
    Some(list)
}

fn contact(ctx: &RenderContext, partner: &Partner) -> Element {
    let mut list = Element::new("ul").class("od-contact__list");

    if let Some(website) = partner.website().filter(|w| LinkKind::is_http(w)) {
        let mut a = Element::new("a").with("href", website).text("Website besuchen");
        link::apply(&mut a, ctx.hosts.scope(website));
        list = list.child(Element::new("li").class("od-contact__website").child(a));
    }
    if let Some(email) = partner.email() {
        list = list.child(
            Element::new("li").class("od-contact__email").child(
                Element::new("a")
                    .with("href", format!("mailto:{email}"))
                    .class(link::INTERNAL_CLASS)
                    .text(email),
            ),
        );
    }
    if let Some(phone) = partner.phone() {
        let dial: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        list = list.child(
            Element::new("li").class("od-contact__phone").child(
                Element::new("a")
                    .with("href", format!("tel:{dial}"))
                    .class(link::INTERNAL_CLASS)
                    .text(phone),
            ),
        );
    }

    let location = &partner.location;
    let address: Vec<String> = [
        location.address.trim().to_string(),
        format!("{} {}", location.postal_code.trim(), location.city.trim())
            .trim()
            .to_string(),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect();

    let mut block = Element::new("aside")
        .class("od-contact")
        .with("id", "kontakt")
        .child(Element::new("h2").class("od-contact__title").text("Kontakt"))
        .child(list);
    if !address.is_empty() {
        block = block.child(
            Element::new("address")
                .class("od-contact__address")
                .text(address.join(", ")),
        );
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::model::ImageCache;

    fn partner(json: &str) -> Partner {
        let mut p: Partner = serde_json::from_str(json).unwrap();
        p.slug = p.normalize();
        p
    }

    fn render_html(p: &Partner) -> String {
        let config = test_parse_config("");
        let images = ImageCache::default();
        let ctx = RenderContext::new(&config, &images, &[]).unwrap();
        render(&ctx, p).unwrap().html
    }

    #[test]
    fn test_profile_page() {
        let p = partner(
            r#"{"id": 1, "company_name": "Müller & Söhne GmbH", "subscription_tier": "premium",
                "website": "https://mueller.example", "phone": "+49 (30) 123",
                "contact_info": {"email": "info@mueller.example"},
                "services": ["erp_implementation"], "certifications": ["DSGVO", "Sonstiges"],
                "location": {"city": "Köln", "postal_code": "50667", "address": "Domplatz 1"}}"#,
        );
        assert_eq!(p.path(), "/partner/mueller-soehne-gmbh/");
        let html = render_html(&p);
        assert!(html.contains("<meta property=\"og:type\" content=\"business.business\">"));
        assert!(html.contains("<title>Müller &amp; Söhne GmbH - Odoo Partner | Deutsche Odoo Experten</title>"));
        assert!(html.contains("\"@type\":\"LocalBusiness\""));
        assert!(html.contains("ERP Implementierung"));
        assert!(html.contains("--badge-color: #00A36C"));
        assert!(html.contains("--badge-color: #666"));
        assert!(html.contains(
            "href=\"https://mueller.example\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"od-external-link\""
        ));
        assert!(html.contains("href=\"mailto:info@mueller.example\""));
        assert!(html.contains("href=\"tel:+4930123\""));
        assert!(html.contains("Domplatz 1, 50667 Köln"));
        assert!(html.contains("od-badge--premium"));
    }

    #[test]
    fn test_unsafe_website_skipped() {
        let p = partner(r#"{"id": 2, "company_name": "X", "website": "javascript:alert(1)"}"#);
        let html = render_html(&p);
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("Website besuchen"));
        assert!(!html.contains("od-partner-profile__certifications"));
    }
}
