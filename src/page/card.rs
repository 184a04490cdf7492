//! Article and partner cards used by the homepage, listings and related
//! articles.

use super::{RenderContext, internal_link, service_label, time, truncate};
use crate::dom::Element;
use crate::model::{Article, Partner, Tier};
use crate::pipeline::link::INTERNAL_CLASS;

const EXCERPT_CHARS: usize = 160;
const CARD_SERVICES: usize = 3;

pub fn article_card(ctx: &RenderContext, article: &Article) -> Element {
    let path = article.path();

    let image = Element::new("a")
        .with("href", path.as_str())
        .class(format!("od-card__image-link {INTERNAL_CLASS}"))
        .with("tabindex", "-1")
        .child(
            Element::new("img")
                .with("src", ctx.thumbnail(&article.slug))
                .with("alt", article.title.as_str())
                .with("loading", "lazy")
                .with("width", "400")
                .with("height", "225"),
        );

    let mut meta = Element::new("p").class("od-card__meta");
    if let Some(published) = article.published {
        meta = meta.child(time(published)).text(" · ");
    }
    meta = meta.text(format!("{} Min. Lesezeit", ctx.reading_minutes(&article.slug)));

    let mut body = Element::new("div")
        .class("od-card__body")
        .child(Element::new("span").class("od-card__category").text(article.category.as_str()))
        .child(
            Element::new("h3")
                .class("od-card__title")
                .child(internal_link(&path, &article.title)),
        )
        .child(meta);

    let summary = article.summary();
    if !summary.is_empty() {
        body = body.child(
            Element::new("p")
                .class("od-card__excerpt")
                .text(truncate(summary, EXCERPT_CHARS)),
        );
    }

    Element::new("article")
        .class("od-card od-article-card")
        .child(image)
        .child(body)
}

/// Tier badge; starter partners carry none.
pub fn tier_badge(tier: Tier) -> Option<Element> {
    tier.is_paid().then(|| {
        Element::new("span")
            .class(format!("od-badge od-badge--{}", tier.as_str()))
            .text(tier.label())
    })
}

/// Up to three service tags plus `+N mehr` for the rest.
pub fn service_tags(services: &[String]) -> Option<Element> {
    if services.is_empty() {
        return None;
    }
    let mut tags = Element::new("div").class("od-partner-card__services").children(
        services
            .iter()
            .take(CARD_SERVICES)
            .map(|s| Element::new("span").class("od-tag").text(service_label(s)).into()),
    );
    if services.len() > CARD_SERVICES {
        tags = tags.child(
            Element::new("span")
                .class("od-tag od-tag--more")
                .text(format!("+{} mehr", services.len() - CARD_SERVICES)),
        );
    }
    Some(tags)
}

pub fn partner_card(partner: &Partner) -> Element {
    let path = partner.path();
    let tier = partner.tier();

    let mut header = Element::new("div").class("od-partner-card__header");
    if let Some(logo) = partner.logo() {
        header = header.child(
            Element::new("img")
                .class("od-partner-card__logo")
                .with("src", logo)
                .with("alt", format!("{} Logo", partner.company_name))
                .with("loading", "lazy")
                .with("width", "64")
                .with("height", "64"),
        );
    }
    header = header.child(
        Element::new("h3")
            .class("od-partner-card__name")
            .child(internal_link(&path, &partner.company_name)),
    );
    if let Some(badge) = tier_badge(tier) {
        header = header.child(badge);
    }

    let mut body = Element::new("div").class("od-card__body").child(header);
    let location = partner.location.display();
    if !location.is_empty() {
        body = body.child(
            Element::new("p")
                .class("od-partner-card__location")
                .text(format!("📍 {location}")),
        );
    }
    if !partner.description.trim().is_empty() {
        body = body.child(
            Element::new("p")
                .class("od-partner-card__description")
                .text(truncate(&partner.description, EXCERPT_CHARS)),
        );
    }
    if let Some(tags) = service_tags(&partner.services) {
        body = body.child(tags);
    }
    body = body.child(
        Element::new("a")
            .with("href", path.as_str())
            .class(format!("od-button {INTERNAL_CLASS}"))
            .text("Profil ansehen"),
    );

    Element::new("article")
        .class(format!("od-card od-partner-card od-partner-card--{}", tier.as_str()))
        .child(body)
}
