//! Homepage `/`.

use super::card::{article_card, partner_card};
use super::{RenderContext, RenderedPage, internal_link};
use crate::dom::Element;
use crate::model::{Article, Partner};
use crate::pipeline::link::INTERNAL_CLASS;
use crate::seo::{Head, OpenGraph, jsonld};
use anyhow::Result;

/// Paid partners, enterprise before premium, featured first within a tier.
/// Input order (directory order) breaks remaining ties.
pub fn featured_partners(partners: &[Partner], limit: usize) -> Vec<&Partner> {
    let mut featured: Vec<&Partner> = partners.iter().filter(|p| p.tier().is_paid()).collect();
    featured.sort_by(|a, b| {
        b.tier()
            .cmp(&a.tier())
            .then_with(|| b.is_featured.cmp(&a.is_featured))
    });
    featured.truncate(limit);
    featured
}

/// `articles` newest first, `partners` in directory order.
pub fn render(ctx: &RenderContext, articles: &[Article], partners: &[Partner]) -> Result<RenderedPage> {
    let config = ctx.config;
    let blog = &config.blog;

    let hero = Element::new("section")
        .class("od-hero")
        .child(Element::new("h1").class("od-hero__title").text(config.site.name.as_str()))
        .child(Element::new("p").class("od-hero__text").text(config.site.description.as_str()))
        .child(
            Element::new("div")
                .class("od-hero__actions")
                .child(
                    Element::new("a")
                        .with("href", "/partner/")
                        .class(format!("od-button od-button--primary {INTERNAL_CLASS}"))
                        .text("Partner finden"),
                )
                .child(
                    Element::new("a")
                        .with("href", "/blog/")
                        .class(format!("od-button {INTERNAL_CLASS}"))
                        .text("Zum Blog"),
                ),
        );

    let mut main = Element::new("div").class("od-home").child(hero);

    let recent: Vec<&Article> = articles.iter().take(blog.home_articles).collect();
    if !recent.is_empty() {
        main = main.child(
            section("Aktuelle Artikel", "articles")
                .child(
                    Element::new("div")
                        .class("od-card-grid")
                        .children(recent.into_iter().map(|a| article_card(ctx, a).into())),
                )
                .child(internal_link("/blog/", "Alle Artikel ansehen")),
        );
    }

    let featured = featured_partners(partners, blog.home_partners);
    if !featured.is_empty() {
        main = main.child(
            section("Ausgewählte Partner", "partners")
                .child(
                    Element::new("div")
                        .class("od-card-grid od-partner-grid")
                        .children(featured.into_iter().map(|p| partner_card(p).into())),
                )
                .child(internal_link("/partner/", "Alle Partner ansehen")),
        );
    }

    let url = config.site.absolute("/");
    let og = OpenGraph::website(config);
    let mut head = Head::new(
        format!("{} - Odoo Partner und ERP Wissen", config.site.name),
        config.site.description.as_str(),
        url,
        og,
    );
    head.keywords = ["Odoo", "Odoo Partner", "ERP", "Deutschland"]
        .map(String::from)
        .to_vec();
    head.json_ld.push(jsonld::organization(config));

    let html = ctx.skeleton.document(&head, &main, "od-page od-page--home")?;
    Ok(RenderedPage {
        path: "/".to_string(),
        html,
    })
}

fn section(title: &str, key: &str) -> Element {
    Element::new("section")
        .class(format!("od-home__section od-home__{key}"))
        .child(Element::new("h2").class("od-home__title").text(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::model::{ArticleRecord, Author, ImageCache};

    fn partners(json: &str) -> Vec<Partner> {
        let mut list: Vec<Partner> = serde_json::from_str(json).unwrap();
        for p in &mut list {
            p.slug = p.normalize();
        }
        list.sort_by(Partner::directory_order);
        list
    }

    #[test]
    fn test_featured_partners() {
        let list = partners(
            r#"[{"id": 1, "company_name": "A", "subscription_tier": "premium", "is_featured": true},
                {"id": 2, "company_name": "B", "subscription_tier": "starter", "is_featured": true},
                {"id": 3, "company_name": "C", "subscription_tier": "enterprise"},
                {"id": 4, "company_name": "D", "subscription_tier": "premium"}]"#,
        );
        let names: Vec<&str> = featured_partners(&list, 6)
            .iter()
            .map(|p| p.company_name.as_str())
            .collect();
        assert_eq!(names, ["C", "A", "D"]);
        assert_eq!(featured_partners(&list, 1).len(), 1);
    }

    #[test]
    fn test_homepage() {
        let config = test_parse_config("");
        let images = ImageCache::default();
        let articles: Vec<Article> = (0..5)
            .map(|i| {
                let record: ArticleRecord =
                    serde_json::from_str(&format!(r#"{{"id": {i}, "title": "Artikel {i}"}}"#)).unwrap();
                Article::from_record(record, format!("artikel-{i}"), Author::default())
            })
            .collect();
        let ctx = RenderContext::new(&config, &images, &articles).unwrap();
        let list = partners(r#"[{"id": 1, "company_name": "A", "subscription_tier": "premium"}]"#);

        let page = render(&ctx, &articles, &list).unwrap();
        assert_eq!(page.path, "/");
        assert_eq!(page.html.matches("od-article-card").count(), 3);
        assert!(page.html.contains("Ausgewählte Partner"));
        assert!(page.html.contains("\"@type\":\"Organization\""));
        assert!(!page.html.contains("BreadcrumbList"));
    }
}
