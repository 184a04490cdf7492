//! Paginated blog listing `/blog/`, `/blog/page/N/`.

use super::card::article_card;
use super::{RenderContext, RenderedPage};
use crate::dom::Element;
use crate::generator::pagination::{Pagination, page_path};
use crate::model::Article;
use crate::seo::{Head, OpenGraph};
use anyhow::Result;

pub const ROOT: &str = "/blog/";
const HEADING: &str = "Odoo Blog";
const INTRO: &str = "Fachartikel rund um Odoo, ERP-Einführung, DSGVO und Digitalisierung im Mittelstand.";

/// One document per listing page. Articles are expected newest first.
pub fn render(ctx: &RenderContext, articles: &[Article]) -> Result<Vec<RenderedPage>> {
    let per_page = ctx.config.blog.per_page;
    Pagination::pages(articles.len(), per_page)
        .map(|page| render_page(ctx, &articles[page.range(articles.len(), per_page)], page))
        .collect()
}

fn render_page(ctx: &RenderContext, articles: &[Article], page: Pagination) -> Result<RenderedPage> {
    let config = ctx.config;
    let path = page_path(ROOT, page.current);
    let url = config.site.absolute(&path);

    let title = if page.current == 1 {
        "Blog".to_string()
    } else {
        format!("Blog - Seite {} von {}", page.current, page.total)
    };

    let (crumbs, crumbs_ld) = ctx.breadcrumbs(&[("Startseite", "/"), ("Blog", ROOT)]);

    let mut main = Element::new("section")
        .class("od-blog-listing")
        .child(crumbs)
        .child(
            Element::new("header")
                .class("od-page-header")
                .child(Element::new("h1").class("od-page-header__title").text(HEADING))
                .child(Element::new("p").class("od-page-header__intro").text(INTRO)),
        );

    main = if articles.is_empty() {
        main.child(
            Element::new("p")
                .class("od-empty")
                .text("Noch keine Artikel veröffentlicht."),
        )
    } else {
        main.child(
            Element::new("div")
                .class("od-card-grid")
                .children(articles.iter().map(|a| article_card(ctx, a).into())),
        )
    };
    if let Some(nav) = page.nav(ROOT) {
        main = main.child(nav);
    }

    let mut og = OpenGraph::website(config);
    og.title = format!("{HEADING} | {}", config.site.name);
    og.description = INTRO.to_string();
    og.url = url.clone();

    let mut head = Head::new(ctx.title(&title), INTRO, url, og);
    head.prev = page.prev().map(|n| config.site.absolute(&page_path(ROOT, n)));
    head.next = page.next().map(|n| config.site.absolute(&page_path(ROOT, n)));
    head.json_ld.push(crumbs_ld);

    let html = ctx.skeleton.document(&head, &main, "od-page od-page--blog")?;
    Ok(RenderedPage { path, html })
}
