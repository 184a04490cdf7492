//! Partner directory `/partner/`.

use super::card::partner_card;
use super::{RenderContext, RenderedPage};
use crate::dom::Element;
use crate::model::Partner;
use crate::seo::{Head, OpenGraph};
use anyhow::Result;

pub const ROOT: &str = "/partner/";
const HEADING: &str = "Odoo Partner in Deutschland";
const INTRO: &str = "Finden Sie zertifizierte Odoo Partner für Einführung, Anpassung und Betrieb Ihres ERP-Systems.";

/// Partners are expected in directory order.
pub fn render(ctx: &RenderContext, partners: &[Partner]) -> Result<RenderedPage> {
    let config = ctx.config;
    let url = config.site.absolute(ROOT);
    let (crumbs, crumbs_ld) = ctx.breadcrumbs(&[("Startseite", "/"), ("Partner", ROOT)]);

    let mut main = Element::new("section")
        .class("od-partner-directory")
        .child(crumbs)
        .child(
            Element::new("header")
                .class("od-page-header")
                .child(Element::new("h1").class("od-page-header__title").text(HEADING))
                .child(Element::new("p").class("od-page-header__intro").text(INTRO))
                .child(
                    Element::new("p")
                        .class("od-page-header__count")
                        .text(format!("{} Partner", partners.len())),
                ),
        );

    main = if partners.is_empty() {
        main.child(
            Element::new("p")
                .class("od-empty")
                .text("Noch keine Partner eingetragen."),
        )
    } else {
        main.child(
            Element::new("div")
                .class("od-card-grid od-partner-grid")
                .children(partners.iter().map(|p| partner_card(p).into())),
        )
    };

    let mut og = OpenGraph::website(config);
    og.title = format!("{HEADING} | {}", config.site.name);
    og.description = INTRO.to_string();
    og.url = url.clone();

    let mut head = Head::new(ctx.title(HEADING), INTRO, url, og);
    head.keywords = ["Odoo Partner", "Odoo Deutschland", "ERP Beratung"]
        .map(String::from)
        .to_vec();
    head.json_ld.push(crumbs_ld);

    let html = ctx.skeleton.document(&head, &main, "od-page od-page--directory")?;
    Ok(RenderedPage {
        path: ROOT.to_string(),
        html,
    })
}
