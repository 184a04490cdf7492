//! Article detail page `/blog/{slug}/`.

use super::card::article_card;
use super::{RenderContext, RenderedPage, time};
use crate::core::LinkKind;
use crate::dom::Element;
use crate::enhance::{self, FaqBlock, code_block, related, share_links, table_of_contents, trusted};
use crate::model::{Article, Author, Issue};
use crate::pipeline::{self, link};
use crate::seo::{ArticleOg, Head, OpenGraph, jsonld, meta};
use anyhow::Result;

/// A rendered article, or only the issues when it had to be excluded.
#[derive(Debug)]
pub struct ArticlePage {
    pub page: Option<RenderedPage>,
    pub issues: Vec<Issue>,
}

/// Render one article. `all` is the full published set for related articles.
///
/// A body the sanitizer cannot parse excludes the article; every other
/// problem only drops the affected block.
pub fn render(ctx: &RenderContext, article: &Article, all: &[Article]) -> Result<ArticlePage> {
    let config = ctx.config;
    let subject = format!("article:{}", article.slug);
    let mut issues = Vec::new();

    let content = match pipeline::process_content(&article.content, &ctx.hosts) {
        Ok(content) => content,
        Err(err) => {
            issues.push(Issue::new(&subject, format!("body dropped, page skipped: {err}")));
            return Ok(ArticlePage { page: None, issues });
        }
    };
    issues.extend(content.findings.iter().map(|f| Issue::new(&subject, f.to_string())));

    let path = article.path();
    let url = config.site.absolute(&path);
    let (crumbs, crumbs_ld) = ctx.breadcrumbs(&[
        ("Startseite", "/"),
        ("Blog", "/blog/"),
        (article.title.as_str(), path.as_str()),
    ]);

    let mut main = Element::new("article")
        .class("od-article")
        .child(crumbs)
        .child(
            Element::new("div").class("od-article__hero").child(
                Element::new("img")
                    .with("src", ctx.hero(&article.slug))
                    .with("alt", article.title.as_str())
                    .with("width", "1200")
                    .with("height", "630"),
            ),
        )
        .child(header(ctx, article));

    if let Some(toc) = table_of_contents(&content.headings, config.blog.toc_min_headings) {
        main = main.child(toc);
    }

    let mut body = Element::new("div")
        .class("od-article__content")
        .children(trusted(&content.html));
    for (i, viz) in article.visualizations.iter().enumerate() {
        match enhance::visualization(viz, i) {
            Ok(Some((figure, findings))) => {
                body = body.child(figure);
                issues.extend(findings.iter().map(|f| Issue::new(&subject, f.to_string())));
            }
            Ok(None) => issues.push(Issue::new(
                &subject,
                format!("visualization {} has no drawable svg, dropped", i + 1),
            )),
            Err(err) => issues.push(Issue::new(
                &subject,
                format!("visualization {} dropped: {err}", i + 1),
            )),
        }
    }
    for (i, example) in article.code_examples.iter().enumerate() {
        body = body.child(code_block(example, i, &article.slug));
    }
    main = main.child(body);

    let (faq, faq_issues) = FaqBlock::build(&article.faq, &ctx.hosts, &subject);
    issues.extend(faq_issues);
    if let Some(faq) = &faq {
        main = main.child(faq.to_element());
    }

    if !article.tags.is_empty() {
        main = main.child(
            Element::new("div")
                .class("od-article__tags")
                .children(article.tags.iter().map(|t| {
                    Element::new("span").class("od-tag").text(t.as_str()).into()
                })),
        );
    }
    main = main
        .child(share_links(&url, &article.title, article.summary()))
        .child(author_box(ctx, &article.author));

    let related = related(article, all, config.blog.related_limit);
    if !related.is_empty() {
        main = main.child(
            Element::new("section")
                .class("od-related")
                .child(Element::new("h2").class("od-related__title").text("Weitere Artikel"))
                .child(
                    Element::new("div")
                        .class("od-card-grid")
                        .children(related.into_iter().map(|a| article_card(ctx, a).into())),
                ),
        );
    }

    let image = ctx.social_image(&article.slug);
    let description = if article.summary().is_empty() {
        config.site.description.clone()
    } else {
        article.summary().to_string()
    };

    let mut og = OpenGraph::website(config);
    og.og_type = "article";
    og.title = article.title.clone();
    og.description = description.clone();
    og.url = url.clone();
    og.image = image.clone();
    og.image_alt = article.title.clone();
    og.article = Some(ArticleOg {
        published: article.published.map(|d| d.to_rfc3339()),
        modified: article.modified().map(|d| d.to_rfc3339()),
        author: article.author.name.clone(),
        section: article.category.clone(),
        tags: article.tags.clone(),
    });

    let mut head = Head::new(ctx.title(&article.title), description, url, og);
    head.keywords = meta::keywords(&article.keywords, &article.tags);
    head.json_ld.push(jsonld::article(article, config, &image, content.words));
    if let Some(faq) = &faq {
        head.json_ld.push(jsonld::faq_page(&faq.items));
    }
    head.json_ld.push(crumbs_ld);

    let html = ctx.skeleton.document(&head, &main, "od-page od-page--article")?;
    Ok(ArticlePage {
        page: Some(RenderedPage { path, html }),
        issues,
    })
}

fn header(ctx: &RenderContext, article: &Article) -> Element {
    let mut meta = Element::new("div").class("od-article__meta");
    if let Some(published) = article.published {
        meta = meta.child(time(published));
    }
    meta = meta
        .child(
            Element::new("span")
                .class("od-article__author")
                .text(format!("von {}", article.author.name)),
        )
        .child(
            Element::new("span")
                .class("od-article__reading-time")
                .text(format!("{} Min. Lesezeit", ctx.reading_minutes(&article.slug))),
        );

    Element::new("header")
        .class("od-article__header")
        .child(Element::new("span").class("od-article__category").text(article.category.as_str()))
        .child(Element::new("h1").class("od-article__title").text(article.title.as_str()))
        .child(meta)
}

fn author_box(ctx: &RenderContext, author: &Author) -> Element {
    let mut info = Element::new("div")
        .class("od-author-box__info")
        .child(Element::new("p").class("od-author-box__label").text("Über den Autor"))
        .child(Element::new("p").class("od-author-box__name").text(author.name.as_str()));

    if let Some(title) = author.title.as_deref().filter(|t| !t.trim().is_empty()) {
        info = info.child(Element::new("p").class("od-author-box__title").text(title));
    }
    if !author.bio.trim().is_empty() {
        info = info.child(Element::new("p").class("od-author-box__bio").text(author.bio.as_str()));
    }
    if !author.expertise.is_empty() {
        info = info.child(
            Element::new("div")
                .class("od-author-box__expertise")
                .children(author.expertise.iter().map(|e| {
                    Element::new("span").class("od-tag").text(e.as_str()).into()
                })),
        );
    }

    let social: Vec<_> = author
        .social_links
        .iter()
        .filter(|(_, href)| LinkKind::is_http(href))
        .map(|(platform, href)| {
            let mut a = Element::new("a")
                .with("href", href.as_str())
                .text(social_label(platform));
            link::apply(&mut a, ctx.hosts.scope(href));
            a.into()
        })
        .collect();
    if !social.is_empty() {
        info = info.child(Element::new("div").class("od-author-box__social").children(social));
    }

    Element::new("aside")
        .class("od-author-box")
        .child(
            Element::new("img")
                .class("od-author-box__avatar")
                .with("src", author.avatar.as_str())
                .with("alt", author.name.as_str())
                .with("loading", "lazy")
                .with("width", "80")
                .with("height", "80"),
        )
        .child(info)
}

fn social_label(platform: &str) -> &str {
    match platform {
        "linkedin" => "LinkedIn",
        "xing" => "XING",
        "twitter" => "Twitter",
        "github" => "GitHub",
        "website" => "Website",
        other => other,
    }
}
