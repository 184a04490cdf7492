//! Site building orchestration.
//!
//! Build phases:
//! - **Init** - Clean the output directory if requested
//! - **Load** - Snapshot (or sample data), author avatars, image cache
//! - **Render** - Articles and partner profiles in parallel, then listings,
//!   directory and homepage
//! - **Assets** - Embedded stylesheet/script plus the static assets directory
//! - **Generate** - RSS feed and sitemaps
//! - **Finalize** - Issue list and summary

use crate::{
    config::SiteConfig,
    data::{self, Snapshot, Source},
    embed, log,
    generator::{feed, sitemap},
    logger::ProgressLine,
    model::{ImageCache, Issue, author::DEFAULT_AVATAR},
    page::{self, RenderContext, RenderedPage},
    utils::plural_count,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Documents written (articles, profiles, listings, directory, home).
    pub pages: usize,
    pub articles: usize,
    pub partners: usize,
    /// Per-record problems. None of them stopped the build.
    pub issues: Vec<Issue>,
    pub output: PathBuf,
}

/// Build the entire site.
///
/// Pipeline: init -> load -> render -> assets -> generate -> finalize
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let output = &config.build.output;
    init_build(output, config.build.clean)?;

    // Load
    let snapshot = Snapshot::load(config)?;
    if snapshot.source == Source::Sample {
        log!("data"; "using bundled sample data");
    }
    let avatars = data::avatar_files(&config.build.assets);
    let dataset = data::prepare(snapshot, &avatars);
    let images = load_images(&config.build.image_cache);

    // Render
    let ctx = RenderContext::new(config, &images, &dataset.articles)?;
    let progress = ProgressLine::new(
        "render",
        &[
            ("articles", dataset.articles.len()),
            ("partners", dataset.partners.len()),
        ],
    );
    let mut issues = dataset.issues;

    let (article_result, partner_result) = rayon::join(
        || render_articles(&ctx, &dataset.articles, output, &progress),
        || render_partners(&ctx, &dataset.partners, output, &progress),
    );
    progress.finish();

    let (articles, article_issues) = article_result?;
    issues.extend(article_issues);
    let partners = partner_result?;

    let mut pages = articles + partners;
    for page in page::listing::render(&ctx, &dataset.articles)? {
        write_page(&page, output)?;
        pages += 1;
    }
    write_page(&page::directory::render(&ctx, &dataset.partners)?, output)?;
    write_page(&page::home::render(&ctx, &dataset.articles, &dataset.partners)?, output)?;
    pages += 2;

    // Assets
    write_embedded_assets(output)?;
    copy_static_assets(&config.build.assets, output)?;
    write_placeholders(config, output)?;

    // Generate
    let (feed_result, sitemap_result) = rayon::join(
        || feed::build_feed(config, &dataset.articles),
        || sitemap::build_sitemaps(config, &dataset.articles, &dataset.partners, &images),
    );
    feed_result?;
    sitemap_result?;

    let report = BuildReport {
        pages,
        articles,
        partners,
        issues,
        output: output.clone(),
    };
    finalize_build(&report);
    Ok(report)
}

/// Create the output directory, removing it first if `clean`.
fn init_build(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
        crate::debug!("build"; "removed {}", output.display());
    }
    fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))
}

/// Unreadable cache: every article falls back to the default image.
fn load_images(path: &Path) -> ImageCache {
    match ImageCache::load(path) {
        Ok(cache) => cache,
        Err(e) => {
            log!("warn"; "ignoring image cache: {:#}", e);
            ImageCache::default()
        }
    }
}

/// Returns the number of pages written and the issues of all articles.
fn render_articles(
    ctx: &RenderContext,
    articles: &[crate::model::Article],
    output: &Path,
    progress: &ProgressLine,
) -> Result<(usize, Vec<Issue>)> {
    let rendered: Vec<page::article::ArticlePage> = articles
        .par_iter()
        .map(|article| {
            let result = page::article::render(ctx, article, articles)?;
            if let Some(page) = &result.page {
                write_page(page, output)?;
            }
            progress.inc("articles");
            Ok(result)
        })
        .collect::<Result<_>>()?;

    let written = rendered.iter().filter(|r| r.page.is_some()).count();
    let issues = rendered.into_iter().flat_map(|r| r.issues).collect();
    Ok((written, issues))
}

fn render_partners(
    ctx: &RenderContext,
    partners: &[crate::model::Partner],
    output: &Path,
    progress: &ProgressLine,
) -> Result<usize> {
    partners.par_iter().try_for_each(|partner| {
        let page = page::partner::render(ctx, partner)
            .with_context(|| format!("partner `{}`", partner.slug))?;
        write_page(&page, output)?;
        progress.inc("partners");
        Ok::<_, anyhow::Error>(())
    })?;
    Ok(partners.len())
}

fn write_page(page: &RenderedPage, output: &Path) -> Result<()> {
    let file = page.write(output)?;
    crate::debug!("page"; "{} -> {}", page.path, file.display());
    Ok(())
}

/// Stylesheet and script compiled into the binary.
fn write_embedded_assets(output: &Path) -> Result<()> {
    for asset in &embed::ASSETS {
        crate::generator::write_output(output, asset.path, asset.content)?;
    }
    Ok(())
}

/// Default hero and avatar, unless the static assets already provide them.
///
/// Only site-root `.svg` paths are written; any other configured image is
/// expected to come from the assets directory.
fn write_placeholders(config: &SiteConfig, output: &Path) -> Result<()> {
    let placeholders = [
        (config.site.default_image.as_str(), embed::HERO_PLACEHOLDER),
        (DEFAULT_AVATAR, embed::AVATAR_PLACEHOLDER),
    ];
    for (url, content) in placeholders {
        let Some(relative) = url.strip_prefix('/').filter(|r| r.ends_with(".svg")) else {
            crate::debug!("assets"; "no placeholder for {}", url);
            continue;
        };
        if output.join(relative).is_file() {
            continue;
        }
        crate::generator::write_output(output, relative, content)?;
    }
    Ok(())
}

/// Mirror the static assets directory into `output/assets`.
fn copy_static_assets(assets: &Path, output: &Path) -> Result<()> {
    if !assets.is_dir() {
        crate::debug!("assets"; "no static assets at {}", assets.display());
        return Ok(());
    }
    let target_root = output.join("assets");

    let files: Vec<PathBuf> = jwalk::WalkDir::new(assets)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .collect();

    files.par_iter().try_for_each(|source| {
        let relative = source
            .strip_prefix(assets)
            .map_err(|_| anyhow!("{} is outside {}", source.display(), assets.display()))?;
        let target = target_root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(source, &target)
            .with_context(|| format!("Failed to copy {}", source.display()))?;
        Ok::<_, anyhow::Error>(())
    })?;

    log!("assets"; "copied {}", plural_count(files.len(), "file"));
    Ok(())
}

/// Print issues and the summary line.
fn finalize_build(report: &BuildReport) {
    for issue in &report.issues {
        log!("issue"; "{}", issue);
    }
    let issues = if report.issues.is_empty() {
        String::new()
    } else {
        format!(", {}", plural_count(report.issues.len(), "issue"))
    };
    log!(
        "build";
        "{} ({}, {}){} -> {}",
        plural_count(report.pages, "page"),
        plural_count(report.articles, "article"),
        plural_count(report.partners, "partner"),
        issues,
        report.output.display()
    );
}
