//! Post-build validation of the output directory.
//!
//! Both validators are read-only passes over emitted files. They fill one
//! `ValidationReport`; whether errors fail the command is decided here from
//! `validate.level`.

mod links;
mod markup;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::cli::ValidateCheck;
use crate::config::{SiteConfig, ValidateLevel};
use crate::core::SiteHosts;
use crate::dom::Fragment;
use crate::log;
use crate::utils::plural_count;

use report::{FileFindings, ValidationReport};

/// Validate the generated site.
pub fn run(config: &SiteConfig, check: ValidateCheck) -> Result<()> {
    let output = &config.build.output;
    if !output.is_dir() {
        bail!("output directory `{}` not found, run `build` first", output.display());
    }

    let validate = &config.validate;
    let check_links = validate.links.enable && matches!(check, ValidateCheck::Links | ValidateCheck::All);
    let check_markup = validate.markup.enable && matches!(check, ValidateCheck::Markup | ValidateCheck::All);
    if !check_links && !check_markup {
        log!("validate"; "no checks enabled");
        return Ok(());
    }

    let html_files = collect_files(output, "html");
    let svg_files = if check_markup {
        collect_files(output, "svg")
    } else {
        Vec::new()
    };
    log!(
        "validate";
        "validating {} and {}",
        plural_count(html_files.len(), "page"),
        plural_count(svg_files.len(), "svg file")
    );

    let hosts = SiteHosts::from_config(&config.site);
    let options = Options {
        output,
        hosts: &hosts,
        links: check_links,
        markup: check_markup,
        svg_max_bytes: validate.svg_max_bytes,
    };
    let report = validate_output(&options, &html_files, &svg_files);

    report.print();
    log!("validate"; "{}", report);

    if report.has_errors() {
        match validate.level {
            ValidateLevel::Error => bail!(
                "validation failed: {}",
                plural_count(report.error_count(), "error")
            ),
            ValidateLevel::Warn => {
                log!("warn"; "errors reported as warnings (validate.level = warn)");
            }
        }
    }
    Ok(())
}

struct Options<'a> {
    output: &'a Path,
    hosts: &'a SiteHosts,
    links: bool,
    markup: bool,
    svg_max_bytes: usize,
}

/// Run the enabled checks over every file, in parallel per file.
fn validate_output(options: &Options, html_files: &[PathBuf], svg_files: &[PathBuf]) -> ValidationReport {
    let html = html_files.par_iter().map(|file| {
        crate::debug!("validate"; "checking {}", display_path(options.output, file));
        (file, check_html(options, file))
    });
    let svg = svg_files.par_iter().map(|file| {
        crate::debug!("validate"; "checking {}", display_path(options.output, file));
        (file, check_svg(options, file))
    });
    let results: Vec<(&PathBuf, FileFindings)> = html.chain(svg).collect();

    let mut report = ValidationReport::default();
    for (file, findings) in results {
        if !findings.is_empty() {
            report.add_file(display_path(options.output, file), findings);
        }
    }
    report
}

fn check_html(options: &Options, file: &Path) -> FileFindings {
    let mut findings = FileFindings::default();
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            findings.error("file", format!("unreadable: {e}"));
            return findings;
        }
    };
    let fragment = match Fragment::parse(strip_doctype(&content)) {
        Ok(fragment) => fragment,
        Err(e) => {
            findings.error("document", format!("unparseable: {e}"));
            return findings;
        }
    };

    if options.links {
        let relative = file.strip_prefix(options.output).unwrap_or(file);
        let found = links::check_document(&fragment, relative, options.output, options.hosts);
        findings.errors.extend(found.errors);
        findings.warnings.extend(found.warnings);
    }
    if options.markup {
        let found = markup::check_inline(&fragment, options.svg_max_bytes);
        findings.errors.extend(found.errors);
        findings.warnings.extend(found.warnings);
    }
    findings
}

fn check_svg(options: &Options, file: &Path) -> FileFindings {
    match fs::read_to_string(file) {
        Ok(content) => markup::check_svg_file(&content, options.svg_max_bytes),
        Err(e) => {
            let mut findings = FileFindings::default();
            findings.error("file", format!("unreadable: {e}"));
            findings
        }
    }
}

/// Files with the given extension below `root`, sorted.
fn collect_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = jwalk::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(extension)))
        .collect();
    files.sort();
    files
}

/// The document type declaration is not part of the tree.
fn strip_doctype(html: &str) -> &str {
    let trimmed = html.trim_start();
    if trimmed
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"))
        && let Some(end) = trimmed.find('>')
    {
        return &trimmed[end + 1..];
    }
    html
}

fn display_path(output: &Path, file: &Path) -> String {
    file.strip_prefix(output)
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build::build_site;
    use crate::config::test_config_at;
    use tempfile::TempDir;

    fn options<'a>(output: &'a Path, hosts: &'a SiteHosts) -> Options<'a> {
        Options {
            output,
            hosts,
            links: true,
            markup: true,
            svg_max_bytes: 51200,
        }
    }

    #[test]
    fn test_strip_doctype() {
        assert_eq!(strip_doctype("<!DOCTYPE html>\n<html></html>"), "\n<html></html>");
        assert_eq!(strip_doctype("<p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_generated_site_passes() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path(), "[build]\nfallback = true");
        build_site(&config).unwrap();

        let output = &config.build.output;
        let hosts = SiteHosts::from_config(&config.site);
        let report = validate_output(
            &options(output, &hosts),
            &collect_files(output, "html"),
            &collect_files(output, "svg"),
        );
        assert!(!report.has_errors(), "{:?}", report.errors);
        assert!(run(&config, ValidateCheck::All).is_ok());
    }

    #[test]
    fn test_broken_output_fails() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("dist");
        fs::create_dir_all(output.join("blog")).unwrap();
        fs::write(
            output.join("index.html"),
            r#"<!DOCTYPE html><html><body><a href="/blog/missing/" class="od-internal-link">x</a></body></html>"#,
        )
        .unwrap();
        fs::write(output.join("blog/chart.svg"), r#"<svg viewBox="0 0 1 1"></svg>"#).unwrap();

        let config = test_config_at(dir.path(), "");
        assert!(run(&config, ValidateCheck::All).is_err());

        let config = test_config_at(dir.path(), "[validate]\nlevel = \"warn\"");
        assert!(run(&config, ValidateCheck::All).is_ok());

        let hosts = SiteHosts::from_config(&config.site);
        let report = validate_output(
            &options(&output, &hosts),
            &collect_files(&output, "html"),
            &collect_files(&output, "svg"),
        );
        let files: Vec<&String> = report.errors.keys().collect();
        assert_eq!(files, ["blog/chart.svg", "index.html"]);
    }
}
