//! Site-level generators.
//!
//! - **Pagination**: page math and nav for the blog listing
//! - **Sitemap**: `sitemap.xml` and the image sitemap `sitemap-images.xml`
//! - **Feed**: RSS 2.0 at `blog/feed.xml`
//!
//! Generators read the prepared dataset only; they never re-read pages.

pub mod feed;
pub mod pagination;
pub mod sitemap;

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Minify XML content if enabled.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    if enabled {
        let minified = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("");
        Cow::Owned(minified)
    } else {
        Cow::Borrowed(content)
    }
}

/// Write a generated file below the output directory, creating parents.
pub fn write_output(output: &Path, relative: &str, content: &str) -> Result<()> {
    let path = output.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minify_xml() {
        let xml = "<?xml version=\"1.0\"?>\n<root>\n\n  <item>Hello</item>\n</root>";
        assert_eq!(
            minify_xml(xml, true),
            "<?xml version=\"1.0\"?><root><item>Hello</item></root>"
        );
        assert_eq!(minify_xml(xml, false), xml);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(
            escape_xml("<a href=\"x\">Müller & 'Söhne'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Müller &amp; &apos;Söhne&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_write_output_creates_parents() {
        let dir = TempDir::new().unwrap();
        write_output(dir.path(), "blog/feed.xml", "<rss/>").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("blog/feed.xml")).unwrap(), "<rss/>");
    }
}
