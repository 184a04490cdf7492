//! Social sharing links.
//!
//! Plain links only, no third-party scripts. Every value placed into a share
//! URL is percent-encoded as a URI component.

use super::trusted;
use crate::dom::Element;
use crate::pipeline::link::{EXTERNAL_CLASS, EXTERNAL_REL};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters a URI component keeps literal.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

struct Platform {
    name: &'static str,
    icon: &'static str,
    color: &'static str,
    svg: &'static str,
}

const LINKEDIN: Platform = Platform {
    name: "LinkedIn",
    icon: "linkedin",
    color: "#0077B5",
    svg: r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M19 0h-14c-2.761 0-5 2.239-5 5v14c0 2.761 2.239 5 5 5h14c2.762 0 5-2.239 5-5v-14c0-2.761-2.238-5-5-5zm-11 19h-3v-11h3v11zm-1.5-12.268c-.966 0-1.75-.79-1.75-1.764s.784-1.764 1.75-1.764 1.75.79 1.75 1.764-.783 1.764-1.75 1.764zm13.5 12.268h-3v-5.604c0-3.368-4-3.113-4 0v5.604h-3v-11h3v1.765c1.396-2.586 7-2.777 7 2.476v6.759z"/></svg>"#,
};

const XING: Platform = Platform {
    name: "XING",
    icon: "xing",
    color: "#006567",
    svg: r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M18.188 0c-.517 0-.741.325-.927.66 0 0-7.455 13.224-7.702 13.657.015.024 4.919 9.023 4.919 9.023.17.308.436.66.967.66h3.454c.211 0 .375-.078.463-.22.089-.151.089-.346-.009-.536l-4.879-8.916c-.004-.006-.004-.016 0-.022l7.614-13.5c.098-.193.098-.41.009-.561-.089-.142-.252-.22-.463-.22h-3.446zm-13.871 6.547c-.211 0-.375.078-.463.22-.089.151-.089.346.009.536l2.821 4.918c.004.006.004.016 0 .022l-3.699 6.1c-.098.193-.098.41-.009.561.089.142.252.22.463.22h3.446c.517 0 .741-.325.927-.66 0 0 3.598-5.938 3.852-6.371-.015-.024-2.836-4.929-2.836-4.929-.17-.308-.436-.66-.967-.66h-3.454z"/></svg>"#,
};

const TWITTER: Platform = Platform {
    name: "Twitter",
    icon: "twitter",
    color: "#1DA1F2",
    svg: r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M23.953 4.57a10 10 0 01-2.825.775 4.958 4.958 0 002.163-2.723c-.951.555-2.005.959-3.127 1.184a4.92 4.92 0 00-8.384 4.482C7.69 8.095 4.067 6.13 1.64 3.162a4.822 4.822 0 00-.666 2.475c0 1.71.87 3.213 2.188 4.096a4.904 4.904 0 01-2.228-.616v.06a4.923 4.923 0 003.946 4.827 4.996 4.996 0 01-2.212.085 4.936 4.936 0 004.604 3.417 9.867 9.867 0 01-6.102 2.105c-.39 0-.779-.023-1.17-.067a13.995 13.995 0 007.557 2.209c9.053 0 13.998-7.496 13.998-13.985 0-.21 0-.42-.015-.63A9.935 9.935 0 0024 4.59z"/></svg>"#,
};

const EMAIL: Platform = Platform {
    name: "E-Mail",
    icon: "email",
    color: "#666",
    svg: r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M20 4H4c-1.1 0-1.99.9-1.99 2L2 18c0 1.1.9 2 2 2h16c1.1 0 2-.9 2-2V6c0-1.1-.9-2-2-2zm0 4l-8 5-8-5V6l8 5 8-5v2z"/></svg>"#,
};

/// Percent-encode a URI component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Share targets for an absolute page URL, in display order.
pub fn share_targets(url: &str, title: &str, excerpt: &str) -> Vec<(&'static str, String)> {
    let (url, title, excerpt) = (
        encode_component(url),
        encode_component(title),
        encode_component(excerpt),
    );
    vec![
        (
            LINKEDIN.icon,
            format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
        ),
        (XING.icon, format!("https://www.xing.com/spi/shares/new?url={url}")),
        (
            TWITTER.icon,
            format!("https://twitter.com/intent/tweet?url={url}&text={title}"),
        ),
        (
            EMAIL.icon,
            format!("mailto:?subject={title}&body={excerpt}%0A%0A{url}"),
        ),
    ]
}

/// The sharing block for one article.
pub fn share_links(url: &str, title: &str, excerpt: &str) -> Element {
    let platforms = [&LINKEDIN, &XING, &TWITTER, &EMAIL];
    let buttons = platforms
        .into_iter()
        .zip(share_targets(url, title, excerpt))
        .map(|(platform, (_, href))| button(platform, href).into());

    Element::new("div")
        .class("od-social-sharing")
        .child(Element::new("h3").class("od-social-sharing__title").text("Artikel teilen"))
        .child(Element::new("div").class("od-social-sharing__buttons").children(buttons))
}

fn button(platform: &Platform, href: String) -> Element {
    let external = href.starts_with("https://");
    let mut class = format!(
        "od-social-sharing__button od-social-sharing__button--{}",
        platform.icon
    );
    if external {
        class.push(' ');
        class.push_str(EXTERNAL_CLASS);
    }

    let mut link = Element::new("a").with("href", href).class(class);
    if external {
        link = link.with("target", "_blank").with("rel", EXTERNAL_REL);
    }
    link.with("aria-label", format!("Auf {} teilen", platform.name))
        .with("style", format!("--button-color: {}", platform.color))
        .child(
            Element::new("span")
                .class("od-social-sharing__icon")
                .children(trusted(platform.svg)),
        )
        .child(Element::new("span").class("od-social-sharing__label").text(platform.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("Grüße (2025)!"), "Gr%C3%BC%C3%9Fe%20(2025)!");
        assert_eq!(
            encode_component("https://x.de/blog/a/"),
            "https%3A%2F%2Fx.de%2Fblog%2Fa%2F"
        );
    }

    #[test]
    fn test_targets() {
        let targets = share_targets("https://x.de/a/", "Odoo & DSGVO", "Kurz");
        let names: Vec<_> = targets.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["linkedin", "xing", "twitter", "email"]);
        assert_eq!(
            targets[2].1,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fx.de%2Fa%2F&text=Odoo%20%26%20DSGVO"
        );
        assert_eq!(
            targets[3].1,
            "mailto:?subject=Odoo%20%26%20DSGVO&body=Kurz%0A%0Ahttps%3A%2F%2Fx.de%2Fa%2F"
        );
    }

    #[test]
    fn test_block_markup() {
        let html = share_links("https://x.de/a/", "<T>", "e").to_html();
        assert_eq!(html.matches("class=\"od-social-sharing__button ").count(), 4);
        assert_eq!(html.matches("target=\"_blank\"").count(), 3);
        assert!(html.contains("aria-label=\"Auf XING teilen\""));
        assert!(html.contains("--button-color: #0077B5"));
        assert!(!html.contains("<T>"));
    }
}
