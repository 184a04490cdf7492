//! Table of contents from heading anchors.
//!
//! The nested lists mirror heading levels: deeper headings open a nested
//! `<ol>` inside the current item, shallower ones close levels again, and all
//! remaining levels are closed at the end. Levels are clamped to 2..=4 and
//! the first heading sets the base depth of 2.

use crate::dom::Element;
use crate::pipeline::Heading;

const TITLE: &str = "Inhaltsverzeichnis";
const BASE_LEVEL: u8 = 2;
const MAX_LEVEL: u8 = 4;

/// Build the TOC, or `None` when fewer than `min_headings` qualify.
pub fn table_of_contents(headings: &[Heading], min_headings: usize) -> Option<Element> {
    if headings.len() < min_headings.max(1) {
        return None;
    }

    // One entry per open list: the <ol> and its currently open <li>
    let mut stack: Vec<(Element, Option<Element>)> = vec![(list(false), None)];

    for heading in headings {
        let level = heading.level.clamp(BASE_LEVEL, MAX_LEVEL);

        while depth(&stack) < level {
            stack.push((list(true), None));
        }
        while depth(&stack) > level {
            close_level(&mut stack);
        }

        if let Some((ol, open)) = stack.last_mut() {
            if let Some(item) = open.take() {
                ol.children.push(item.into());
            }
            *open = Some(entry(heading));
        }
    }

    while stack.len() > 1 {
        close_level(&mut stack);
    }
    let (mut root, open) = stack.pop()?;
    if let Some(item) = open {
        root.children.push(item.into());
    }

    Some(
        Element::new("nav")
            .class("od-toc")
            .with("aria-label", TITLE)
            .child(Element::new("h3").class("od-toc__title").text(TITLE))
            .child(root),
    )
}

#[allow(clippy::cast_possible_truncation)] // at most three levels
fn depth(stack: &[(Element, Option<Element>)]) -> u8 {
    BASE_LEVEL + stack.len() as u8 - 1
}

/// Close the innermost list and nest it into its parent's open item.
fn close_level(stack: &mut Vec<(Element, Option<Element>)>) {
    let Some((mut ol, open)) = stack.pop() else {
        return;
    };
    if let Some(item) = open {
        ol.children.push(item.into());
    }
    if let Some((_, parent_open)) = stack.last_mut() {
        parent_open
            .get_or_insert_with(|| Element::new("li").class("od-toc__item"))
            .children
            .push(ol.into());
    }
}

fn list(nested: bool) -> Element {
    let class = if nested {
        "od-toc__list od-toc__list--nested"
    } else {
        "od-toc__list"
    };
    Element::new("ol").class(class)
}

fn entry(heading: &Heading) -> Element {
    Element::new("li").class("od-toc__item").child(
        Element::new("a")
            .with("href", format!("#{}", heading.id))
            .class("od-toc__link od-internal-link")
            .text(heading.text.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(level: u8, id: &str) -> Heading {
        Heading {
            level,
            id: id.into(),
            text: id.to_uppercase(),
        }
    }

    fn render(headings: &[Heading]) -> String {
        table_of_contents(headings, 3).unwrap().to_html()
    }

    fn balanced(html: &str) -> bool {
        html.matches("<ol").count() == html.matches("</ol>").count()
            && html.matches("<li").count() == html.matches("</li>").count()
    }

    #[test]
    fn test_below_threshold_is_none() {
        assert!(table_of_contents(&[h(2, "a"), h(2, "b")], 3).is_none());
        assert!(table_of_contents(&[], 3).is_none());
    }

    #[test]
    fn test_flat() {
        let html = render(&[h(2, "a"), h(2, "b"), h(2, "c")]);
        assert_eq!(html.matches("od-toc__item").count(), 3);
        assert!(!html.contains("--nested"));
        assert!(html.starts_with("<nav class=\"od-toc\" aria-label=\"Inhaltsverzeichnis\">"));
    }

    #[test]
    fn test_alternating_levels_balance() {
        let html = render(&[h(2, "a"), h(3, "b"), h(2, "c"), h(3, "d"), h(2, "e")]);
        assert!(balanced(&html), "{html}");
        assert_eq!(html.matches("od-toc__list--nested").count(), 2);
    }

    #[test]
    fn test_nested_list_inside_item() {
        let html = render(&[h(2, "a"), h(3, "b"), h(4, "c")]);
        assert_eq!(
            html,
            "<nav class=\"od-toc\" aria-label=\"Inhaltsverzeichnis\">\
             <h3 class=\"od-toc__title\">Inhaltsverzeichnis</h3>\
             <ol class=\"od-toc__list\"><li class=\"od-toc__item\">\
             <a href=\"#a\" class=\"od-toc__link od-internal-link\">A</a>\
             <ol class=\"od-toc__list od-toc__list--nested\"><li class=\"od-toc__item\">\
             <a href=\"#b\" class=\"od-toc__link od-internal-link\">B</a>\
             <ol class=\"od-toc__list od-toc__list--nested\"><li class=\"od-toc__item\">\
             <a href=\"#c\" class=\"od-toc__link od-internal-link\">C</a>\
             </li></ol></li></ol></li></ol></nav>"
        );
    }

    #[test]
    fn test_starts_deep_and_jumps_back() {
        let html = render(&[h(4, "a"), h(2, "b"), h(3, "c"), h(2, "d")]);
        assert!(balanced(&html), "{html}");
        assert_eq!(html.matches("<a ").count(), 4);
    }

    #[test]
    fn test_text_escaped() {
        let mut heading = h(2, "x");
        heading.text = "<b>Fett</b> & mehr".into();
        let html = render(&[heading, h(2, "y"), h(2, "z")]);
        assert!(html.contains("&lt;b&gt;Fett&lt;/b&gt; &amp; mehr"));
    }
}
