//! Listing pagination.
//!
//! Page 1 lives at the listing root, page `n` at `{root}page/{n}/`. The nav
//! shows previous/next, a window of five page numbers around the current
//! page, and always the first and last page with `…` over any gap.

use crate::dom::Element;
use crate::pipeline::link::INTERNAL_CLASS;

const WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Page(usize),
    Ellipsis,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based.
    pub current: usize,
    pub total: usize,
}

impl Pagination {
    /// Number of pages for `items` at `per_page`; an empty listing still has one.
    pub fn page_count(items: usize, per_page: usize) -> usize {
        items.div_ceil(per_page.max(1)).max(1)
    }

    /// Every page of a listing, in order.
    pub fn pages(items: usize, per_page: usize) -> impl Iterator<Item = Self> {
        let total = Self::page_count(items, per_page);
        (1..=total).map(move |current| Self { current, total })
    }

    /// Item index range of this page.
    pub fn range(&self, items: usize, per_page: usize) -> std::ops::Range<usize> {
        let start = ((self.current - 1) * per_page).min(items);
        start..(start + per_page).min(items)
    }

    pub fn prev(&self) -> Option<usize> {
        (self.current > 1).then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<usize> {
        (self.current < self.total).then(|| self.current + 1)
    }

    /// Numbers to show: first, window around current, last.
    pub fn window(&self) -> Vec<NavItem> {
        let half = WINDOW / 2;
        let mut start = self.current.saturating_sub(half).max(1);
        let end = (start + WINDOW - 1).min(self.total);
        start = end.saturating_sub(WINDOW - 1).max(1);

        let mut items = Vec::with_capacity(WINDOW + 4);
        if start > 1 {
            items.push(NavItem::Page(1));
            if start > 2 {
                items.push(NavItem::Ellipsis);
            }
        }
        items.extend((start..=end).map(NavItem::Page));
        if end < self.total {
            if end + 1 < self.total {
                items.push(NavItem::Ellipsis);
            }
            items.push(NavItem::Page(self.total));
        }
        items
    }

    /// Nav element, or `None` for a single page.
    pub fn nav(&self, root: &str) -> Option<Element> {
        if self.total <= 1 {
            return None;
        }

        let mut nav = Element::new("nav")
            .class("od-pagination")
            .with("aria-label", "Seitennavigation");

        if let Some(prev) = self.prev() {
            nav = nav.child(
                link(&page_path(root, prev), "← Zurück")
                    .class(format!("od-pagination__link od-pagination__prev {INTERNAL_CLASS}"))
                    .with("rel", "prev"),
            );
        }
        for item in self.window() {
            nav = nav.child(match item {
                NavItem::Page(n) if n == self.current => Element::new("span")
                    .class("od-pagination__current")
                    .with("aria-current", "page")
                    .text(n.to_string()),
                NavItem::Page(n) => link(&page_path(root, n), &n.to_string())
                    .class(format!("od-pagination__link {INTERNAL_CLASS}")),
                NavItem::Ellipsis => Element::new("span")
                    .class("od-pagination__ellipsis")
                    .text("…"),
            });
        }
        if let Some(next) = self.next() {
            nav = nav.child(
                link(&page_path(root, next), "Weiter →")
                    .class(format!("od-pagination__link od-pagination__next {INTERNAL_CLASS}"))
                    .with("rel", "next"),
            );
        }
        Some(nav)
    }
}

/// Site path of page `n` below `root` (which ends in `/`).
pub fn page_path(root: &str, n: usize) -> String {
    if n <= 1 {
        root.to_string()
    } else {
        format!("{root}page/{n}/")
    }
}

fn link(href: &str, text: &str) -> Element {
    Element::new("a").with("href", href).text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_and_ranges() {
        assert_eq!(Pagination::page_count(25, 12), 3);
        assert_eq!(Pagination::page_count(24, 12), 2);
        assert_eq!(Pagination::page_count(0, 12), 1);

        let sizes: Vec<usize> = Pagination::pages(25, 12).map(|p| p.range(25, 12).len()).collect();
        assert_eq!(sizes, [12, 12, 1]);
    }

    #[test]
    fn test_page_paths() {
        assert_eq!(page_path("/blog/", 1), "/blog/");
        assert_eq!(page_path("/blog/", 3), "/blog/page/3/");
    }

    #[test]
    fn test_window_small() {
        let p = Pagination { current: 2, total: 3 };
        assert_eq!(p.window(), [NavItem::Page(1), NavItem::Page(2), NavItem::Page(3)]);
    }

    #[test]
    fn test_window_with_gaps() {
        let p = Pagination { current: 10, total: 20 };
        assert_eq!(
            p.window(),
            [
                NavItem::Page(1),
                NavItem::Ellipsis,
                NavItem::Page(8),
                NavItem::Page(9),
                NavItem::Page(10),
                NavItem::Page(11),
                NavItem::Page(12),
                NavItem::Ellipsis,
                NavItem::Page(20),
            ]
        );

        let first = Pagination { current: 1, total: 20 };
        assert_eq!(first.window()[..5], (1..=5).map(NavItem::Page).collect::<Vec<_>>()[..]);
        assert_eq!(first.window().last(), Some(&NavItem::Page(20)));

        let last = Pagination { current: 20, total: 20 };
        assert_eq!(last.window()[0], NavItem::Page(1));
        assert_eq!(last.window()[2], NavItem::Page(16));
    }

    #[test]
    fn test_every_page_reaches_first_and_last() {
        for total in 1..=12 {
            for current in 1..=total {
                let window = Pagination { current, total }.window();
                assert_eq!(window.first(), Some(&NavItem::Page(1)));
                assert_eq!(window.last(), Some(&NavItem::Page(total)));
                assert!(window.contains(&NavItem::Page(current)));
            }
        }
    }

    #[test]
    fn test_nav_markup() {
        assert!(Pagination { current: 1, total: 1 }.nav("/blog/").is_none());

        let html = Pagination { current: 2, total: 3 }.nav("/blog/").unwrap().to_html();
        assert!(html.contains("href=\"/blog/\""));
        assert!(html.contains("← Zurück"));
        assert!(html.contains("href=\"/blog/page/3/\""));
        assert!(html.contains("Weiter →"));
        assert!(html.contains("<span class=\"od-pagination__current\" aria-current=\"page\">2</span>"));
    }
}
