//! Derived content blocks around an article body.
//!
//! Each enhancer is independent and returns `None`/empty when its input is
//! missing, so a page simply omits the section. Blocks are built as `dom`
//! elements: every text value is escaped by the serializer, and only
//! sanitized markup or built-in icons enter as parsed nodes.

pub mod code;
pub mod faq;
pub mod related;
pub mod share;
pub mod toc;
pub mod visual;

pub use code::code_block;
pub use faq::{FaqBlock, FaqItem};
pub use related::related;
pub use share::share_links;
pub use toc::table_of_contents;
pub use visual::visualization;

use crate::dom::{Fragment, Node};

/// Parse markup that is already safe into nodes.
///
/// Only used for sanitized output and compile-time constants, which always
/// parse; a failure yields no nodes rather than unescaped text.
pub(crate) fn trusted(html: &str) -> Vec<Node> {
    Fragment::parse(html).map(|f| f.nodes).unwrap_or_default()
}

/// Minutes to read `words` at `per_minute`, at least one.
pub fn reading_time(words: usize, per_minute: usize) -> usize {
    words.div_ceil(per_minute.max(1)).max(1)
}
