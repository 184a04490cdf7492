//! SEO metadata: head tags, Open Graph and JSON-LD.
//!
//! # Module Structure
//!
//! ```text
//! seo/
//! ├── meta.rs    # Head: title, description, robots, canonical, prev/next
//! ├── og.rs      # Open Graph + Twitter Card
//! └── jsonld.rs  # Article, FAQPage, BreadcrumbList, Organization, LocalBusiness
//! ```

pub mod jsonld;
pub mod meta;
pub mod og;

pub use meta::Head;
pub use og::{ArticleOg, OpenGraph};
