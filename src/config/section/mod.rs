//! Configuration section definitions.
//!
//! Each module corresponds to a section in `directory.toml`:
//!
//! | Module     | TOML Section   | Purpose                                |
//! |------------|----------------|----------------------------------------|
//! | `site`     | `[site]`       | Site identity, URL, internal hostnames |
//! | `build`    | `[build]`      | Snapshot, output and cache paths       |
//! | `blog`     | `[blog]`       | Listing, feed and enhancer limits      |
//! | `validate` | `[validate]`   | Post-build validators                  |

mod blog;
mod build;
mod site;
mod validate;

pub use blog::BlogConfig;
pub use build::BuildSectionConfig;
pub use site::SiteSectionConfig;
pub use validate::{CheckToggle, ValidateConfig, ValidateLevel};
