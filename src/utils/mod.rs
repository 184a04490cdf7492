//! Shared helpers without domain knowledge.

pub mod date;
pub mod hash;
pub mod html;
pub mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
