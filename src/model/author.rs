//! Author personas and their resolution onto articles.

use super::{nullable, non_empty, string_or_number};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const AVATAR_DIR: &str = "/assets/images/authors";
pub const DEFAULT_AVATAR: &str = "/assets/images/authors/default-avatar.svg";
pub const DEFAULT_NAME: &str = "Odoo Experte";

/// Row of `author-personas.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorPersona {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub title: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub bio: String,
    #[serde(deserialize_with = "nullable")]
    pub expertise: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub social_links: BTreeMap<String, String>,
    pub avatar_url: Option<String>,
    pub local_avatar_path: Option<String>,
}

/// Author sub-record embedded in an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorRef {
    #[serde(deserialize_with = "string_or_number")]
    pub persona_id: String,
    pub name: Option<String>,
    pub author_name: Option<String>,
    pub author_title: Option<String>,
    pub bio: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub expertise: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub social_links: BTreeMap<String, String>,
    pub avatar_url: Option<String>,
    pub local_avatar_path: Option<String>,
}

/// Fully resolved author, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Option<String>,
    pub name: String,
    pub title: Option<String>,
    pub bio: String,
    pub expertise: Vec<String>,
    pub social_links: BTreeMap<String, String>,
    /// Site path or URL of the avatar image.
    pub avatar: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            id: None,
            name: DEFAULT_NAME.to_string(),
            title: None,
            bio: String::new(),
            expertise: Vec::new(),
            social_links: BTreeMap::new(),
            avatar: DEFAULT_AVATAR.to_string(),
        }
    }
}

/// Persona lookup plus the avatar files present in the static assets.
pub struct AuthorDirectory<'a> {
    personas: FxHashMap<&'a str, &'a AuthorPersona>,
    avatars: &'a FxHashSet<String>,
}

impl<'a> AuthorDirectory<'a> {
    /// `avatars` holds file names found in the author avatar directory.
    pub fn new(personas: &'a [AuthorPersona], avatars: &'a FxHashSet<String>) -> Self {
        Self {
            personas: personas
                .iter()
                .filter(|p| !p.id.is_empty())
                .map(|p| (p.id.as_str(), p))
                .collect(),
            avatars,
        }
    }

    /// Merge an inline author with its persona into a new value.
    ///
    /// Inline fields win when present; the persona fills the gaps.
    pub fn resolve(&self, inline: Option<&AuthorRef>) -> Author {
        let Some(inline) = inline else {
            return Author::default();
        };
        let persona = self.personas.get(inline.persona_id.as_str()).copied();

        let name = non_empty(inline.author_name.as_deref())
            .or_else(|| non_empty(inline.name.as_deref()))
            .or_else(|| persona.and_then(|p| non_empty(Some(p.name.as_str()))))
            .unwrap_or(DEFAULT_NAME)
            .to_string();

        let title = non_empty(inline.author_title.as_deref())
            .or_else(|| persona.and_then(|p| non_empty(p.title.as_deref())))
            .map(str::to_string);

        let bio = non_empty(inline.bio.as_deref())
            .or_else(|| persona.and_then(|p| non_empty(Some(p.bio.as_str()))))
            .unwrap_or_default()
            .to_string();

        let expertise = if inline.expertise.is_empty() {
            persona.map(|p| p.expertise.clone()).unwrap_or_default()
        } else {
            inline.expertise.clone()
        };

        let mut social_links = persona.map(|p| p.social_links.clone()).unwrap_or_default();
        social_links.extend(inline.social_links.clone());
        social_links.retain(|_, url| !url.trim().is_empty());

        let id = non_empty(Some(inline.persona_id.as_str()))
            .or_else(|| persona.map(|p| p.id.as_str()))
            .map(str::to_string);

        let avatar = self.avatar(id.as_deref(), inline, persona);

        Author {
            id,
            name,
            title,
            bio,
            expertise,
            social_links,
            avatar,
        }
    }

    /// Local `{id}-avatar.jpg`, then `local_avatar_path`, then `avatar_url`,
    /// then the default avatar.
    fn avatar(&self, id: Option<&str>, inline: &AuthorRef, persona: Option<&AuthorPersona>) -> String {
        if let Some(id) = id {
            let file = format!("{id}-avatar.jpg");
            if self.avatars.contains(&file) {
                return format!("{AVATAR_DIR}/{file}");
            }
        }
        non_empty(inline.local_avatar_path.as_deref())
            .or_else(|| persona.and_then(|p| non_empty(p.local_avatar_path.as_deref())))
            .or_else(|| non_empty(inline.avatar_url.as_deref()))
            .or_else(|| persona.and_then(|p| non_empty(p.avatar_url.as_deref())))
            .unwrap_or(DEFAULT_AVATAR)
            .to_string()
    }
}
