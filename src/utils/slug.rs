//! Slug normalization for file paths and heading anchors.
//!
//! `slugify` is pure: lowercase, German digraph transliteration
//! (`ä → ae`, `ö → oe`, `ü → ue`, `ß → ss`), every run of characters outside
//! `[a-z0-9]` collapses to one hyphen, leading/trailing hyphens are trimmed.

use rustc_hash::FxHashMap;

/// Normalize arbitrary text into a URL-safe slug.
///
/// ```ignore
/// assert_eq!(slugify("Müller & Söhne GmbH"), "mueller-soehne-gmbh");
/// ```
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let mapped = match c {
            'ä' => "ae",
            'ö' => "oe",
            'ü' => "ue",
            'ß' => "ss",
            'a'..='z' | '0'..='9' => {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
                continue;
            }
            _ => {
                pending_hyphen = true;
                continue;
            }
        };
        if pending_hyphen && !out.is_empty() {
            out.push('-');
        }
        pending_hyphen = false;
        out.push_str(mapped);
    }

    out
}

/// Hands out unique slugs in request order.
///
/// The first request for a base gets it unchanged, later ones get `-2`, `-3`, ...
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: FxHashMap<String, usize>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a unique slug derived from `base`.
    ///
    /// Returns the slug and whether it had to be suffixed.
    pub fn claim(&mut self, base: &str) -> (String, bool) {
        let count = self.seen.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            return (base.to_string(), false);
        }

        let mut n = *count;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(candidate.clone(), 1);
                return (candidate, true);
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_slug_shaped(s: &str) -> bool {
        s.is_empty()
            || (!s.starts_with('-')
                && !s.ends_with('-')
                && !s.contains("--")
                && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'))
    }

    #[test]
    fn test_slugify_company_name() {
        assert_eq!(slugify("Müller & Söhne GmbH"), "mueller-soehne-gmbh");
    }

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify("DSGVO für Odoo"), "dsgvo-fuer-odoo");
        assert_eq!(slugify("Straße der Einheit"), "strasse-der-einheit");
        assert_eq!(slugify("ÜBER UNS"), "ueber-uns");
    }

    #[test]
    fn test_slugify_trims_and_collapses() {
        assert_eq!(slugify("  --Hello,   World!--  "), "hello-world");
        assert_eq!(slugify("Odoo 17 vs. 18"), "odoo-17-vs-18");
    }

    #[test]
    fn test_slugify_empty_and_symbols() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("€ & §"), "");
    }

    #[test]
    fn test_slugify_other_diacritics_become_separators() {
        assert_eq!(slugify("Café Crème"), "caf-cr-me");
    }

    #[test]
    fn test_slugify_idempotent_and_shaped() {
        let inputs = [
            "Müller & Söhne GmbH",
            "ERP-Einführung in 5 Schritten",
            "  a  ",
            "Ä-Ö-Ü-ß",
            "über---straße",
            "日本語 text",
            "",
        ];
        for input in inputs {
            let once = slugify(input);
            assert!(is_slug_shaped(&once), "{input:?} -> {once:?}");
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_registry_suffixes_duplicates() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.claim("odoo"), ("odoo".to_string(), false));
        assert_eq!(registry.claim("odoo"), ("odoo-2".to_string(), true));
        assert_eq!(registry.claim("odoo"), ("odoo-3".to_string(), true));
    }

    #[test]
    fn test_registry_avoids_existing_suffix() {
        let mut registry = SlugRegistry::new();
        registry.claim("odoo-2");
        registry.claim("odoo");
        assert_eq!(registry.claim("odoo").0, "odoo-3");
    }
}
