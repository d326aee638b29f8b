//! Anchor slug generation.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Generate an anchor-safe slug from heading text.
///
/// Lowercase, whitespace and underscores become dashes, everything else
/// non-alphanumeric is dropped, dash runs collapse. All-punctuation text
/// falls back to `"section"`.
pub fn slugify(text: &str) -> String {
    static DASH_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").expect("valid regex"));

    let raw: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();

    let collapsed = DASH_RUN.replace_all(&raw, "-");
    let slug = collapsed.trim_matches('-');

    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// Per-document anchor uniqueness state.
///
/// Deterministic given the same call sequence: building twice over the same
/// headings yields identical anchors.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the anchor for one heading.
    ///
    /// An existing identifier is returned verbatim and registered so later
    /// generated slugs avoid it; collisions among pre-existing identifiers
    /// are not repaired. Generated slugs deduplicate as `slug`, `slug-1`,
    /// `slug-2`, in call order.
    pub fn resolve(&mut self, existing: Option<&str>, text: &str) -> String {
        if let Some(id) = existing {
            self.seen.entry(id.to_string()).or_insert(0);
            return id.to_string();
        }

        let base = slugify(text);
        if !self.seen.contains_key(&base) {
            self.seen.insert(base.clone(), 0);
            return base;
        }

        let mut n = self.seen.get(&base).copied().unwrap_or(0);
        loop {
            n += 1;
            let candidate = format!("{base}-{n}");
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(base.clone(), n);
                self.seen.insert(candidate.clone(), 0);
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_common_patterns() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("API_Reference"), "api-reference");
        assert_eq!(slugify("FAQ & Tips"), "faq-tips");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify("Config (v2)"), "config-v2");
    }

    #[test]
    fn slugify_empty_falls_back() {
        assert_eq!(slugify("!!!"), "section");
        assert_eq!(slugify(""), "section");
    }

    #[test]
    fn duplicate_texts_deduplicate_in_order() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.resolve(None, "Usage"), "usage");
        assert_eq!(slugger.resolve(None, "Usage"), "usage-1");
        assert_eq!(slugger.resolve(None, "Usage"), "usage-2");
    }

    #[test]
    fn existing_id_preferred_verbatim_and_registered() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.resolve(Some("Intro"), "Introduction"), "Intro");
        // A later generated slug avoids the registered existing id.
        assert_eq!(slugger.resolve(Some("setup"), "Setup"), "setup");
        assert_eq!(slugger.resolve(None, "Setup"), "setup-1");
    }

    #[test]
    fn generated_slug_skips_taken_suffix() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.resolve(Some("usage-1"), "ignored"), "usage-1");
        assert_eq!(slugger.resolve(None, "Usage"), "usage");
        // "usage-1" is taken by the existing id, so the counter skips it.
        assert_eq!(slugger.resolve(None, "Usage"), "usage-2");
    }
}
