//! Company-name slug normalization.
//!
//! Demo URLs embed a slug derived from the prospect's company name, and the
//! directory keys company records by it. Normalization must therefore be
//! deterministic and idempotent: the same name always produces the same
//! slug, and re-normalizing an existing slug is a no-op.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Business-entity suffix tokens dropped as whole words before slugging.
const SUFFIX_TOKENS: [&str; 5] = ["llc", "inc", "corp", "ltd", "co"];

/// A cleaned slug shorter than this falls back to [`fallback`].
const MIN_SLUG_LEN: usize = 3;

/// Maximum length of the alphanumeric fallback slug.
const FALLBACK_LEN: usize = 10;

/// Last-resort slug for names with no usable characters at all.
const EMPTY_NAME_SLUG: &str = "demo";

/// A normalized, URL-safe identifier derived from a company name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Normalizes a company name into a slug.
    ///
    /// Lower-cases the name, drops common business-entity suffixes
    /// (`llc`, `inc`, `corp`, `ltd`, `co`) as whole words, removes
    /// everything outside `[a-z0-9\s-]`, and collapses whitespace and
    /// hyphen runs into single hyphens. Names that clean down to fewer
    /// than three characters fall back to an alphanumeric-only truncation
    /// of the original, and the result is never empty.
    #[must_use]
    pub fn normalize(company_name: &str) -> Self {
        let lowered = company_name.to_lowercase();

        let kept_words: Vec<&str> = lowered
            .split_whitespace()
            .filter(|word| {
                let bare = word.trim_matches(|c: char| !c.is_ascii_alphanumeric());
                !SUFFIX_TOKENS.contains(&bare)
            })
            .collect();

        let mut slug = String::with_capacity(lowered.len());
        for word in kept_words {
            for c in word.chars() {
                if c.is_ascii_alphanumeric() {
                    slug.push(c);
                } else if c == '-' && !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }

        if slug.len() >= MIN_SLUG_LEN {
            return Self(slug);
        }

        Self(fallback(&lowered))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

/// Best-effort alphanumeric truncation of a name that produced no usable
/// slug. Punctuation-only names still get a non-empty result.
fn fallback(lowered_name: &str) -> String {
    let truncated: String = lowered_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(FALLBACK_LEN)
        .collect();

    if truncated.is_empty() {
        EMPTY_NAME_SLUG.to_string()
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_business_suffix() {
        assert_eq!(Slug::normalize("Acme Solar LLC").as_str(), "acme-solar");
        assert_eq!(Slug::normalize("Acme Solar, Inc.").as_str(), "acme-solar");
    }

    #[test]
    fn suffix_tokens_only_match_whole_words() {
        // "Company" contains "co" but must not be stripped.
        assert_eq!(
            Slug::normalize("Test Solar Company").as_str(),
            "test-solar-company"
        );
        assert_eq!(Slug::normalize("Incline Village Solar").as_str(), "incline-village-solar");
    }

    #[test]
    fn collapses_multi_word_names() {
        assert_eq!(
            Slug::normalize("  Bright   Future  Energy  ").as_str(),
            "bright-future-energy"
        );
    }

    #[test]
    fn drops_punctuation() {
        assert_eq!(Slug::normalize("O'Brien & Sons!").as_str(), "obrien-sons");
    }

    #[test]
    fn punctuation_only_name_falls_back() {
        let slug = Slug::normalize("!!!");
        assert!(!slug.as_str().is_empty());
        assert_eq!(slug.as_str(), "demo");
    }

    #[test]
    fn empty_name_falls_back() {
        assert!(!Slug::normalize("").as_str().is_empty());
    }

    #[test]
    fn short_name_falls_back_to_alphanumeric() {
        assert_eq!(Slug::normalize("A1").as_str(), "a1");
    }

    #[test]
    fn long_names_are_tolerated() {
        let name = "Extremely Verbose Renewable Energy Generation and \
                    Distribution Holdings of Greater Northumberland";
        let slug = Slug::normalize(name);
        assert!(!slug.as_str().is_empty());
        assert!(slug.as_str().chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn deterministic() {
        assert_eq!(Slug::normalize("Acme Solar LLC"), Slug::normalize("Acme Solar LLC"));
    }

    #[test]
    fn idempotent_on_normalized_input() {
        for name in ["Acme Solar LLC", "Test Solar Company", "!!!", "A1", ""] {
            let once = Slug::normalize(name);
            let twice = Slug::normalize(once.as_str());
            assert_eq!(once, twice, "re-normalizing {once} changed it");
        }
    }

    #[test]
    fn serde_is_transparent() {
        let slug = Slug::normalize("Acme Solar LLC");
        let json = serde_json::to_string(&slug).expect("serialize");
        assert_eq!(json, "\"acme-solar\"");
    }
}
