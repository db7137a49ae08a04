//! Attribute denylist.
//!
//! Presentation, navigation and tracking attributes carry no text worth
//! extracting. The filter removes them at render time; the tree itself keeps
//! every attribute so callers walking the [`Element`](crate::Element) tree
//! still see the full markup.

use std::collections::HashSet;

use thiserror::Error;

/// Attribute names stripped by [`AttributeFilter::default`].
pub const DEFAULT_DENYLIST: &[&str] = &[
    "data-min-width",
    "rel",
    "data-aspect-ratio",
    "src",
    "height",
    "aria-describedby",
    "data-max-width",
    "decoding",
    "data-testid",
    "sizes",
    "srcset",
    "target",
    "aria-expanded",
    "viewbox",
    "role",
    "aria-label",
    "data-source-id",
    "as",
    "aria-controls",
    "data-url",
    "aria-hidden",
    "style",
    "charset",
    "href",
    "fill-rule",
    "type",
    "fill",
    "loading",
    "aria-labelledby",
    "itemprop",
    "uri",
    "xmlns",
    "aria-haspopup",
    "class",
    "id",
    "width",
];

/// Rejected denylist pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The pattern was the empty string.
    #[error("attribute pattern is empty")]
    Empty,
    /// A `*` appeared somewhere other than the last position.
    #[error("wildcard must be the last character of attribute pattern `{0}`")]
    MisplacedWildcard(String),
    /// The pattern contained uppercase letters and could never match.
    #[error("attribute pattern `{0}` is not lowercase; attribute names are lowercased while tokenizing")]
    NotLowercase(String),
    /// The pattern contained a character that cannot occur in an attribute name.
    #[error("attribute pattern `{pattern}` contains invalid character {character:?}")]
    InvalidCharacter {
        /// The offending pattern.
        pattern: String,
        /// The first invalid character.
        character: char,
    },
}

/// A set of attribute names to drop when rendering.
///
/// Patterns are either exact names (`class`) or prefixes ending in a single
/// trailing wildcard (`aria-*`). A lone `*` drops every attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    exact: HashSet<String>,
    prefixes: Vec<String>,
}

impl Default for AttributeFilter {
    fn default() -> Self {
        Self {
            exact: DEFAULT_DENYLIST.iter().map(ToString::to_string).collect(),
            prefixes: Vec::new(),
        }
    }
}

impl AttributeFilter {
    /// A filter that keeps every attribute.
    #[must_use]
    pub fn allow_all() -> Self {
        Self {
            exact: HashSet::new(),
            prefixes: Vec::new(),
        }
    }

    /// Build a filter from a list of patterns.
    ///
    /// # Errors
    ///
    /// Returns the [`FilterError`] of the first invalid pattern.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .try_fold(Self::allow_all(), |filter, pattern| filter.deny(pattern.as_ref()))
    }

    /// Add one pattern to the filter.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] if the pattern is empty, has a wildcard
    /// anywhere but at the end, contains uppercase letters, or contains
    /// whitespace, quotes, `/`, `=`, `<` or `>`.
    pub fn deny(mut self, pattern: &str) -> Result<Self, FilterError> {
        if pattern.is_empty() {
            return Err(FilterError::Empty);
        }

        let (stem, is_prefix) = pattern
            .strip_suffix('*')
            .map_or((pattern, false), |stem| (stem, true));

        if stem.contains('*') {
            return Err(FilterError::MisplacedWildcard(pattern.to_string()));
        }
        if stem.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(FilterError::NotLowercase(pattern.to_string()));
        }
        if let Some(character) = stem.chars().find(|&c| is_forbidden_in_name(c)) {
            return Err(FilterError::InvalidCharacter {
                pattern: pattern.to_string(),
                character,
            });
        }

        if is_prefix {
            if !self.prefixes.iter().any(|existing| existing == stem) {
                self.prefixes.push(stem.to_string());
            }
        } else {
            let _ = self.exact.insert(stem.to_string());
        }
        Ok(self)
    }

    /// True if an attribute with this name is dropped.
    #[must_use]
    pub fn denies(&self, name: &str) -> bool {
        self.exact.contains(name) || self.prefixes.iter().any(|prefix| name.starts_with(prefix))
    }

    /// True if an attribute with this name is rendered.
    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        !self.denies(name)
    }

    /// True if the filter keeps every attribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefixes.is_empty()
    }
}

/// Characters the tokenizer never puts in an attribute name.
const fn is_forbidden_in_name(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\x0C' | '\r' | '"' | '\'' | '/' | '=' | '<' | '>'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_denies_known_noise() {
        let filter = AttributeFilter::default();
        for name in ["class", "id", "style", "href", "src", "aria-label", "data-testid", "role"] {
            assert!(filter.denies(name), "{name} should be denied");
        }
        assert!(filter.allows("lang"));
        assert!(filter.allows("title"));
        assert!(filter.allows("alt"));
    }

    #[test]
    fn default_is_exact_match_only() {
        let filter = AttributeFilter::default();
        assert!(filter.allows("aria-live"));
        assert!(filter.allows("data-foo"));
    }

    #[test]
    fn prefix_pattern_matches_family() {
        let filter = AttributeFilter::from_patterns(["aria-*", "data-*"]).unwrap();
        assert!(filter.denies("aria-live"));
        assert!(filter.denies("data-"));
        assert!(filter.allows("aria"));
        assert!(filter.allows("lang"));
    }

    #[test]
    fn lone_wildcard_denies_everything() {
        let filter = AttributeFilter::from_patterns(["*"]).unwrap();
        assert!(filter.denies("lang"));
        assert!(filter.denies(""));
    }

    #[test]
    fn rejects_invalid_patterns() {
        assert_eq!(AttributeFilter::from_patterns([""]), Err(FilterError::Empty));
        assert_eq!(
            AttributeFilter::from_patterns(["da*ta"]),
            Err(FilterError::MisplacedWildcard("da*ta".to_string()))
        );
        assert_eq!(
            AttributeFilter::from_patterns(["**"]),
            Err(FilterError::MisplacedWildcard("**".to_string()))
        );
        assert_eq!(
            AttributeFilter::from_patterns(["Class"]),
            Err(FilterError::NotLowercase("Class".to_string()))
        );
        assert_eq!(
            AttributeFilter::from_patterns(["a b"]),
            Err(FilterError::InvalidCharacter {
                pattern: "a b".to_string(),
                character: ' ',
            })
        );
    }

    #[test]
    fn allow_all_is_empty() {
        assert!(AttributeFilter::allow_all().is_empty());
        assert!(!AttributeFilter::default().is_empty());
    }
}
