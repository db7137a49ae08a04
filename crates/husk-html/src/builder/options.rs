use std::collections::BTreeSet;

/// Elements dropped together with their whole subtree unless configured otherwise.
pub const DEFAULT_IGNORED_TAGS: &[&str] = &["script", "style"];

/// Elements that never have content. Only consulted when
/// [`BuilderOptions::close_void_elements`] is set.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Phrasing elements that [`BuilderOptions::fold_inline`] folds into the
/// surrounding block.
pub const INLINE_FORMATTING_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "i", "kbd", "mark", "q",
    "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// Returns true for elements listed in [`VOID_ELEMENTS`].
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// Returns true for elements listed in [`INLINE_FORMATTING_ELEMENTS`].
#[must_use]
pub fn is_inline_formatting_element(tag_name: &str) -> bool {
    INLINE_FORMATTING_ELEMENTS.contains(&tag_name)
}

/// Tree builder configuration.
///
/// ```
/// use husk_html::BuilderOptions;
///
/// let options = BuilderOptions::default()
///     .ignore("noscript")
///     .with_fold_inline(true);
/// assert!(options.is_ignored("noscript"));
/// assert!(options.is_ignored("script"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Tag names whose elements (and everything inside them) never reach the
    /// tree. Stored lowercased.
    pub ignored_tags: BTreeSet<String>,
    /// Close [`VOID_ELEMENTS`] right after their start tag, so that content
    /// following `<br>` or `<img>` is not nested inside them.
    pub close_void_elements: bool,
    /// Treat [`INLINE_FORMATTING_ELEMENTS`] as transparent: their text and
    /// children go to the nearest enclosing block, and text runs of that
    /// block are joined with a space instead of overwriting each other.
    pub fold_inline: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            ignored_tags: DEFAULT_IGNORED_TAGS.iter().map(ToString::to_string).collect(),
            close_void_elements: false,
            fold_inline: false,
        }
    }
}

impl BuilderOptions {
    /// Replace the ignore set.
    #[must_use]
    pub fn with_ignored_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_tags = tags
            .into_iter()
            .map(|tag| tag.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Add one tag to the ignore set.
    #[must_use]
    pub fn ignore(mut self, tag: &str) -> Self {
        let _ = self.ignored_tags.insert(tag.to_ascii_lowercase());
        self
    }

    /// See [`BuilderOptions::close_void_elements`].
    #[must_use]
    pub const fn with_close_void_elements(mut self, enabled: bool) -> Self {
        self.close_void_elements = enabled;
        self
    }

    /// See [`BuilderOptions::fold_inline`].
    #[must_use]
    pub const fn with_fold_inline(mut self, enabled: bool) -> Self {
        self.fold_inline = enabled;
        self
    }

    /// True if elements named `tag_name` are dropped.
    #[must_use]
    pub fn is_ignored(&self, tag_name: &str) -> bool {
        self.ignored_tags.contains(tag_name)
    }
}
