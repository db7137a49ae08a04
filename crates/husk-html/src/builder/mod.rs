//! Tree construction.
//!
//! A deliberately small subset of HTML tree construction: one stack of open
//! elements, no insertion modes, no implied end tags. An end tag closes the
//! innermost open element only if the names match; anything else is ignored.

/// The tree builder.
pub mod core;
/// Recovery records.
pub mod issue;
/// Builder configuration.
pub mod options;

pub use self::core::TreeBuilder;
pub use issue::{IssueKind, ParseIssue};
pub use options::{
    BuilderOptions, DEFAULT_IGNORED_TAGS, INLINE_FORMATTING_ELEMENTS, VOID_ELEMENTS,
    is_inline_formatting_element, is_void_element,
};
