//! Markup normalization for text extraction.
//!
//! # Scope
//!
//! This crate ties the pipeline together:
//! - **Tree building** - tokenize markup and build a pruned [`Element`] tree
//! - **Normalization** - collapse single-child chains, drop denied
//!   attributes and render the result as indented text
//!
//! # Example
//!
//! ```
//! let text = husk_core::normalize("<script>alert(1)</script><p>Real text</p>");
//! assert_eq!(text, "<p>\n\tReal text\n</p>");
//! ```

pub use husk_dom as dom;
pub use husk_html as html;

pub use husk_dom::{AttributeFilter, Element, RenderOptions};
pub use husk_html::{BuilderOptions, ParseIssue};

use husk_dom::render;
use husk_html::TreeBuilder;

/// Build the element tree for `markup` with default options.
///
/// The root is always present and named [`dom::DOCUMENT_TAG`].
#[must_use]
pub fn parse_document(markup: &str) -> Element {
    TreeBuilder::new().build(markup)
}

/// Normalize `markup` with default builder and render options.
#[must_use]
pub fn normalize(markup: &str) -> String {
    Normalizer::default().normalize(markup)
}

/// Normalize `markup` with explicit options.
#[must_use]
pub fn normalize_with(
    markup: &str,
    builder_options: &BuilderOptions,
    render_options: &RenderOptions,
) -> String {
    Normalizer::new(builder_options.clone(), render_options.clone()).normalize(markup)
}

/// A reusable normalization pipeline.
///
/// Keeps one [`TreeBuilder`] across documents. Each call to
/// [`normalize`](Self::normalize) starts from a clean builder, so results
/// never depend on earlier inputs.
#[derive(Debug, Default)]
pub struct Normalizer {
    builder: TreeBuilder,
    render_options: RenderOptions,
}

impl Normalizer {
    /// Create a pipeline with the given options.
    #[must_use]
    pub fn new(builder_options: BuilderOptions, render_options: RenderOptions) -> Self {
        Self {
            builder: TreeBuilder::with_options(builder_options),
            render_options,
        }
    }

    /// Build and render one document.
    pub fn normalize(&mut self, markup: &str) -> String {
        let root = self.builder.build(markup);
        let issues = self.builder.issues().len();
        if issues > 0 {
            log::debug!(target: "husk", "recovered from {issues} malformed constructs");
        }
        render(&root, &self.render_options)
    }

    /// Recovery actions taken while building the last document.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        self.builder.issues()
    }
}
