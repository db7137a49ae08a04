//! Element tree for the husk normalizer.
//!
//! # Design
//!
//! Every [`Element`] owns its children directly. There are no parent
//! pointers and no shared nodes: the tree is built once by the tree builder,
//! walked once by the serializer, then dropped. The synthetic root is named
//! [`DOCUMENT_TAG`].
//!
//! # Modules
//!
//! - [`filter`] - the attribute denylist applied at render time
//! - [`render`] - the normalizing serializer (singleton-child collapse)

/// Attribute denylist.
pub mod filter;
/// Normalizing serializer.
pub mod render;

pub use filter::{AttributeFilter, DEFAULT_DENYLIST, FilterError};
pub use render::{RenderOptions, render};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tag name of the synthetic root element returned by every parse.
pub const DOCUMENT_TAG: &str = "document";

/// A single `name[=value]` pair on a start tag.
///
/// The value is optional so that a bare attribute (`disabled`) stays
/// distinguishable from an explicitly empty one (`alt=""`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// Attribute name, lowercased by the tokenizer.
    pub name: String,
    /// Decoded value, `None` when the attribute had no `=`.
    pub value: Option<String>,
}

impl Attribute {
    /// Create an attribute with a value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a boolean-style attribute without a value.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// A node of the element tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    /// Element type, e.g. `div`. The root uses [`DOCUMENT_TAG`].
    pub tag_name: String,
    /// Attributes in source order. Duplicates are kept.
    pub attributes: Vec<Attribute>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Trimmed text found directly inside this element; empty if none.
    ///
    /// Only meaningful for leaves: the serializer ignores it on containers.
    pub text: String,
}

/// Tears the tree down iteratively so deeply nested documents cannot
/// exhaust the stack.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut element) = pending.pop() {
            pending.append(&mut element.children);
        }
    }
}

impl Element {
    /// Create an element with no children and no text.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes,
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Create an empty root element.
    #[must_use]
    pub fn document() -> Self {
        Self::new(DOCUMENT_TAG, Vec::new())
    }

    /// Convenience constructor for a leaf carrying text.
    #[must_use]
    pub fn with_text(tag_name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(tag_name, Vec::new());
        element.text = text.into();
        element
    }

    /// Append `child` as the last child.
    pub fn append_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// True if the element has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First attribute with the given name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Pre-order traversal of this element and all of its descendants.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Texts of the non-empty leaves, in document order.
    ///
    /// This is exactly the set of strings the serializer emits as content.
    pub fn leaf_texts(&self) -> impl Iterator<Item = &str> {
        self.descendants()
            .filter(|element| element.is_leaf() && !element.text.is_empty())
            .map(|element| element.text.as_str())
    }

    /// Follow single-child links down to the first element that is either a
    /// leaf or has two or more children.
    #[must_use]
    pub fn collapsed(&self) -> &Self {
        let mut current = self;
        while let [only] = current.children.as_slice() {
            current = only;
        }
        current
    }
}

/// Iterator returned by [`Element::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}
