//! Normalizing serializer.
//!
//! Rendering rules, applied depth-first:
//!
//! 1. Attributes are passed through the [`AttributeFilter`].
//! 2. A leaf with empty text renders to nothing, tag included. A leaf with
//!    text renders as an opening tag, the text one level deeper, and a
//!    closing tag.
//! 3. An element with exactly one child renders exactly as that child.
//!    Chains like `<div><div><p>text</p></div></div>` reduce to the `<p>`.
//!    The collapsed wrappers' own text and attributes are discarded:
//!    `<p>Hello <b>world</b></p>` renders as the `<b>` leaf alone.
//! 4. An element with two or more children renders as an opening tag, each
//!    child one level deeper, and a closing tag. A child that renders to
//!    nothing leaves an empty line.
//!
//! Text is emitted as captured; only indentation is added in front of each
//! line. The walk keeps its own stack, so nesting depth is bounded only by
//! memory.

use std::fmt;

use crate::{Attribute, AttributeFilter, Element};

/// Serializer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Attributes to drop.
    pub filter: AttributeFilter,
    /// Indentation unit for one nesting level.
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            filter: AttributeFilter::default(),
            indent: String::from("\t"),
        }
    }
}

impl RenderOptions {
    /// Replace the attribute filter.
    #[must_use]
    pub fn with_filter(mut self, filter: AttributeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// Render `element` to normalized text.
///
/// Returns the empty string when the tree holds no text at all. Text held by
/// an element that collapses into its only child is not rendered, e.g.
/// `<p>Hello <b>world</b></p>` yields only the `<b>` leaf.
#[must_use]
pub fn render(element: &Element, options: &RenderOptions) -> String {
    let mut renderer = Renderer {
        options,
        out: String::new(),
        started: false,
    };
    renderer.tree(element);
    renderer.out
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    out: String,
    started: bool,
}

/// A container whose opening tag has been written.
struct Frame<'t> {
    element: &'t Element,
    depth: usize,
    next_child: usize,
}

impl Renderer<'_> {
    fn tree(&mut self, root: &Element) {
        let mut stack = Vec::new();
        self.enter(root, 0, &mut stack);

        while let Some(frame) = stack.last_mut() {
            let element = frame.element;
            let depth = frame.depth;
            if let Some(child) = element.children.get(frame.next_child) {
                frame.next_child += 1;
                let before = self.out.len();
                self.enter(child, depth + 1, &mut stack);
                if self.out.len() == before {
                    self.line(depth + 1, "");
                }
            } else {
                let _ = stack.pop();
                self.line(depth, &close_tag(element));
            }
        }
    }

    /// Write a leaf in full, or open a container and push its frame.
    fn enter<'t>(&mut self, element: &'t Element, depth: usize, stack: &mut Vec<Frame<'t>>) {
        let element = element.collapsed();

        if element.is_leaf() {
            if element.text.is_empty() {
                return;
            }
            let open = self.open_tag(element);
            self.line(depth, &open);
            for text_line in element.text.lines() {
                self.line(depth + 1, text_line);
            }
            self.line(depth, &close_tag(element));
            return;
        }

        let open = self.open_tag(element);
        self.line(depth, &open);
        stack.push(Frame {
            element,
            depth,
            next_child: 0,
        });
    }

    /// Append one line. Empty lines carry no indentation.
    fn line(&mut self, depth: usize, content: &str) {
        if self.started {
            self.out.push('\n');
        }
        self.started = true;
        if !content.is_empty() {
            for _ in 0..depth {
                self.out.push_str(&self.options.indent);
            }
            self.out.push_str(content);
        }
    }

    fn open_tag(&self, element: &Element) -> String {
        let mut tag = format!("<{}", element.tag_name);
        for attr in element
            .attributes
            .iter()
            .filter(|attr| self.options.filter.allows(&attr.name))
        {
            tag.push(' ');
            tag.push_str(&attr.to_string());
        }
        tag.push('>');
        tag
    }
}

fn close_tag(element: &Element) -> String {
    format!("</{}>", element.tag_name)
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}=\"{value}\"", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Renders with [`RenderOptions::default`].
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, &RenderOptions::default()))
    }
}
