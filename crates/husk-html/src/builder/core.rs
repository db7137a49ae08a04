use husk_common::warning::clear_warnings;
use husk_dom::{Attribute, Element};

use super::issue::{IssueKind, ParseIssue};
use super::options::{BuilderOptions, is_inline_formatting_element, is_void_element};
use crate::tokenizer::{HTMLTokenizer, Token, TokenSink};

/// How an open element relates to the tree once it is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Appended to its parent when popped.
    Attached,
    /// In the ignore set: dropped with everything nested inside it.
    Ignored,
    /// Folded inline element: its text and children belong to the enclosing block.
    Transparent,
}

#[derive(Debug)]
struct OpenElement {
    element: Element,
    placement: Placement,
}

/// Builds an [`Element`] tree from a token stream.
///
/// Elements under construction live on the stack of open elements and are
/// appended to their parent when they are popped, so the tree never holds a
/// reference into itself.
///
/// A builder can be reused: [`build`](Self::build) resets it first. When
/// driven as a [`TokenSink`] by some other event source, call
/// [`reset`](Self::reset) before the first event and
/// [`finish`](Self::finish) after the last.
///
/// ```
/// use husk_html::TreeBuilder;
///
/// let mut builder = TreeBuilder::new();
/// let root = builder.build("<p>one</p><p>two</p>");
/// assert_eq!(root.children.len(), 2);
/// assert!(builder.issues().is_empty());
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    options: BuilderOptions,
    root: Element,
    stack: Vec<OpenElement>,
    issues: Vec<ParseIssue>,
    token_index: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Create a builder with [`BuilderOptions::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BuilderOptions::default())
    }

    /// Create a builder with the given options.
    #[must_use]
    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            options,
            root: Element::document(),
            stack: Vec::new(),
            issues: Vec::new(),
            token_index: 0,
        }
    }

    /// The builder's configuration.
    #[must_use]
    pub const fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Discard any partial tree, open elements and recorded issues.
    pub fn reset(&mut self) {
        self.root = Element::document();
        self.stack.clear();
        self.issues.clear();
        self.token_index = 0;
    }

    /// Tokenize `markup` and build its tree.
    ///
    /// Never fails: malformed markup yields a best-effort tree and entries
    /// in [`issues`](Self::issues). Empty input yields an empty root.
    ///
    /// Starts by clearing the shared warning store, so each document logs
    /// its own tokenizer parse errors once.
    pub fn build(&mut self, markup: &str) -> Element {
        clear_warnings();
        self.reset();
        let mut tokenizer = HTMLTokenizer::new(markup);
        tokenizer.run_with_sink(self);
        self.finish()
    }

    /// Close every element that is still open and hand out the root.
    ///
    /// The builder is left with an empty root; its issues stay available
    /// until the next [`reset`](Self::reset).
    pub fn finish(&mut self) -> Element {
        while let Some(open) = self.stack.last() {
            log::debug!(
                target: "husk::builder",
                "closing <{}> left open at end of input",
                open.element.tag_name
            );
            self.issues.push(ParseIssue {
                kind: IssueKind::UnclosedElement,
                tag_name: open.element.tag_name.clone(),
                token_index: self.token_index,
            });
            self.pop();
        }
        std::mem::replace(&mut self.root, Element::document())
    }

    /// Recovery actions recorded since the last reset.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Number of elements currently open.
    #[must_use]
    pub fn open_depth(&self) -> usize {
        self.stack.len()
    }

    /// Open a new element.
    ///
    /// It becomes a child of the innermost open element, or of the root when
    /// nothing is open. Ignored elements are pushed too, so that their end
    /// tag matches and their content stays inside them; they are simply
    /// never attached.
    pub fn on_start_tag(&mut self, name: &str, attributes: Vec<Attribute>) {
        let placement = if self.options.is_ignored(name) {
            Placement::Ignored
        } else if self.options.fold_inline
            && !self.stack.is_empty()
            && is_inline_formatting_element(name)
        {
            Placement::Transparent
        } else {
            Placement::Attached
        };

        self.stack.push(OpenElement {
            element: Element::new(name, attributes),
            placement,
        });
    }

    /// Close the innermost open element if it is named `name`.
    ///
    /// A mismatched end tag is ignored. Nothing else on the stack is closed.
    pub fn on_end_tag(&mut self, name: &str) {
        if self
            .stack
            .last()
            .is_some_and(|open| open.element.tag_name == name)
        {
            self.pop();
            return;
        }

        log::debug!(
            target: "husk::builder",
            "ignoring </{name}>: innermost open element is {}",
            self.stack
                .last()
                .map_or("none", |open| open.element.tag_name.as_str())
        );
        self.issues.push(ParseIssue {
            kind: IssueKind::UnmatchedEndTag,
            tag_name: name.to_string(),
            token_index: self.token_index,
        });
    }

    /// Record character data for the innermost open element.
    ///
    /// The text is trimmed; whitespace-only runs and text outside any element
    /// are dropped. A later run replaces an earlier one, except in
    /// [`fold_inline`](BuilderOptions::fold_inline) mode where runs are
    /// joined with a single space.
    pub fn on_text(&mut self, content: &str) {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return;
        }

        let fold_inline = self.options.fold_inline;
        let Some(target) = self.text_target() else {
            log::trace!(target: "husk::builder", "dropping text outside any element");
            return;
        };

        if fold_inline && !target.text.is_empty() {
            target.text.push(' ');
            target.text.push_str(trimmed);
        } else {
            trimmed.clone_into(&mut target.text);
        }
    }

    /// The element that receives text: the innermost open element that is not
    /// a folded inline element.
    fn text_target(&mut self) -> Option<&mut Element> {
        let index = self.host_index()?;
        Some(&mut self.stack[index].element)
    }

    /// Stack index of the innermost open element that is not transparent.
    fn host_index(&self) -> Option<usize> {
        self.stack
            .iter()
            .rposition(|open| open.placement != Placement::Transparent)
    }

    fn pop(&mut self) {
        let Some(open) = self.stack.pop() else {
            return;
        };

        match open.placement {
            Placement::Attached => {
                let parent = match self.host_index() {
                    Some(index) => &mut self.stack[index].element,
                    None => &mut self.root,
                };
                parent.append_child(open.element);
            }
            Placement::Ignored => {
                log::trace!(
                    target: "husk::builder",
                    "dropping ignored <{}>",
                    open.element.tag_name
                );
            }
            // Children were attached to the enclosing block as they closed.
            Placement::Transparent => {}
        }
    }
}

impl TokenSink for TreeBuilder {
    fn process_token(&mut self, token: Token) {
        match token {
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                self.on_start_tag(&name, attributes);
                if self_closing || (self.options.close_void_elements && is_void_element(&name)) {
                    self.on_end_tag(&name);
                }
            }
            Token::EndTag { name } => self.on_end_tag(&name),
            Token::Text { data } => self.on_text(&data),
            Token::Doctype { .. } | Token::Comment { .. } | Token::EndOfFile => {}
        }
        self.token_index += 1;
    }
}
