//! Markup tokenizer and tree builder for the husk normalizer.
//!
//! # Scope
//!
//! - **Tokenizer**: a state machine after the WHATWG tokenization states
//!   - Data, RCDATA, RAWTEXT and tag states
//!   - Comments, bogus comments and DOCTYPE (recognized, never text)
//!   - Named and numeric character references
//! - **Tree builder**: a single stack of open elements
//!   - Ignore set (`script`, `style` by default)
//!   - Under-closing: a mismatched end tag is dropped, never auto-closes
//!   - Optional folding of inline formatting elements
//!
//! # Not implemented
//!
//! - Insertion modes and implied end tags
//! - Foreign content (SVG, `MathML`) and CDATA
//! - Scripting flag and `noscript` handling
//!
//! The two halves meet at [`TokenSink`]: the tokenizer pushes tokens into a
//! sink, and [`TreeBuilder`] is one.

/// Tree construction.
pub mod builder;
/// Markup tokenizer.
pub mod tokenizer;

pub use builder::{BuilderOptions, IssueKind, ParseIssue, TreeBuilder};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenSink, TokenizerState};
