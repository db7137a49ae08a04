//! Markup tokenizer.
//!
//! A hand-written state machine modeled on the WHATWG tokenization states,
//! reduced to what text extraction needs: tags, attributes, comments,
//! doctypes, raw text elements and character references.

/// Character reference decoding.
pub mod character_reference;
/// Tokenizer state machine.
pub mod core;
/// Input, emission and raw text helpers.
pub mod helpers;
/// Named character reference table.
pub mod named_character_references;
/// Token consumer trait.
pub mod sink;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerState};
pub use sink::TokenSink;
pub use token::{Attribute, Token};
