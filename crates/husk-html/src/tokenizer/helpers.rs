//! Tokenizer helpers.
//!
//! - State transitions ("switch to", "reconsume in")
//! - Input lookahead and consumption
//! - Text buffering and token emission
//! - Assembly of the current tag or comment token
//! - The raw text end-tag fallback

use husk_common::warning::warn_once;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;

// =============================================================================
// State transitions
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state": the next character is consumed in `new_state`.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state": `new_state` sees the current character again.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input
// =============================================================================

impl HTMLTokenizer {
    /// Consume the next input character, `None` at end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Unconsumed input.
    pub(super) fn remaining(&self) -> &str {
        &self.input[self.current_pos..]
    }

    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.remaining().starts_with(target)
    }

    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.remaining()
            .get(..target.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(target))
    }

    /// Skip over `target`, which the caller has already matched.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// ASCII whitespace as the tokenizer sees it (carriage returns are
    /// normalized away in [`HTMLTokenizer::new`]).
    pub(super) const fn is_whitespace_char(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    pub(super) fn log_parse_error(&self, kind: &str) {
        let _ = warn_once("Tokenizer", &format!("{kind} parse error"));
        log::trace!(
            target: "husk::tokenizer",
            "{kind} at byte {} in {}",
            self.current_pos,
            self.state
        );
    }
}

// =============================================================================
// Emission
// =============================================================================

impl HTMLTokenizer {
    pub(super) fn emit_char(&mut self, c: char) {
        self.text_buffer.push(c);
    }

    pub(super) fn emit_str(&mut self, s: &str) {
        self.text_buffer.push_str(s);
    }

    /// Turn buffered character data into a single text token.
    fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let data = std::mem::take(&mut self.text_buffer);
            self.pending.push(Token::Text { data });
        }
    }

    fn push_token(&mut self, token: Token) {
        self.flush_text();
        self.pending.push(token);
    }

    /// Emit the token under construction.
    ///
    /// A start tag for a raw text element also switches the tokenizer into
    /// RAWTEXT or RCDATA, the way the tree construction stage would. A
    /// self-closing start tag has no content and leaves the state alone.
    pub(super) fn emit_current_token(&mut self) {
        let Some(token) = self.current_token.take() else {
            return;
        };

        if let Token::StartTag {
            name, self_closing, ..
        } = &token
        {
            if !*self_closing {
                match name.as_str() {
                    "title" | "textarea" => self.enter_raw_text(TokenizerState::Rcdata),
                    "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                        self.enter_raw_text(TokenizerState::Rawtext);
                    }
                    _ => {}
                }
            }
            self.last_start_tag_name = Some(name.clone());
        }

        self.push_token(token);
    }

    pub(super) fn emit_doctype(&mut self) {
        let name = self
            .temporary_buffer
            .split_ascii_whitespace()
            .next()
            .map(str::to_ascii_lowercase);
        self.temporary_buffer.clear();
        self.push_token(Token::Doctype { name });
    }

    pub(super) fn emit_eof(&mut self) {
        self.push_token(Token::EndOfFile);
        self.at_eof = true;
    }

    /// EOF inside a tag: the unfinished tag is dropped.
    pub(super) fn eof_in_tag(&mut self) {
        self.log_parse_error("eof-in-tag");
        self.current_token = None;
        self.emit_eof();
    }

    /// EOF inside a comment: the comment is emitted as far as it got.
    pub(super) fn eof_in_comment(&mut self) {
        self.log_parse_error("eof-in-comment");
        self.emit_current_token();
        self.emit_eof();
    }
}

// =============================================================================
// Current token assembly
// =============================================================================

impl HTMLTokenizer {
    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_tag_name(c);
        }
    }

    pub(super) fn start_new_attribute(&mut self) {
        if let Some(ref mut token) = self.current_token {
            token.start_new_attribute();
        }
    }

    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_current_attribute_name(c);
        }
    }

    pub(super) fn begin_attribute_value(&mut self) {
        if let Some(ref mut token) = self.current_token {
            token.begin_current_attribute_value();
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, s: &str) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_current_attribute_value(s);
        }
    }

    pub(super) fn append_to_comment(&mut self, s: &str) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_comment(s);
        }
    }
}

// =============================================================================
// Raw text
// =============================================================================

impl HTMLTokenizer {
    const fn enter_raw_text(&mut self, state: TokenizerState) {
        self.raw_text_state = state;
        self.state = state;
    }

    /// An end tag is appropriate when its name matches the last start tag
    /// emitted, i.e. it closes the element whose raw text we are in.
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.current_token, &self.last_start_tag_name) {
            (Some(Token::EndTag { name }), Some(last)) => name == last,
            _ => false,
        }
    }

    /// Not a closing tag after all: `</` plus the buffered name become text.
    pub(super) fn emit_raw_text_end_tag_name_anything_else(&mut self) {
        self.current_token = None;
        self.emit_str("</");
        let buffered = std::mem::take(&mut self.temporary_buffer);
        self.emit_str(&buffered);
        self.reconsume_in(self.raw_text_state);
    }
}
