use strum_macros::Display;

use super::sink::TokenSink;
use super::token::Token;

/// The tokenizer state machine.
///
/// State names follow the WHATWG tokenization section. The RCDATA and RAWTEXT
/// end-tag states are shared: [`HTMLTokenizer`] remembers which of the two
/// raw text states it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Ordinary content.
    Data,
    /// Contents of `title`/`textarea`: references decoded, no tags.
    Rcdata,
    /// Contents of `script`/`style` and friends: no references, no tags.
    Rawtext,
    /// `<` seen inside raw text.
    RawTextLessThanSign,
    /// `</` seen inside raw text.
    RawTextEndTagOpen,
    /// Reading a candidate end tag name inside raw text.
    RawTextEndTagName,
    /// `<` seen in data.
    TagOpen,
    /// `</` seen in data.
    EndTagOpen,
    /// Reading a tag name.
    TagName,
    /// Whitespace before an attribute name.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// Whitespace after an attribute name.
    AfterAttributeName,
    /// After `=`, before the value.
    BeforeAttributeValue,
    /// Inside `"..."`.
    AttributeValueDoubleQuoted,
    /// Inside `'...'`.
    AttributeValueSingleQuoted,
    /// Reading an unquoted value.
    AttributeValueUnquoted,
    /// Right after a closing quote.
    AfterAttributeValueQuoted,
    /// `/` seen inside a tag.
    SelfClosingStartTag,
    /// `<!` seen: comment, doctype or bogus comment follows.
    MarkupDeclarationOpen,
    /// Anything that looks like a comment but is not one (`<?...>`, `</ ...>`).
    BogusComment,
    /// Right after `<!--`.
    CommentStart,
    /// `<!---`
    CommentStartDash,
    /// Comment body.
    Comment,
    /// `-` inside a comment.
    CommentEndDash,
    /// `--` inside a comment.
    CommentEnd,
    /// `--!` inside a comment.
    CommentEndBang,
    /// After `<!DOCTYPE`, up to the closing `>`.
    Doctype,
}

/// Markup tokenizer.
///
/// Feeds a complete input string through the state machine and delivers
/// [`Token`]s either to a [`TokenSink`] ([`run_with_sink`](Self::run_with_sink))
/// or into an internal buffer ([`run`](Self::run) + [`into_tokens`](Self::into_tokens)).
///
/// The tokenizer never fails: malformed markup produces parse-error warnings
/// through [`husk_common::warning`] and a best-effort token stream.
#[derive(Debug)]
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    // "Reconsume in the X state": the next iteration reuses the current character.
    pub(super) reconsume: bool,
    pub(super) at_eof: bool,
    pub(super) current_token: Option<Token>,
    /// Pending character data, flushed as one [`Token::Text`].
    pub(super) text_buffer: String,
    /// Tokens emitted by the current step, not yet handed to the sink.
    pub(super) pending: Vec<Token>,
    pub(super) token_stream: Vec<Token>,
    /// Used to recognize the end tag that closes a raw text element.
    pub(super) last_start_tag_name: Option<String>,
    pub(super) temporary_buffer: String,
    /// [`TokenizerState::Rcdata`] or [`TokenizerState::Rawtext`].
    pub(super) raw_text_state: TokenizerState,
}

impl HTMLTokenizer {
    /// Create a tokenizer for `input`.
    ///
    /// Newlines are normalized first: `\r\n` and lone `\r` become `\n`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let input = if input.contains('\r') {
            input.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            input.to_string()
        };

        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            reconsume: false,
            at_eof: false,
            current_token: None,
            text_buffer: String::new(),
            pending: Vec::new(),
            token_stream: Vec::new(),
            last_start_tag_name: None,
            temporary_buffer: String::new(),
            raw_text_state: TokenizerState::Rawtext,
        }
    }

    /// Current state of the state machine.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Run to completion, collecting tokens for [`into_tokens`](Self::into_tokens).
    pub fn run(&mut self) {
        let mut tokens = std::mem::take(&mut self.token_stream);
        self.run_with_sink(&mut tokens);
        self.token_stream = tokens;
    }

    /// Consume the tokenizer and return the collected tokens.
    /// Call this after [`run`](Self::run).
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Run to completion, handing each token to `sink` as soon as it is
    /// complete. The last token delivered is [`Token::EndOfFile`].
    pub fn run_with_sink<S: TokenSink + ?Sized>(&mut self, sink: &mut S) {
        while !self.at_eof {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            self.step();

            for token in self.pending.drain(..) {
                log::trace!(target: "husk::tokenizer", "[{}] {token}", self.state);
                sink.process_token(token);
            }
        }
    }

    fn step(&mut self) {
        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::Rcdata => self.handle_rcdata_state(),
            TokenizerState::Rawtext => self.handle_rawtext_state(),
            TokenizerState::RawTextLessThanSign => self.handle_raw_text_less_than_sign_state(),
            TokenizerState::RawTextEndTagOpen => self.handle_raw_text_end_tag_open_state(),
            TokenizerState::RawTextEndTagName => self.handle_raw_text_end_tag_name_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::CommentStart => self.handle_comment_start_state(),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
            TokenizerState::CommentEnd => self.handle_comment_end_state(),
            TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(),
            TokenizerState::Doctype => self.handle_doctype_state(),
        }
    }

    // =========================================================================
    // Content states
    // =========================================================================

    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('&') => self.emit_character_reference(),
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            Some('&') => self.emit_character_reference(),
            Some('<') => self.switch_to(TokenizerState::RawTextLessThanSign),
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            Some('<') => self.switch_to(TokenizerState::RawTextLessThanSign),
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    fn handle_raw_text_less_than_sign_state(&mut self) {
        if self.current_input_character == Some('/') {
            self.temporary_buffer.clear();
            self.switch_to(TokenizerState::RawTextEndTagOpen);
        } else {
            self.emit_char('<');
            self.reconsume_in(self.raw_text_state);
        }
    }

    fn handle_raw_text_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::RawTextEndTagName);
            }
            _ => {
                self.emit_str("</");
                self.reconsume_in(self.raw_text_state);
            }
        }
    }

    /// Only an "appropriate" end tag (one matching the element that opened
    /// the raw text) leaves raw text; anything else is emitted as text.
    fn handle_raw_text_end_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
            }
            _ => self.emit_raw_text_end_tag_name_anything_else(),
        }
    }

    // =========================================================================
    // Tag states
    // =========================================================================

    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // Lookahead state: reconsume so it starts right after the `!`.
            Some('!') => self.reconsume_in(TokenizerState::MarkupDeclarationOpen),
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            Some('?') => {
                self.log_parse_error("unexpected-question-mark-instead-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.emit_char('<');
                self.emit_eof();
            }
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.emit_char('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            Some('>') => {
                self.log_parse_error("missing-end-tag-name");
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.emit_str("</");
                self.emit_eof();
            }
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_tag_name('\u{FFFD}');
            }
            None => self.eof_in_tag(),
            Some(c) => self.append_to_tag_name(c.to_ascii_lowercase()),
        }
    }

    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') => {
                self.log_parse_error("unexpected-equals-sign-before-attribute-name");
                self.start_new_attribute();
                self.append_to_attribute_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some('\t' | '\n' | '\x0C' | '\r' | ' ' | '/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => {
                self.begin_attribute_value();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_attribute_name('\u{FFFD}');
            }
            Some(c @ ('"' | '\'' | '<')) => {
                self.log_parse_error("unexpected-character-in-attribute-name");
                self.append_to_attribute_name(c);
            }
            Some(c) => self.append_to_attribute_name(c.to_ascii_lowercase()),
        }
    }

    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => {
                self.begin_attribute_value();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_tag(),
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            Some('>') => {
                self.log_parse_error("missing-attribute-value");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            Some('&') => self.append_character_reference_to_attribute(),
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_attribute_value("\u{FFFD}");
            }
            None => self.eof_in_tag(),
            Some(c) => self.append_to_attribute_value(c.encode_utf8(&mut [0; 4])),
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => self.append_character_reference_to_attribute(),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_attribute_value("\u{FFFD}");
            }
            None => self.eof_in_tag(),
            Some(c) => {
                if matches!(c, '"' | '\'' | '<' | '=' | '`') {
                    self.log_parse_error("unexpected-character-in-unquoted-attribute-value");
                }
                self.append_to_attribute_value(c.encode_utf8(&mut [0; 4]));
            }
        }
    }

    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_tag(),
            Some(_) => {
                self.log_parse_error("missing-whitespace-between-attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                if let Some(ref mut token) = self.current_token {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_tag(),
            Some(_) => {
                self.log_parse_error("unexpected-solidus-in-tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    // =========================================================================
    // Comment and declaration states
    // =========================================================================

    fn handle_markup_declaration_open_state(&mut self) {
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::CommentStart);
        } else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.consume_string("DOCTYPE");
            self.temporary_buffer.clear();
            self.switch_to(TokenizerState::Doctype);
        } else {
            // `<![CDATA[...]]>` lands here too: outside foreign content it is
            // a bogus comment.
            self.log_parse_error("incorrectly-opened-comment");
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => {
                self.emit_current_token();
                self.emit_eof();
            }
            Some('\0') => self.append_to_comment("\u{FFFD}"),
            Some(c) => self.append_to_comment(c.encode_utf8(&mut [0; 4])),
        }
    }

    fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            Some('>') => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.append_to_comment("-");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_comment("\u{FFFD}");
            }
            None => self.eof_in_comment(),
            Some(c) => self.append_to_comment(c.encode_utf8(&mut [0; 4])),
        }
    }

    fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.append_to_comment("-");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            Some('-') => self.append_to_comment("-"),
            None => self.eof_in_comment(),
            Some(_) => {
                self.append_to_comment("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.append_to_comment("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.log_parse_error("incorrectly-closed-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.append_to_comment("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// Collapsed DOCTYPE handling: everything up to `>` is buffered and only
    /// the name is kept. Public and system identifiers are irrelevant here.
    fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            None => {
                self.log_parse_error("eof-in-doctype");
                self.emit_doctype();
                self.emit_eof();
            }
            Some(c) => self.temporary_buffer.push(c),
        }
    }
}
