use super::token::Token;

/// Receiver for the tokenizer's output.
///
/// The tokenizer pushes every token, in order, ending with
/// [`Token::EndOfFile`]. Implementors decide what to keep; the tree builder
/// is one, and a plain `Vec<Token>` collects everything.
pub trait TokenSink {
    /// Handle one token.
    fn process_token(&mut self, token: Token);
}

impl TokenSink for Vec<Token> {
    fn process_token(&mut self, token: Token) {
        self.push(token);
    }
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn process_token(&mut self, token: Token) {
        (**self).process_token(token);
    }
}
