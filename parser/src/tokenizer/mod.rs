/*! Implements the expression tokenizer.

Tokenization is the first step in parsing an expression. The tokenizer takes
the expression text and produces a sequence of tokens that is later processed
by the parser. Each token is represented by a variant of the [`Token`] type.

There are only ten operator characters: `( ) * + , - ? [ ] |`. Any other
character contributes to the current literal, a maximal run of non-operator
characters. A backslash escapes the character that follows it, operator or
not; the backslash itself is not part of the literal. The input is a byte
slice and literals are byte strings, because the automata compiled from the
expressions work over the full 8-bit alphabet.
*/

use std::borrow::Cow;

use logos::Logos;

use crate::Span;

mod tokens;

pub use tokens::Token;
pub(crate) use tokens::TokenId;

#[cfg(test)]
mod tests;

/// Takes expression text and produces a sequence of tokens.
///
/// The tokenizer never fails: a piece of the input that doesn't match any
/// token (the only case is a trailing backslash with nothing to escape) is
/// returned as a [`Token::UNKNOWN`] token, and it is the parser's job to
/// report it.
pub(crate) struct Tokenizer<'src> {
    lexer: logos::Lexer<'src, RawToken<'src>>,
}

impl<'src> Tokenizer<'src> {
    /// Creates a new [`Tokenizer`].
    pub fn new(source: &'src [u8]) -> Self {
        // Can't handle expressions greater than the maximum span size.
        assert!(source.len() < Span::MAX);
        Self { lexer: Logos::lexer(source) }
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Option<Token<'src>> {
        let span = |lexer: &logos::Lexer<'src, RawToken<'src>>| {
            Span::from(lexer.span())
        };
        let token = match self.lexer.next()? {
            Ok(RawToken::LParen) => Token::L_PAREN(span(&self.lexer)),
            Ok(RawToken::RParen) => Token::R_PAREN(span(&self.lexer)),
            Ok(RawToken::LBracket) => Token::L_BRACKET(span(&self.lexer)),
            Ok(RawToken::RBracket) => Token::R_BRACKET(span(&self.lexer)),
            Ok(RawToken::Comma) => Token::COMMA(span(&self.lexer)),
            Ok(RawToken::Hyphen) => Token::HYPHEN(span(&self.lexer)),
            Ok(RawToken::Question) => Token::QUESTION(span(&self.lexer)),
            Ok(RawToken::Asterisk) => Token::ASTERISK(span(&self.lexer)),
            Ok(RawToken::Plus) => Token::PLUS(span(&self.lexer)),
            Ok(RawToken::Pipe) => Token::PIPE(span(&self.lexer)),
            Ok(RawToken::Literal(raw)) => {
                Token::LITERAL(unescape(raw), span(&self.lexer))
            }
            Err(()) => Token::UNKNOWN(span(&self.lexer)),
        };
        Some(token)
    }
}

/// Removes the escaping backslashes from a literal.
///
/// Escaped characters are emitted verbatim. Borrows the input when there is
/// nothing to unescape.
fn unescape(raw: &[u8]) -> Cow<'_, [u8]> {
    if !raw.contains(&b'\\') {
        return Cow::Borrowed(raw);
    }
    let mut bytes = Vec::with_capacity(raw.len());
    let mut iter = raw.iter();
    while let Some(&byte) = iter.next() {
        if byte == b'\\' {
            // The token regex guarantees a character after the backslash.
            if let Some(&escaped) = iter.next() {
                bytes.push(escaped);
            }
        } else {
            bytes.push(byte);
        }
    }
    Cow::Owned(bytes)
}

/// Raw tokens recognized by the logos lexer.
#[derive(logos::Logos, Debug, PartialEq)]
#[logos(source = [u8])]
enum RawToken<'src> {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("-")]
    Hyphen,
    #[token("?")]
    Question,
    #[token("*")]
    Asterisk,
    #[token("+")]
    Plus,
    #[token("|")]
    Pipe,

    // A maximal run of non-operator characters. Escapes are processed
    // out of the raw slice by `unescape`.
    #[regex(r#"([^()*+,\-?\[\]|\\]|\\.)+"#, |lexer| lexer.slice())]
    Literal(&'src [u8]),
}
