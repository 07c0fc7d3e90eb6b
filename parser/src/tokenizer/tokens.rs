use std::borrow::Cow;

use crate::Span;

/// Each of the tokens produced by the tokenizer.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'src> {
    // Operators.
    L_PAREN(Span),
    R_PAREN(Span),
    L_BRACKET(Span),
    R_BRACKET(Span),
    COMMA(Span),
    HYPHEN(Span),
    QUESTION(Span),
    ASTERISK(Span),
    PLUS(Span),
    PIPE(Span),

    /// A maximal run of non-operator characters, with escape sequences
    /// already processed: `\x` contributes `x` to the literal, whatever
    /// `x` is.
    LITERAL(Cow<'src, [u8]>, Span),

    /// End-of-expression sentinel. Not produced by the tokenizer; the
    /// parser appends it to the token sequence.
    END(Span),

    /// Not a real token. Used for a portion of the expression that doesn't
    /// match any of the tokens (a backslash with nothing to escape).
    UNKNOWN(Span),
}

impl Token<'_> {
    /// Returns the token kind, used by the parser for lookahead decisions.
    pub(crate) fn id(&self) -> TokenId {
        match self {
            Token::L_PAREN(_) => TokenId::L_PAREN,
            Token::R_PAREN(_) => TokenId::R_PAREN,
            Token::L_BRACKET(_) => TokenId::L_BRACKET,
            Token::R_BRACKET(_) => TokenId::R_BRACKET,
            Token::COMMA(_) => TokenId::COMMA,
            Token::HYPHEN(_) => TokenId::HYPHEN,
            Token::QUESTION(_) => TokenId::QUESTION,
            Token::ASTERISK(_) => TokenId::ASTERISK,
            Token::PLUS(_) => TokenId::PLUS,
            Token::PIPE(_) => TokenId::PIPE,
            Token::LITERAL(_, _) => TokenId::LITERAL,
            Token::END(_) => TokenId::END,
            Token::UNKNOWN(_) => TokenId::UNKNOWN,
        }
    }

    /// Returns the span of the token.
    pub fn span(&self) -> Span {
        match self {
            Token::L_PAREN(span)
            | Token::R_PAREN(span)
            | Token::L_BRACKET(span)
            | Token::R_BRACKET(span)
            | Token::COMMA(span)
            | Token::HYPHEN(span)
            | Token::QUESTION(span)
            | Token::ASTERISK(span)
            | Token::PLUS(span)
            | Token::PIPE(span)
            | Token::LITERAL(_, span)
            | Token::END(span)
            | Token::UNKNOWN(span) => span.clone(),
        }
    }
}

/// Token kinds, paired with [`Token`] but without the payloads.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenId {
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    COMMA,
    HYPHEN,
    QUESTION,
    ASTERISK,
    PLUS,
    PIPE,
    LITERAL,
    END,
    UNKNOWN,
}

impl TokenId {
    /// How the token is referred to in error messages.
    pub fn description(&self) -> &'static str {
        match self {
            TokenId::L_PAREN => "`(`",
            TokenId::R_PAREN => "`)`",
            TokenId::L_BRACKET => "`[`",
            TokenId::R_BRACKET => "`]`",
            TokenId::COMMA => "`,`",
            TokenId::HYPHEN => "`-`",
            TokenId::QUESTION => "`?`",
            TokenId::ASTERISK => "`*`",
            TokenId::PLUS => "`+`",
            TokenId::PIPE => "`|`",
            TokenId::LITERAL => "literal",
            TokenId::END => "end of expression",
            TokenId::UNKNOWN => "unknown token",
        }
    }
}
