use std::borrow::Cow;

use pretty_assertions::assert_eq;

use super::{Token, Tokenizer};
use crate::Span;

#[test]
fn operators() {
    let mut lexer = Tokenizer::new(b"()[],-?*+|");

    assert_eq!(lexer.next_token(), Some(Token::L_PAREN(Span(0..1))));
    assert_eq!(lexer.next_token(), Some(Token::R_PAREN(Span(1..2))));
    assert_eq!(lexer.next_token(), Some(Token::L_BRACKET(Span(2..3))));
    assert_eq!(lexer.next_token(), Some(Token::R_BRACKET(Span(3..4))));
    assert_eq!(lexer.next_token(), Some(Token::COMMA(Span(4..5))));
    assert_eq!(lexer.next_token(), Some(Token::HYPHEN(Span(5..6))));
    assert_eq!(lexer.next_token(), Some(Token::QUESTION(Span(6..7))));
    assert_eq!(lexer.next_token(), Some(Token::ASTERISK(Span(7..8))));
    assert_eq!(lexer.next_token(), Some(Token::PLUS(Span(8..9))));
    assert_eq!(lexer.next_token(), Some(Token::PIPE(Span(9..10))));
    assert_eq!(lexer.next_token(), None);
}

#[test]
fn literals() {
    let mut lexer = Tokenizer::new(b"int|char");

    assert_eq!(
        lexer.next_token(),
        Some(Token::LITERAL(Cow::Borrowed(b"int"), Span(0..3)))
    );
    assert_eq!(lexer.next_token(), Some(Token::PIPE(Span(3..4))));
    assert_eq!(
        lexer.next_token(),
        Some(Token::LITERAL(Cow::Borrowed(b"char"), Span(4..8)))
    );
    assert_eq!(lexer.next_token(), None);
}

#[test]
fn literals_are_maximal_runs() {
    // Operators flush the current literal; anything else extends it,
    // including whitespace and non-ASCII characters.
    let mut lexer = Tokenizer::new(b"a b\xc3\xa9!(c");

    assert_eq!(
        lexer.next_token(),
        Some(Token::LITERAL(Cow::Borrowed(b"a b\xc3\xa9!"), Span(0..6)))
    );
    assert_eq!(lexer.next_token(), Some(Token::L_PAREN(Span(6..7))));
    assert_eq!(
        lexer.next_token(),
        Some(Token::LITERAL(Cow::Borrowed(b"c"), Span(7..8)))
    );
    assert_eq!(lexer.next_token(), None);
}

#[test]
fn escapes() {
    // The backslash escapes the next character, operator or not, and is
    // not part of the literal.
    let mut lexer = Tokenizer::new(br"a\|b\\c\d");

    assert_eq!(
        lexer.next_token(),
        Some(Token::LITERAL(Cow::Owned(b"a|b\\cd".to_vec()), Span(0..9)))
    );
    assert_eq!(lexer.next_token(), None);
}

#[test]
fn escaped_operator_joins_literals() {
    let mut lexer = Tokenizer::new(br"int\+\+");

    assert_eq!(
        lexer.next_token(),
        Some(Token::LITERAL(Cow::Owned(b"int++".to_vec()), Span(0..7)))
    );
    assert_eq!(lexer.next_token(), None);
}

#[test]
fn trailing_backslash() {
    let mut lexer = Tokenizer::new(br"a\");

    assert_eq!(
        lexer.next_token(),
        Some(Token::LITERAL(Cow::Borrowed(b"a"), Span(0..1)))
    );
    assert_eq!(lexer.next_token(), Some(Token::UNKNOWN(Span(1..2))));
    assert_eq!(lexer.next_token(), None);
}

#[test]
fn empty() {
    let mut lexer = Tokenizer::new(b"");
    assert_eq!(lexer.next_token(), None);
}
