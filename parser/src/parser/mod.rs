/*! Implements the expression parser.

The parser is a straightforward recursive descent over the token sequence
produced by the tokenizer, with one token of lookahead:

```text
Start     → Sequence END
Sequence  → Component+              (until END, `)` or `]`)
Component → Factor ('|' Component)?
Factor    → Term ('?' | '*' | '+')?
Term      → LITERAL | '(' Sequence ')' | '[' List ']'
List      → ListComponent (',' ListComponent)*
ListComp  → LITERAL ('-' LITERAL)?
```

`|` is right-associative, and the postfix operators don't stack: after one
`?`, `*` or `+` the next postfix operator starts a new factor, so `a**` is a
syntax error. After building the tree a validation pass checks every range:
both endpoints must be single-character literals with start ≤ end.
*/

use bstr::BString;

use crate::ast::RegExp;
use crate::tokenizer::{Token, TokenId, Tokenizer};
use crate::Span;

mod errors;

pub use errors::Error;

#[cfg(test)]
mod tests;

/// Maximum number of tokens in an expression.
pub(crate) const MAX_TOKENS: usize = 100;

/// Maximum length of an expression, in characters, once escape sequences
/// have been processed.
///
/// Together with [`MAX_TOKENS`] this also bounds the size of the AST: a
/// sequence or a `[...]` set can never have more children than the
/// expression has tokens.
pub(crate) const MAX_PATTERN_LEN: usize = 100;

/// Parses a relex expression.
///
/// ```rust
/// use relex_parser::Parser;
///
/// let regexp = Parser::new("[0-9]+").parse().unwrap();
/// ```
pub struct Parser<'src> {
    source: &'src [u8],
    tokens: Vec<Token<'src>>,
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for `expression`.
    pub fn new(expression: &'src str) -> Self {
        Self { source: expression.as_bytes(), tokens: Vec::new(), pos: 0 }
    }

    /// Parses the expression into its AST.
    pub fn parse(mut self) -> Result<RegExp, Error> {
        self.tokenize()?;
        let regexp = self.parse_start()?;
        check_ranges(&regexp)?;
        Ok(regexp)
    }

    /// Runs the tokenizer over the whole expression, appending the `END`
    /// sentinel. Enforces the token and length budgets.
    fn tokenize(&mut self) -> Result<(), Error> {
        let mut tokenizer = Tokenizer::new(self.source);
        let mut effective_len = 0;
        while let Some(token) = tokenizer.next_token() {
            match &token {
                Token::UNKNOWN(span) => {
                    return Err(Error::IncompleteEscape { span: span.clone() })
                }
                Token::LITERAL(bytes, _) => effective_len += bytes.len(),
                _ => effective_len += 1,
            }
            self.tokens.push(token);
            if self.tokens.len() > MAX_TOKENS {
                return Err(Error::TooManyTokens);
            }
        }
        if effective_len > MAX_PATTERN_LEN {
            return Err(Error::PatternTooLong);
        }
        let end = self.source.len() as u32;
        self.tokens.push(Token::END(Span(end..end)));
        Ok(())
    }

    /// The token at the cursor. Always valid: the cursor never moves past
    /// the `END` sentinel.
    fn current(&self) -> &Token<'src> {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Consumes the current token if it has the given kind.
    fn accept(&mut self, id: TokenId) -> bool {
        if self.current().id() == id {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes and returns the current token, which must have the given
    /// kind.
    fn expect(&mut self, id: TokenId) -> Result<Token<'src>, Error> {
        let token = self.current().clone();
        if token.id() == id {
            self.bump();
            Ok(token)
        } else {
            Err(Error::unexpected(id.description(), &token))
        }
    }

    // Start → Sequence END
    fn parse_start(&mut self) -> Result<RegExp, Error> {
        let sequence = self.parse_sequence()?;
        self.expect(TokenId::END)?;
        Ok(sequence)
    }

    // Sequence → Component+
    fn parse_sequence(&mut self) -> Result<RegExp, Error> {
        let mut components = Vec::new();
        loop {
            components.push(self.parse_component()?);
            match self.current().id() {
                TokenId::END | TokenId::R_PAREN | TokenId::R_BRACKET => break,
                _ => {}
            }
        }
        Ok(RegExp::Sequence(components))
    }

    // Component → Factor ('|' Component)?
    fn parse_component(&mut self) -> Result<RegExp, Error> {
        let factor = self.parse_factor()?;
        if self.accept(TokenId::PIPE) {
            let component = self.parse_component()?;
            Ok(RegExp::Or(Box::new(factor), Box::new(component)))
        } else {
            Ok(factor)
        }
    }

    // Factor → Term ('?' | '*' | '+')?
    fn parse_factor(&mut self) -> Result<RegExp, Error> {
        let term = self.parse_term()?;
        if self.accept(TokenId::QUESTION) {
            Ok(RegExp::Optional(Box::new(term)))
        } else if self.accept(TokenId::ASTERISK) {
            Ok(RegExp::ZeroOrMore(Box::new(term)))
        } else if self.accept(TokenId::PLUS) {
            Ok(RegExp::OneOrMore(Box::new(term)))
        } else {
            Ok(term)
        }
    }

    // Term → LITERAL | '(' Sequence ')' | '[' List ']'
    fn parse_term(&mut self) -> Result<RegExp, Error> {
        match self.current().id() {
            TokenId::LITERAL => self.expect_literal(),
            TokenId::L_PAREN => {
                self.bump();
                let sequence = self.parse_sequence()?;
                self.expect(TokenId::R_PAREN)?;
                Ok(sequence)
            }
            TokenId::L_BRACKET => {
                self.bump();
                let list = self.parse_list()?;
                self.expect(TokenId::R_BRACKET)?;
                Ok(list)
            }
            _ => Err(Error::unexpected("literal, `(` or `[`", self.current())),
        }
    }

    // List → ListComponent (',' ListComponent)*
    fn parse_list(&mut self) -> Result<RegExp, Error> {
        let mut alternatives = vec![self.parse_list_component()?];
        while self.accept(TokenId::COMMA) {
            alternatives.push(self.parse_list_component()?);
        }
        Ok(RegExp::OneOf(alternatives))
    }

    // ListComponent → LITERAL ('-' LITERAL)?
    fn parse_list_component(&mut self) -> Result<RegExp, Error> {
        let start = self.expect_literal()?;
        if self.accept(TokenId::HYPHEN) {
            let end = self.expect_literal()?;
            Ok(RegExp::Range(Box::new(start), Box::new(end)))
        } else {
            Ok(start)
        }
    }

    fn expect_literal(&mut self) -> Result<RegExp, Error> {
        match self.expect(TokenId::LITERAL)? {
            Token::LITERAL(bytes, _) => {
                Ok(RegExp::String(BString::from(bytes.into_owned())))
            }
            _ => unreachable!(),
        }
    }
}

/// Validates every range in the tree: both endpoints must be
/// single-character strings with start ≤ end.
fn check_ranges(regexp: &RegExp) -> Result<(), Error> {
    match regexp {
        RegExp::Sequence(children) | RegExp::OneOf(children) => {
            for child in children {
                check_ranges(child)?;
            }
        }
        RegExp::Or(left, right) => {
            check_ranges(left)?;
            check_ranges(right)?;
        }
        RegExp::Optional(child)
        | RegExp::ZeroOrMore(child)
        | RegExp::OneOrMore(child) => check_ranges(child)?,
        RegExp::String(_) => {}
        RegExp::Range(start, end) => {
            let start = range_endpoint(start)?;
            let end = range_endpoint(end)?;
            if start > end {
                return Err(Error::InvalidRange {
                    start: start.into(),
                    end: end.into(),
                });
            }
        }
    }
    Ok(())
}

/// Returns the single byte of a range endpoint, or an error if the endpoint
/// is not a single-character string.
fn range_endpoint(regexp: &RegExp) -> Result<u8, Error> {
    match regexp {
        RegExp::String(literal) if literal.len() == 1 => Ok(literal[0]),
        RegExp::String(literal) => {
            Err(Error::InvalidRangeEndpoint { found: literal.clone() })
        }
        // The parser only puts strings on either side of a range.
        _ => unreachable!(),
    }
}
