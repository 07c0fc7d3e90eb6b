/*! Scans byte buffers with a compiled [`Lexer`].

The scanner implements the longest-match discipline: starting from the
current position it walks the automaton as far as the input allows,
remembering the last accepting state it went through, and emits the token
that accepting state describes. Ties between patterns never reach the
scanner: an accepting state of the automaton already carries the
highest-priority (lowest-index) pattern among those that match.

The automaton knows nothing about token boundaries, so a pattern that
matches the empty string never produces a token: a token always consumes at
least one byte, and input that no pattern can make progress on is a scan
error.
*/

use std::ops::Range;

use thiserror::Error;

use crate::compiler::{Lexer, PatternId};

/// An error occurred while scanning.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScanError {
    /// No pattern matches the input at the given offset.
    #[error("no pattern matches the input at offset {offset}")]
    UnexpectedInput {
        /// Byte offset into the scanned data.
        offset: usize,
    },
}

/// A token reported by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pattern: PatternId,
    range: Range<usize>,
}

impl Token {
    /// The pattern that matched.
    #[inline]
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    /// Byte range of the lexeme within the scanned data.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Length of the lexeme, in bytes. Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.range.len()
    }
}

/// Scans byte buffers with a compiled [`Lexer`].
///
/// ```rust
/// let lexer = relex::compile(["int", "[0-9]+"]).unwrap();
/// let scanner = relex::Scanner::new(&lexer);
///
/// let tokens: Result<Vec<_>, _> = scanner.scan(b"int42int").collect();
/// let tokens = tokens.unwrap();
///
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].range(), 3..5);
/// ```
pub struct Scanner<'r> {
    lexer: &'r Lexer,
}

impl<'r> Scanner<'r> {
    /// Creates a scanner that uses `lexer`.
    pub fn new(lexer: &'r Lexer) -> Self {
        Self { lexer }
    }

    /// Tokenizes `data`.
    ///
    /// The returned iterator yields the longest-match tokens from the start
    /// of `data`, in order. When it hits input that no pattern matches it
    /// yields a single [`ScanError`] and stops.
    pub fn scan<'data>(&self, data: &'data [u8]) -> Tokens<'r, 'data> {
        Tokens { lexer: self.lexer, data, pos: 0, failed: false }
    }
}

/// Iterator over the tokens of a scanned buffer. Returned by
/// [`Scanner::scan`].
pub struct Tokens<'r, 'data> {
    lexer: &'r Lexer,
    data: &'data [u8],
    pos: usize,
    failed: bool,
}

impl Iterator for Tokens<'_, '_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos == self.data.len() {
            return None;
        }

        let start = self.pos;
        let mut state = Lexer::START_STATE;
        let mut last_match: Option<(usize, PatternId)> = None;

        let mut pos = start;
        while pos < self.data.len() {
            match self.lexer.transition(state, self.data[pos]) {
                Some(next) => {
                    state = next;
                    pos += 1;
                    if let Some(pattern) = self.lexer.pattern_matched(state) {
                        last_match = Some((pos, pattern));
                    }
                }
                None => break,
            }
        }

        match last_match {
            Some((end, pattern)) => {
                self.pos = end;
                Some(Ok(Token { pattern, range: start..end }))
            }
            None => {
                self.failed = true;
                Some(Err(ScanError::UnexpectedInput { offset: start }))
            }
        }
    }
}
