/*! Compiles expressions into a [`Lexer`].

This module ties the pipeline together: each pattern added to a [`Compiler`]
is parsed into a syntax tree right away, and [`Compiler::build`] merges the
trees into a combined NFA and converts it into the DFA that the resulting
[`Lexer`] wraps.
*/

use std::fmt::{Display, Formatter};

use log::info;
use relex_parser::ast::RegExp;
use relex_parser::Parser;

use crate::fsa::dfa::Dfa;
use crate::fsa::nfa::Nfa;
use crate::fsa::StateId;

mod errors;

pub use errors::CompileError;

/// Identifies one of the patterns a [`Lexer`] was compiled from.
///
/// Pattern ids are the indices of the patterns in the order they were added
/// to the [`Compiler`]: the first pattern is 0, the second 1, and so on.
/// The id doubles as the pattern's priority; lower wins when two patterns
/// match lexemes of the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternId(u32);

impl From<usize> for PatternId {
    fn from(value: usize) -> Self {
        Self(value as u32)
    }
}

impl From<PatternId> for usize {
    fn from(value: PatternId) -> Self {
        value.0 as usize
    }
}

impl Display for PatternId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compiles `patterns` into a [`Lexer`].
///
/// This is a convenience for the common case; it is equivalent to creating
/// a [`Compiler`], adding the patterns in order, and building.
///
/// ```rust
/// let lexer = relex::compile(["int", "char"]).unwrap();
///
/// assert_eq!(lexer.num_patterns(), 2);
/// ```
pub fn compile<'a, P>(patterns: P) -> Result<Lexer, CompileError>
where
    P: IntoIterator<Item = &'a str>,
{
    let mut compiler = Compiler::new();
    for pattern in patterns {
        compiler.add_pattern(pattern)?;
    }
    compiler.build()
}

/// Takes patterns and compiles them into a [`Lexer`].
///
/// Patterns are regular expressions in the syntax accepted by the
/// `relex-parser` crate. The order in which they are added matters: the
/// i-th pattern added reports output value i, and lower output values win
/// ties between matches of the same length.
pub struct Compiler {
    regexps: Vec<RegExp>,
    patterns: Vec<String>,
}

impl Compiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self { regexps: Vec::new(), patterns: Vec::new() }
    }

    /// Parses `pattern` and adds it to the set of patterns the lexer will
    /// recognize.
    pub fn add_pattern(
        &mut self,
        pattern: &str,
    ) -> Result<&mut Self, CompileError> {
        let regexp = Parser::new(pattern).parse().map_err(|source| {
            CompileError::InvalidPattern { pattern: pattern.to_string(), source }
        })?;
        self.regexps.push(regexp);
        self.patterns.push(pattern.to_string());
        Ok(self)
    }

    /// Builds the lexer.
    ///
    /// Consumes the compiler. On error nothing is returned: there is no
    /// partially built lexer to observe.
    pub fn build(self) -> Result<Lexer, CompileError> {
        let nfa = Nfa::from_regexps(self.regexps.iter())?;
        let dfa = Dfa::from_nfa(&nfa)?;
        info!(
            "compiled {} patterns: {} NFA states, {} DFA states",
            self.patterns.len(),
            nfa.num_states(),
            dfa.num_states()
        );
        Ok(Lexer { dfa, patterns: self.patterns })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// A compiled lexer.
///
/// Produced by [`Compiler::build`], consumed by [`crate::Scanner`]. The
/// lexer is immutable and has no interior state, so any number of scanners
/// can share one.
///
/// Consumers that bring their own runtime can drive the automaton through
/// [`Lexer::transition`] and [`Lexer::pattern_matched`], or grab the
/// underlying [`Dfa`] with [`Lexer::dfa`].
pub struct Lexer {
    dfa: Dfa,
    patterns: Vec<String>,
}

impl Lexer {
    /// The state every scan starts in. Always 0.
    pub const START_STATE: StateId = Dfa::START;

    /// Number of states in the automaton.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.dfa.num_states()
    }

    /// Number of patterns the lexer was compiled from.
    #[inline]
    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// Source text of a pattern.
    pub fn pattern(&self, pattern: PatternId) -> &str {
        &self.patterns[usize::from(pattern)]
    }

    /// Returns the successor of `state` on `byte`, or `None` when the
    /// automaton has no transition for that byte.
    #[inline]
    pub fn transition(&self, state: StateId, byte: u8) -> Option<StateId> {
        self.dfa.state(state).transition(byte)
    }

    /// Returns the pattern matched at `state`, if `state` is accepting.
    #[inline]
    pub fn pattern_matched(&self, state: StateId) -> Option<PatternId> {
        self.dfa.state(state).output()
    }

    /// The underlying automaton.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }
}
