/*! Abstract Syntax Tree (AST) for relex expressions.

The AST is a tree of [`RegExp`] nodes, each node owning its children. It is
produced by [`crate::Parser`] and consumed read-only by the automata builders
in the `relex` crate.
*/

use std::fmt::{Display, Formatter};

use bstr::BString;

mod ascii_tree;

/// A regular expression.
///
/// Implements [`Display`] by rendering the tree in ASCII, which is what the
/// `rlx dump --ast` command prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegExp {
    /// Concatenation of one or more expressions, matched left to right.
    ///
    /// The parser always returns a `Sequence` as the top-level node.
    Sequence(Vec<RegExp>),
    /// Alternation `a|b`. Right-associative: `a|b|c` is `a|(b|c)`.
    Or(Box<RegExp>, Box<RegExp>),
    /// Zero or one repetition `a?`.
    Optional(Box<RegExp>),
    /// Kleene star `a*`.
    ZeroOrMore(Box<RegExp>),
    /// One or more repetitions `a+`.
    OneOrMore(Box<RegExp>),
    /// A literal byte string, matched exactly.
    String(BString),
    /// Set alternation `[a,bc,0-9]`: any one of the alternatives.
    OneOf(Vec<RegExp>),
    /// Inclusive byte range `0-9` inside `[...]`. Both sides are
    /// single-character [`RegExp::String`]s with start ≤ end; the parser
    /// validates this after building the tree.
    Range(Box<RegExp>, Box<RegExp>),
}

impl Display for RegExp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        ::ascii_tree::write_tree(f, &ascii_tree::regexp_ascii_tree(self))
    }
}
