/*! Functions that return an ASCII representation of expression ASTs. */

use ::ascii_tree::Tree;
use ::ascii_tree::Tree::{Leaf, Node};

use crate::ast::RegExp;

/// Returns a representation of the expression as an ASCII tree.
pub(crate) fn regexp_ascii_tree(regexp: &RegExp) -> Tree {
    match regexp {
        RegExp::Sequence(children) => Node(
            "Sequence".to_owned(),
            children.iter().map(regexp_ascii_tree).collect(),
        ),
        RegExp::Or(left, right) => Node(
            "Or".to_owned(),
            vec![regexp_ascii_tree(left), regexp_ascii_tree(right)],
        ),
        RegExp::Optional(child) => {
            Node("Optional".to_owned(), vec![regexp_ascii_tree(child)])
        }
        RegExp::ZeroOrMore(child) => {
            Node("ZeroOrMore".to_owned(), vec![regexp_ascii_tree(child)])
        }
        RegExp::OneOrMore(child) => {
            Node("OneOrMore".to_owned(), vec![regexp_ascii_tree(child)])
        }
        RegExp::String(literal) => Leaf(vec![format!("String(\"{}\")", literal)]),
        RegExp::OneOf(children) => Node(
            "OneOf".to_owned(),
            children.iter().map(regexp_ascii_tree).collect(),
        ),
        RegExp::Range(start, end) => Node(
            "Range".to_owned(),
            vec![regexp_ascii_tree(start), regexp_ascii_tree(end)],
        ),
    }
}
