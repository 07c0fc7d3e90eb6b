use bstr::BString;
use pretty_assertions::assert_eq;

use super::{Error, Parser};
use crate::ast::RegExp;
use crate::Span;

fn parse(expression: &str) -> Result<RegExp, Error> {
    Parser::new(expression).parse()
}

fn string(literal: &str) -> RegExp {
    RegExp::String(BString::from(literal))
}

#[test]
fn operator_free_expression_is_a_single_string() {
    assert_eq!(
        parse("intchar"),
        Ok(RegExp::Sequence(vec![string("intchar")]))
    );
}

#[test]
fn escaped_operators_join_the_literal() {
    assert_eq!(
        parse(r"a\|b\*"),
        Ok(RegExp::Sequence(vec![string("a|b*")]))
    );
}

#[test]
fn or_is_right_associative() {
    assert_eq!(
        parse("a|b|c"),
        Ok(RegExp::Sequence(vec![RegExp::Or(
            Box::new(string("a")),
            Box::new(RegExp::Or(
                Box::new(string("b")),
                Box::new(string("c")),
            )),
        )]))
    );
}

#[test]
fn postfix_operators() {
    assert_eq!(
        parse("a?"),
        Ok(RegExp::Sequence(vec![RegExp::Optional(Box::new(string("a")))]))
    );
    assert_eq!(
        parse("a*"),
        Ok(RegExp::Sequence(vec![RegExp::ZeroOrMore(Box::new(string("a")))]))
    );
    assert_eq!(
        parse("a+"),
        Ok(RegExp::Sequence(vec![RegExp::OneOrMore(Box::new(string("a")))]))
    );
}

#[test]
fn postfix_applies_to_the_whole_literal() {
    // Literals are maximal runs, so the star repeats "ab", not just "b".
    // `a(b)*` is the way to repeat the last character only.
    assert_eq!(
        parse("ab*"),
        Ok(RegExp::Sequence(vec![RegExp::ZeroOrMore(Box::new(string(
            "ab"
        )))]))
    );
}

#[test]
fn groups() {
    assert_eq!(
        parse("a(b|c)d"),
        Ok(RegExp::Sequence(vec![
            string("a"),
            RegExp::Sequence(vec![RegExp::Or(
                Box::new(string("b")),
                Box::new(string("c")),
            )]),
            string("d"),
        ]))
    );
}

#[test]
fn sets_and_ranges() {
    assert_eq!(
        parse("[a,bc,0-9]"),
        Ok(RegExp::Sequence(vec![RegExp::OneOf(vec![
            string("a"),
            string("bc"),
            RegExp::Range(Box::new(string("0")), Box::new(string("9"))),
        ])]))
    );
}

#[test]
fn nested_expression() {
    // ba(g|d|[h,2])?(ab(hg)+)*
    assert_eq!(
        parse("ba(g|d|[h,2])?(ab(hg)+)*"),
        Ok(RegExp::Sequence(vec![
            string("ba"),
            RegExp::Optional(Box::new(RegExp::Sequence(vec![RegExp::Or(
                Box::new(string("g")),
                Box::new(RegExp::Or(
                    Box::new(string("d")),
                    Box::new(RegExp::OneOf(vec![string("h"), string("2")])),
                )),
            )]))),
            RegExp::ZeroOrMore(Box::new(RegExp::Sequence(vec![
                string("ab"),
                RegExp::OneOrMore(Box::new(RegExp::Sequence(vec![string(
                    "hg"
                )]))),
            ]))),
        ]))
    );
}

#[test]
fn empty_expression() {
    assert_eq!(
        parse(""),
        Err(Error::UnexpectedToken {
            expected: "literal, `(` or `[`",
            found: "end of expression",
            span: Span(0..0),
        })
    );
}

#[test]
fn empty_group() {
    assert_eq!(
        parse("a()"),
        Err(Error::UnexpectedToken {
            expected: "literal, `(` or `[`",
            found: "`)`",
            span: Span(2..3),
        })
    );
}

#[test]
fn stacked_postfix_operators() {
    assert_eq!(
        parse("a**"),
        Err(Error::UnexpectedToken {
            expected: "literal, `(` or `[`",
            found: "`*`",
            span: Span(2..3),
        })
    );
}

#[test]
fn unterminated_group() {
    assert_eq!(
        parse("(a"),
        Err(Error::UnexpectedToken {
            expected: "`)`",
            found: "end of expression",
            span: Span(2..2),
        })
    );
}

#[test]
fn unterminated_set() {
    assert_eq!(
        parse("["),
        Err(Error::UnexpectedToken {
            expected: "literal",
            found: "end of expression",
            span: Span(1..1),
        })
    );
}

#[test]
fn unbalanced_paren() {
    assert_eq!(
        parse("a)"),
        Err(Error::UnexpectedToken {
            expected: "end of expression",
            found: "`)`",
            span: Span(1..2),
        })
    );
}

#[test]
fn dangling_or() {
    assert_eq!(
        parse("a|"),
        Err(Error::UnexpectedToken {
            expected: "literal, `(` or `[`",
            found: "end of expression",
            span: Span(2..2),
        })
    );
}

#[test]
fn range_without_end() {
    assert_eq!(
        parse("[a-]"),
        Err(Error::UnexpectedToken {
            expected: "literal",
            found: "`]`",
            span: Span(3..4),
        })
    );
}

#[test]
fn range_endpoint_too_long() {
    assert_eq!(
        parse("[ab-z]"),
        Err(Error::InvalidRangeEndpoint { found: BString::from("ab") })
    );
}

#[test]
fn range_out_of_order() {
    assert_eq!(
        parse("[z-a]"),
        Err(Error::InvalidRange { start: 'z', end: 'a' })
    );
}

#[test]
fn incomplete_escape() {
    assert_eq!(
        parse(r"abc\"),
        Err(Error::IncompleteEscape { span: Span(3..4) })
    );
}

#[test]
fn expression_too_long() {
    let expression = "a".repeat(101);
    assert_eq!(parse(&expression), Err(Error::PatternTooLong));

    // Escaping backslashes don't count against the budget.
    let expression = r"\a".repeat(100);
    assert!(parse(&expression).is_ok());
}

#[test]
fn too_many_tokens() {
    let expression = "(a)".repeat(34);
    assert_eq!(parse(&expression), Err(Error::TooManyTokens));
}

#[test]
fn display_renders_ascii_tree() {
    let rendered = parse("a|b").unwrap().to_string();

    assert!(rendered.contains("Sequence"));
    assert!(rendered.contains("Or"));
    assert!(rendered.contains(r#"String("a")"#));
    assert!(rendered.contains(r#"String("b")"#));
}
