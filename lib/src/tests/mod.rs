/*! End-to-end tests: compile pattern lists and scan inputs with them. */

use pretty_assertions::assert_eq;

use relex_parser::Error as ParseError;

use crate::fsa;
use crate::{compile, CompileError, ScanError, Scanner};

/// Compiles `patterns` and tokenizes `input`, reporting each token as a
/// `(pattern index, lexeme length)` pair.
fn scan(
    patterns: &[&str],
    input: &str,
) -> Result<Vec<(usize, usize)>, ScanError> {
    let lexer = compile(patterns.iter().copied()).unwrap();
    Scanner::new(&lexer)
        .scan(input.as_bytes())
        .map(|token| token.map(|t| (usize::from(t.pattern()), t.len())))
        .collect()
}

#[test]
fn keywords() {
    assert_eq!(scan(&["int", "char"], "intchar"), Ok(vec![(0, 3), (1, 4)]));
}

#[test]
fn repetition() {
    assert_eq!(scan(&["[0-9]+"], "00042"), Ok(vec![(0, 5)]));
}

#[test]
fn nested_alternation() {
    let patterns = &["a(b|c)*d"];

    assert_eq!(scan(patterns, "abcbd"), Ok(vec![(0, 5)]));
    assert_eq!(scan(patterns, "ad"), Ok(vec![(0, 2)]));
    assert_eq!(
        scan(patterns, "ae"),
        Err(ScanError::UnexpectedInput { offset: 0 })
    );
}

#[test]
fn longest_match_beats_priority() {
    // `int` accepts after three characters, but `[a-z]+` keeps going, and
    // the longest match wins.
    assert_eq!(scan(&["int", "[a-z]+"], "integer"), Ok(vec![(1, 7)]));
}

#[test]
fn priority_breaks_ties() {
    // Both patterns accept "a"; the longest match is still preferred, and
    // on equal length the pattern added first wins.
    assert_eq!(scan(&["a+", "a"], "aaa"), Ok(vec![(0, 3)]));
    assert_eq!(scan(&["a", "a+"], "aaa"), Ok(vec![(1, 3)]));
}

#[test]
fn optional_and_starred_groups() {
    let patterns = &["ba(g|d|[h,2])?(ab(hg)+)*"];

    assert_eq!(scan(patterns, "ba"), Ok(vec![(0, 2)]));
    assert_eq!(scan(patterns, "bagabhg"), Ok(vec![(0, 7)]));
    assert_eq!(scan(patterns, "bah"), Ok(vec![(0, 3)]));
}

#[test]
fn token_stream() {
    let patterns = &["int", "char", "[0-9]+", "ba(g|d|[h,2])?(ab(hg)+)*"];

    assert_eq!(
        scan(patterns, "intchar99900099"),
        Ok(vec![(0, 3), (1, 4), (2, 8)])
    );
    assert_eq!(
        scan(patterns, "9int9badchar"),
        Ok(vec![(2, 1), (0, 3), (2, 1), (3, 3), (1, 4)])
    );
}

#[test]
fn error_position_and_resumption() {
    let patterns = &["[a-z]+", "[0-9]+"];

    // The error is reported at the offset where no pattern could match,
    // after the tokens before it.
    let lexer = compile(patterns.iter().copied()).unwrap();
    let scanner = Scanner::new(&lexer);
    let mut tokens = scanner.scan(b"abc12!x");

    assert_eq!(
        tokens.next().map(|t| t.unwrap().range()),
        Some(0..3)
    );
    assert_eq!(
        tokens.next().map(|t| t.unwrap().range()),
        Some(3..5)
    );
    assert_eq!(
        tokens.next(),
        Some(Err(ScanError::UnexpectedInput { offset: 5 }))
    );
    // The iterator is fused after an error.
    assert!(tokens.next().is_none());
}

#[test]
fn empty_input_has_no_tokens() {
    assert_eq!(scan(&["a"], ""), Ok(vec![]));
}

#[test]
fn empty_match_is_not_a_token() {
    // `a*` matches the empty string at offset 0, but an empty token would
    // make no progress; the scanner reports the input as unmatched instead.
    assert_eq!(
        scan(&["a*"], "b"),
        Err(ScanError::UnexpectedInput { offset: 0 })
    );
}

#[test]
fn duplicate_patterns_report_the_first() {
    assert_eq!(scan(&["abc", "abc"], "abcabc"), Ok(vec![(0, 3), (0, 3)]));
}

#[test]
fn invalid_pattern() {
    assert_eq!(
        compile(["a", "b**"]).err(),
        Some(CompileError::InvalidPattern {
            pattern: "b**".to_string(),
            source: ParseError::UnexpectedToken {
                expected: "literal, `(` or `[`",
                found: "`*`",
                span: relex_parser::Span(2..3),
            },
        })
    );
}

#[test]
fn pattern_set_too_complex() {
    let long = "a".repeat(70);
    assert_eq!(
        compile([long.as_str()]).err(),
        Some(CompileError::TooComplex(fsa::Error::NfaTooLarge))
    );

    let wide = "(a|b)*a(a|b)(a|b)(a|b)(a|b)(a|b)(a|b)";
    assert_eq!(
        compile([wide]).err(),
        Some(CompileError::TooComplex(fsa::Error::DfaTooLarge))
    );
}

#[test]
fn lexer_reports_its_shape() {
    let lexer = compile(["ab"]).unwrap();

    assert_eq!(lexer.num_patterns(), 1);
    assert_eq!(lexer.num_states(), 3);
    assert_eq!(lexer.pattern(0.into()), "ab");
    assert_eq!(lexer.transition(0, b'a'), Some(1));
    assert_eq!(lexer.transition(0, b'b'), None);
    assert_eq!(lexer.pattern_matched(2), Some(0.into()));
    assert_eq!(lexer.pattern_matched(0), None);
}

#[test]
fn escaped_operators_match_literally() {
    assert_eq!(scan(&[r"\(\)", r"\|+"], "()|||"), Ok(vec![(0, 2), (1, 3)]));
}

#[test]
fn lexer_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<crate::Lexer>();
}
