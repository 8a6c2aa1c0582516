//! Tests for parser error cases.

mod common;
use common::*;

use sapsql_core::parser::{ParseErrorKind, DEFAULT_MAX_DEPTH};
use sapsql_core::{Parser, SqlChecker};

#[test]
fn error_empty_input() {
    let _ = parse_err("");
}

#[test]
fn error_incomplete_select() {
    let _ = parse_err("SELECT");
}

#[test]
fn error_missing_from_table() {
    let err = parse_err("SELECT * FROM");
    assert_eq!(err.message, "Unexpected end of input: expected table name");
}

#[test]
fn error_unexpected_keyword() {
    let _ = parse_err("TRUNCATE users");
}

#[test]
fn error_unclosed_paren() {
    let _ = parse_err("SELECT (1 + 2");
}

#[test]
fn error_select_from_where() {
    let err = parse_err("SELECT FROM WHERE");
    assert_eq!(err.span.start, 7);
    assert_eq!(err.kind, ParseErrorKind::Syntax);
}

#[test]
fn error_missing_operand() {
    for (sql, op) in [
        ("SELECT a + FROM t", "+"),
        ("SELECT a * FROM t", "*"),
        ("SELECT * FROM t WHERE a = 1 AND", "AND"),
    ] {
        let err = parse_err(sql);
        assert!(
            err.message.contains(&format!("missing operand after '{op}'"))
                || err.message.starts_with("Unexpected"),
            "{sql}: {}",
            err.message
        );
    }
    let err = parse_err("SELECT a + FROM t");
    assert_eq!(
        err.message,
        "Invalid arithmetic expression: missing operand after '+'"
    );
}

#[test]
fn error_unterminated_string() {
    let err = parse_err("SELECT * FROM t WHERE a = 'open");
    assert_eq!(err.message, "Unterminated string literal");
}

#[test]
fn error_trailing_tokens() {
    let err = parse_err("SELECT a FROM t garbage more");
    assert!(err.message.contains("end of statement"));
}

#[test]
fn error_display_has_position() {
    let err = parse_err("SELECT * FROM");
    assert_eq!(
        err.to_string(),
        format!("{} at position {}..{}", err.message, err.span.start, err.span.end)
    );
}

#[test]
fn nesting_limit() {
    let sql = format!("SELECT {}1{} FROM t", "(".repeat(40), ")".repeat(40));
    let err = Parser::new(&sql)
        .with_max_depth(16)
        .parse_statement()
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NestingLimit);

    assert!(Parser::new(&sql).parse_statement().is_ok());
}

#[test]
fn deep_nesting_does_not_overflow() {
    let sql = format!("SELECT {}1{} FROM t", "(".repeat(5000), ")".repeat(5000));
    let err = parse_err(&sql);
    assert_eq!(err.kind, ParseErrorKind::NestingLimit);
}

fn on_small_stack<F: FnOnce() + Send + 'static>(f: F) {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn default_depth_fits_a_small_stack() {
    on_small_stack(|| {
        let checker = SqlChecker::generic();
        let n = DEFAULT_MAX_DEPTH - 4;
        let sql = format!("SELECT {}1{} FROM t", "(".repeat(n), ")".repeat(n));
        assert!(checker.check_syntax(&sql).valid);

        let subqueries = 40;
        let deep = [
            format!("SELECT {}1{} FROM t", "(".repeat(120), ")".repeat(120)),
            format!("SELECT * FROM {}t{}", "(".repeat(120), ")".repeat(120)),
            format!("SELECT {}a FROM t", "NOT ".repeat(120)),
            format!("SELECT {}1 FROM t", "INTERVAL ".repeat(120)),
            format!(
                "SELECT a FROM t{}{}",
                " WHERE a IN (SELECT a FROM t".repeat(subqueries),
                ")".repeat(subqueries)
            ),
        ];
        for sql in deep {
            let result = checker.check_syntax(&sql);
            assert!(!result.valid);
            assert!(
                result.errors[0].starts_with("Unexpected error: Query nesting exceeds"),
                "{:?}",
                result.errors
            );
        }
    });
}
