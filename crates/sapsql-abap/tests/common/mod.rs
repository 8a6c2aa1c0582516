#![allow(dead_code)]

use sapsql_abap::{abap_checker, AbapDialect};
use sapsql_core::ast::{SelectStatement, Statement};
use sapsql_core::{CheckResult, Generator, Parser};

pub fn check(sql: &str) -> CheckResult {
    abap_checker().check_syntax(sql)
}

pub fn assert_valid(sql: &str) -> CheckResult {
    let result = check(sql);
    assert!(
        result.valid,
        "Expected valid ABAP SQL: {sql}\nErrors: {:?}",
        result.errors
    );
    result
}

pub fn assert_invalid(sql: &str) -> Vec<String> {
    let result = check(sql);
    assert!(!result.valid, "Expected invalid ABAP SQL: {sql}");
    assert!(!result.errors.is_empty());
    result.errors
}

pub fn parse_select(sql: &str) -> SelectStatement {
    let statement = Parser::with_dialect(sql, &AbapDialect)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"));
    match statement {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Verifies that rendering with the ABAP dialect is a fixed point.
pub fn round_trip(sql: &str) {
    let generator = Generator::new(&AbapDialect, false);
    let first = generator.statement(&Statement::Select(parse_select(sql)));
    let second = generator.statement(&Statement::Select(parse_select(&first)));
    assert_eq!(
        first, second,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {first}\n  Second:   {second}"
    );
}
