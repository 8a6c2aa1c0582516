#![allow(dead_code)]

use sapsql_aql::{aql_checker, AqlDialect};
use sapsql_core::ast::{SelectStatement, Statement};
use sapsql_core::{CheckResult, Parser};

pub fn check(sql: &str) -> CheckResult {
    aql_checker().check_syntax(sql)
}

pub fn assert_valid(sql: &str) -> CheckResult {
    let result = check(sql);
    assert!(
        result.valid,
        "Expected valid AQL: {sql}\nErrors: {:?}",
        result.errors
    );
    result
}

pub fn assert_invalid(sql: &str) -> Vec<String> {
    let result = check(sql);
    assert!(!result.valid, "Expected invalid AQL: {sql}");
    assert!(!result.errors.is_empty());
    result.errors
}

/// Parses already preprocessed AQL.
pub fn parse_select(sql: &str) -> SelectStatement {
    let statement = Parser::with_dialect(sql, &AqlDialect)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"));
    match statement {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}
