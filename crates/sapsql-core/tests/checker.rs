//! End-to-end tests of the generic checker.

mod common;
use common::*;

use sapsql_core::ast::StatementType;
use sapsql_core::{CheckerConfig, Clause, GenericDialect, SqlChecker};

#[test]
fn complete_statements_are_valid() {
    for sql in [
        "SELECT carrid, connid FROM sflight WHERE carrid = 'AA'",
        "INSERT INTO sflight (carrid, connid) VALUES ('AA', 17)",
        "UPDATE sflight SET price = 100 WHERE carrid = 'AA'",
        "DELETE FROM sflight WHERE carrid = 'AA'",
    ] {
        let result = check(sql);
        assert!(result.valid, "{sql}: {:?}", result.errors);
        assert!(result.errors.is_empty());
    }
}

#[test]
fn join_without_on_names_the_join() {
    for (sql, kind) in [
        ("SELECT * FROM a JOIN b", "INNER JOIN"),
        ("SELECT * FROM a LEFT JOIN b", "LEFT JOIN"),
        ("SELECT * FROM a RIGHT OUTER JOIN b", "RIGHT JOIN"),
        ("SELECT * FROM a FULL JOIN b", "FULL JOIN"),
    ] {
        let result = check(sql);
        assert!(!result.valid);
        assert_eq!(result.errors, vec![format!("{kind} requires ON condition")]);
    }
    assert!(check("SELECT * FROM a CROSS JOIN b").valid);
}

#[test]
fn one_error_per_window_function() {
    let result = check("SELECT ROW_NUMBER(), DENSE_RANK(), NTILE(4), SUM(a) FROM t");
    assert_eq!(
        result.errors,
        vec![
            "Window function ROW_NUMBER() requires OVER clause",
            "Window function DENSE_RANK() requires OVER clause",
            "Window function NTILE() requires OVER clause",
        ]
    );
    assert!(check("SELECT NTILE(4) OVER (ORDER BY a) FROM t").valid);
}

#[test]
fn nested_row_sources_need_from() {
    for sql in [
        "SELECT * FROM t WHERE a IN (SELECT a)",
        "WITH c AS (SELECT 1) SELECT * FROM c",
        "SELECT a FROM t UNION SELECT 1",
        "SELECT x.a FROM (SELECT 1 AS a) AS x",
    ] {
        let result = check(sql);
        assert_eq!(
            result.errors,
            vec!["Missing FROM clause in SELECT statement"],
            "{sql}"
        );
    }
}

#[test]
fn scalar_and_exists_subqueries_may_omit_from() {
    for sql in [
        "SELECT a FROM t WHERE b = (SELECT 1)",
        "SELECT a, (SELECT CURRENT_DATE) FROM t",
        "SELECT a FROM t WHERE EXISTS (SELECT 1)",
    ] {
        let result = check(sql);
        assert!(result.valid, "{sql}: {:?}", result.errors);
    }
}

#[test]
fn query_rules_apply_to_select_roots_only() {
    for sql in [
        "UPDATE t SET a = 1 WHERE b IN (SELECT c FROM u JOIN v)",
        "DELETE FROM t WHERE b IN (SELECT c)",
        "INSERT INTO t SELECT 1",
        "UPDATE t SET a = (SELECT ROW_NUMBER() FROM u)",
    ] {
        let result = check(sql);
        assert!(result.valid, "{sql}: {:?}", result.errors);
    }
}

#[test]
fn dml_errors() {
    assert_eq!(
        check("UPDATE sflight WHERE carrid = 'AA'").errors,
        vec!["UPDATE statement requires SET clause"]
    );
    assert_eq!(
        check("INSERT INTO sflight").errors,
        vec!["INSERT statement requires VALUES clause or SELECT query"]
    );
    assert_eq!(
        check("DELETE WHERE carrid = 'AA'").errors,
        vec!["DELETE statement requires target table"]
    );
}

#[test]
fn syntax_errors_are_reported_not_raised() {
    for sql in ["", "   ", "SELECT FROM WHERE", "SELECT (", "'unterminated", "\u{0}"] {
        let result = check(sql);
        assert!(!result.valid, "{sql:?}");
        assert!(!result.errors.is_empty());
        assert!(result.ast.is_none());
    }
}

#[test]
fn generic_dialect_has_no_warnings() {
    assert!(check("SELECT * FROM sflight").warnings.is_empty());
}

#[test]
fn analysis_of_simple_query() {
    let result =
        SqlChecker::generic().analyze_query("SELECT carrid, connid FROM sflight WHERE carrid = 'AA'");
    assert!(result.valid);
    assert_eq!(result.analysis.statement_type, Some(StatementType::Select));
    assert_eq!(result.analysis.tables, vec!["sflight"]);
    assert_eq!(result.analysis.columns, vec!["carrid", "connid"]);
    assert!(result.analysis.has_clause(Clause::Where));
    assert!(!result.analysis.has_clause(Clause::Join));
}

#[test]
fn analysis_of_invalid_query_is_empty() {
    let result = SqlChecker::generic().analyze_query("SELECT FROM WHERE");
    assert!(!result.valid);
    assert!(result.analysis.tables.is_empty());
    assert_eq!(result.analysis.statement_type, None);
}

#[test]
fn analysis_serializes_flat() {
    let result = SqlChecker::generic().analyze_query("SELECT a FROM t JOIN u ON t.id = u.id");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["dialect"], "generic");
    assert_eq!(json["tables"], serde_json::json!(["t", "u"]));
    assert_eq!(json["statement_type"], "Select");
    assert!(json.get("analysis").is_none());
}

#[test]
fn config_from_json() {
    let config: CheckerConfig =
        serde_json::from_str(r#"{"emit_warnings": false, "max_nesting_depth": 8}"#).unwrap();
    let checker = SqlChecker::with_config(GenericDialect::new(), config);
    let sql = format!("SELECT {}1{} FROM t", "(".repeat(20), ")".repeat(20));
    let result = checker.check_syntax(&sql);
    assert!(!result.valid);
    assert!(result.errors[0].starts_with("Unexpected error: "));
}

#[test]
fn batch_keeps_order() {
    let queries = vec![
        String::from("SELECT a FROM t"),
        String::from("DELETE"),
        String::from("UPDATE t SET a = 1"),
    ];
    let results = SqlChecker::generic().batch_check(&queries);
    let summary: Vec<(&str, bool)> = results.iter().map(|r| (r.sql.as_str(), r.valid)).collect();
    assert_eq!(
        summary,
        vec![
            ("SELECT a FROM t", true),
            ("DELETE", false),
            ("UPDATE t SET a = 1", true),
        ]
    );
}
