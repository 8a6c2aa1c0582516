//! Semantic validation of parsed statements.
//!
//! The parser accepts some statements the grammar cannot reject on its own
//! (a `SELECT` without `FROM`, a join without a condition, `UPDATE` without
//! `SET`). The [`Validator`] dispatches on the root statement kind and
//! reports each problem as an error message. Best-practice hints are reported
//! separately as warnings and never affect validity.
//!
//! The query rules (FROM, join conditions, window application) apply when
//! the root is a `SELECT`; they then cover every nested query. A scalar or
//! `EXISTS` subquery may omit `FROM`.

use serde::Serialize;

use crate::ast::{
    BuiltinFunction, DeleteStatement, Expr, InsertStatement, Node, NodeKind, SelectStatement,
    Statement, UpdateStatement,
};
use crate::dialect::Dialect;

const WILDCARD_WARNING: &str =
    "Using SELECT * is discouraged in ABAP SQL. Specify explicit columns.";
const SINGLE_WARNING: &str = "SELECT SINGLE should have a WHERE clause with key fields.";
const UNBOUNDED_WARNING: &str = "Consider adding WHERE clause or LIMIT to restrict result set.";

/// Outcome of validating one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// Semantic errors, in tree order.
    pub errors: Vec<String>,
    /// Best-practice warnings.
    pub warnings: Vec<String>,
}

impl Validation {
    /// Whether no errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks the semantic rules of a parsed statement.
pub struct Validator<'a> {
    dialect: &'a dyn Dialect,
    emit_warnings: bool,
}

impl<'a> Validator<'a> {
    /// Creates a validator for `dialect`. Warnings follow
    /// [`Dialect::emits_advisories`].
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            emit_warnings: true,
        }
    }

    /// Enables or disables warnings.
    #[must_use]
    pub const fn with_warnings(mut self, emit_warnings: bool) -> Self {
        self.emit_warnings = emit_warnings;
        self
    }

    /// Validates `statement`.
    #[must_use]
    pub fn validate(&self, statement: &Statement) -> Validation {
        let mut validation = Validation::default();

        match statement {
            Statement::Select(select) => {
                check_query(select, &mut validation.errors);
                if self.emit_warnings && self.dialect.emits_advisories() {
                    validation.warnings = advisories(select);
                }
            }
            Statement::Insert(insert) => check_insert(insert, &mut validation.errors),
            Statement::Update(update) => check_update(update, &mut validation.errors),
            Statement::Delete(delete) => check_delete(delete, &mut validation.errors),
        }

        validation
    }
}

fn check_insert(insert: &InsertStatement, errors: &mut Vec<String>) {
    if insert.source.is_none() {
        errors.push(String::from(
            "INSERT statement requires VALUES clause or SELECT query",
        ));
    }
}

fn check_update(update: &UpdateStatement, errors: &mut Vec<String>) {
    if update.assignments.is_empty() {
        errors.push(String::from("UPDATE statement requires SET clause"));
    }
}

fn check_delete(delete: &DeleteStatement, errors: &mut Vec<String>) {
    if !delete.has_target() {
        errors.push(String::from("DELETE statement requires target table"));
    }
}

/// Rules for a statement-level query and every query nested in it.
fn check_query(root: &SelectStatement, errors: &mut Vec<String>) {
    Node::Select(root).walk(&mut |node, ancestors| match node {
        Node::Select(select) => {
            if select.from.is_none() && !is_expression_query(ancestors) {
                errors.push(String::from("Missing FROM clause in SELECT statement"));
            }
        }
        Node::Join(join) => {
            if join.join_type.requires_condition() && !join.has_condition() {
                errors.push(format!("{} requires ON condition", join.join_type.as_str()));
            }
        }
        Node::Expr(expr) => {
            if let Some(name) = window_function_name(expr) {
                let applied = ancestors.iter().any(|a| a.kind() == NodeKind::Window);
                if !applied {
                    errors.push(format!("Window function {name}() requires OVER clause"));
                }
            }
        }
        Node::Insert(_)
        | Node::Update(_)
        | Node::Delete(_)
        | Node::TableRef(_) => {}
    });
}

/// Whether the innermost ancestor makes the query a scalar or `EXISTS`
/// operand.
fn is_expression_query(ancestors: &[Node<'_>]) -> bool {
    matches!(
        ancestors.last(),
        Some(Node::Expr(Expr::Subquery(_) | Expr::Exists(_)))
    )
}

/// Upper-case name of a call that is only meaningful over a window.
fn window_function_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Function(call) if call.func.is_window_only() => {
            Some(call.func.as_str().to_string())
        }
        Expr::Anonymous(call) => BuiltinFunction::from_name(&call.name)
            .filter(BuiltinFunction::is_window_only)
            .map(|func| func.as_str().to_string()),
        _ => None,
    }
}

/// Best-practice hints for the statement-level SELECT.
fn advisories(select: &SelectStatement) -> Vec<String> {
    let mut warnings = Vec::new();

    let wildcard = select
        .columns
        .iter()
        .any(|c| matches!(c.expr, Expr::Wildcard { .. }));
    if wildcard {
        warnings.push(String::from(WILDCARD_WARNING));
    }

    if select.flags.single && select.where_clause.is_none() {
        warnings.push(String::from(SINGLE_WARNING));
    }

    if select.where_clause.is_none() && !select.has_row_limit() {
        warnings.push(String::from(UNBOUNDED_WARNING));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        AnonymousCall, InsertSource, JoinClause, JoinType, SelectColumn, TableRef,
        UpdateAssignment, WindowSpec,
    };
    use crate::dialect::GenericDialect;

    struct AdvisoryDialect;

    impl Dialect for AdvisoryDialect {
        fn name(&self) -> &'static str {
            "advisory"
        }

        fn emits_advisories(&self) -> bool {
            true
        }
    }

    fn select(columns: Vec<Expr>, from: Option<TableRef>) -> SelectStatement {
        SelectStatement {
            columns: columns
                .into_iter()
                .map(|expr| SelectColumn { expr, alias: None })
                .collect(),
            from,
            ..SelectStatement::default()
        }
    }

    fn validate(statement: &Statement) -> Validation {
        Validator::new(&GenericDialect).validate(statement)
    }

    #[test]
    fn test_missing_from() {
        let stmt = Statement::Select(select(vec![Expr::column("a")], None));
        let validation = validate(&stmt);
        assert_eq!(
            validation.errors,
            vec!["Missing FROM clause in SELECT statement"]
        );
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_derived_table_without_from() {
        let inner = select(vec![Expr::integer(1)], None);
        let from = TableRef::Subquery {
            query: Box::new(inner),
            alias: Some(String::from("x")),
        };
        let stmt = Statement::Select(select(vec![Expr::column("a")], Some(from)));
        assert_eq!(
            validate(&stmt).errors,
            vec!["Missing FROM clause in SELECT statement"]
        );
    }

    #[test]
    fn test_scalar_and_exists_subqueries_may_omit_from() {
        let mut stmt = select(
            vec![Expr::Subquery(Box::new(select(vec![Expr::integer(1)], None)))],
            Some(TableRef::table("sflight")),
        );
        stmt.where_clause = Some(Expr::Exists(Box::new(select(
            vec![Expr::integer(1)],
            None,
        ))));
        assert!(validate(&Statement::Select(stmt)).is_valid());
    }

    #[test]
    fn test_join_without_condition() {
        let from = TableRef::Join {
            left: Box::new(TableRef::table("scarr")),
            join: Box::new(JoinClause {
                join_type: JoinType::Left,
                table: TableRef::table("spfli"),
                on: None,
                using: vec![],
            }),
        };
        let stmt = Statement::Select(select(vec![Expr::column("carrid")], Some(from)));
        assert_eq!(
            validate(&stmt).errors,
            vec!["LEFT JOIN requires ON condition"]
        );
    }

    #[test]
    fn test_cross_join_needs_no_condition() {
        let from = TableRef::Join {
            left: Box::new(TableRef::table("scarr")),
            join: Box::new(JoinClause {
                join_type: JoinType::Cross,
                table: TableRef::table("spfli"),
                on: None,
                using: vec![],
            }),
        };
        let stmt = Statement::Select(select(vec![Expr::column("carrid")], Some(from)));
        assert!(validate(&stmt).is_valid());
    }

    #[test]
    fn test_window_function_requires_over() {
        let bare = Expr::call(BuiltinFunction::RowNumber, vec![]);
        let lag = Expr::Anonymous(AnonymousCall {
            name: String::from("lag"),
            args: vec![Expr::column("price")],
            distinct: false,
        });
        let applied = Expr::Window {
            function: Box::new(Expr::call(BuiltinFunction::Rank, vec![])),
            spec: WindowSpec::default(),
        };
        let stmt = Statement::Select(select(
            vec![bare, lag, applied],
            Some(TableRef::table("sflight")),
        ));
        assert_eq!(
            validate(&stmt).errors,
            vec![
                "Window function ROW_NUMBER() requires OVER clause",
                "Window function LAG() requires OVER clause",
            ]
        );
    }

    #[test]
    fn test_dml_rules() {
        let insert = Statement::Insert(InsertStatement {
            schema: None,
            table: String::from("sflight"),
            columns: vec![],
            source: None,
        });
        assert_eq!(
            validate(&insert).errors,
            vec!["INSERT statement requires VALUES clause or SELECT query"]
        );

        let update = Statement::Update(UpdateStatement {
            schema: None,
            table: String::from("sflight"),
            alias: None,
            assignments: vec![],
            from: None,
            where_clause: None,
        });
        assert_eq!(
            validate(&update).errors,
            vec!["UPDATE statement requires SET clause"]
        );

        let delete = Statement::Delete(DeleteStatement {
            target: None,
            from: None,
            using: vec![],
            where_clause: None,
        });
        assert_eq!(
            validate(&delete).errors,
            vec!["DELETE statement requires target table"]
        );
    }

    #[test]
    fn test_query_rules_apply_to_select_roots_only() {
        let insert = Statement::Insert(InsertStatement {
            schema: None,
            table: String::from("archive"),
            columns: vec![],
            source: Some(InsertSource::Query(Box::new(select(
                vec![Expr::column("a")],
                None,
            )))),
        });
        assert!(validate(&insert).is_valid());

        let update = Statement::Update(UpdateStatement {
            schema: None,
            table: String::from("sflight"),
            alias: None,
            assignments: vec![UpdateAssignment {
                column: String::from("price"),
                value: Expr::integer(1),
            }],
            from: None,
            where_clause: None,
        });
        assert!(validate(&update).is_valid());
    }

    #[test]
    fn test_advisories() {
        let mut stmt = select(vec![Expr::Wildcard { table: None }], Some(TableRef::table("t")));
        stmt.flags.single = true;
        let validation = Validator::new(&AdvisoryDialect).validate(&Statement::Select(stmt));
        assert!(validation.is_valid());
        assert_eq!(
            validation.warnings,
            vec![WILDCARD_WARNING, SINGLE_WARNING, UNBOUNDED_WARNING]
        );
    }

    #[test]
    fn test_row_limit_silences_unbounded_warning() {
        let mut stmt = select(vec![Expr::column("a")], Some(TableRef::table("t")));
        stmt.flags.up_to_rows = Some(10);
        let validation = Validator::new(&AdvisoryDialect).validate(&Statement::Select(stmt));
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_warnings_can_be_disabled() {
        let stmt = Statement::Select(select(
            vec![Expr::Wildcard { table: None }],
            Some(TableRef::table("t")),
        ));
        let validation = Validator::new(&AdvisoryDialect)
            .with_warnings(false)
            .validate(&stmt);
        assert!(validation.warnings.is_empty());
        assert!(validate(&stmt).warnings.is_empty());
    }
}
