//! Structural summary of a parsed statement.

use serde::Serialize;

use crate::ast::{Expr, Node, SelectFlags, Statement, StatementType, TableRef};

/// A clause whose presence the analyzer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Clause {
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Join,
    SetOperation,
    With,
}

/// Dialect modifiers of the statement-level `SELECT`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DialectFeatures {
    pub single: bool,
    pub up_to_rows: Option<u64>,
    pub bypassing_buffer: bool,
    pub client_specified: bool,
    pub for_update: bool,
    pub package_size: Option<u64>,
    pub into: bool,
    pub appending: bool,
}

impl From<&SelectFlags> for DialectFeatures {
    fn from(flags: &SelectFlags) -> Self {
        Self {
            single: flags.single,
            up_to_rows: flags.up_to_rows,
            bypassing_buffer: flags.bypassing_buffer,
            client_specified: flags.client_specified,
            for_update: flags.for_update,
            package_size: flags.package_size,
            into: flags.into.is_some(),
            appending: flags.appending.is_some(),
        }
    }
}

/// What a statement touches.
///
/// Every list is deduplicated and keeps first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Kind of the statement; `None` when nothing was parsed.
    pub statement_type: Option<StatementType>,
    /// Table and object names, including DML targets.
    pub tables: Vec<String>,
    /// Referenced column names, without qualifier or quotes.
    pub columns: Vec<String>,
    /// Called functions, upper case.
    pub functions: Vec<String>,
    /// Clauses present anywhere in the statement.
    pub clauses: Vec<Clause>,
    /// Modifiers of the statement-level `SELECT`.
    pub features: DialectFeatures,
}

impl Analysis {
    /// Whether `clause` occurs anywhere in the statement.
    #[must_use]
    pub fn has_clause(&self, clause: Clause) -> bool {
        self.clauses.contains(&clause)
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Strips one pair of surrounding identifier quotes.
fn unquote(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if matches!((first, last), (b'"', b'"') | (b'`', b'`') | (b'[', b']')) {
            return &name[1..name.len() - 1];
        }
    }
    name
}

/// Summarizes `statement`. `None` yields an empty analysis.
#[must_use]
pub fn analyze(statement: Option<&Statement>) -> Analysis {
    let Some(statement) = statement else {
        return Analysis::default();
    };

    let mut analysis = Analysis {
        statement_type: Some(statement.statement_type()),
        ..Analysis::default()
    };

    match statement {
        Statement::Select(select) => analysis.features = DialectFeatures::from(&select.flags),
        Statement::Insert(insert) => {
            push_unique(&mut analysis.tables, unquote(&insert.table).to_string());
        }
        Statement::Update(update) => {
            push_unique(&mut analysis.tables, unquote(&update.table).to_string());
            if update.where_clause.is_some() {
                push_unique(&mut analysis.clauses, Clause::Where);
            }
            if update.from.is_some() {
                push_unique(&mut analysis.clauses, Clause::From);
            }
        }
        Statement::Delete(delete) => {
            if delete.from.is_some() {
                push_unique(&mut analysis.clauses, Clause::From);
            }
            if delete.where_clause.is_some() {
                push_unique(&mut analysis.clauses, Clause::Where);
            }
        }
    }

    Node::from(statement).walk(&mut |node, ancestors| {
        if !is_into_target(node, ancestors) {
            collect(node, &mut analysis);
        }
    });
    analysis
}

/// Host variables named in `INTO`/`APPENDING` receive rows; they are not
/// columns of the query.
fn is_into_target(node: Node<'_>, ancestors: &[Node<'_>]) -> bool {
    let (Node::Expr(expr), Some(Node::Select(select))) = (node, ancestors.last()) else {
        return false;
    };
    [&select.flags.into, &select.flags.appending]
        .into_iter()
        .flatten()
        .any(|target| target.targets.iter().any(|t| std::ptr::eq(t, expr)))
}

fn collect(node: Node<'_>, analysis: &mut Analysis) {
    match node {
        Node::Select(select) => {
            let present = [
                (select.with.is_some(), Clause::With),
                (select.from.is_some(), Clause::From),
                (select.where_clause.is_some(), Clause::Where),
                (!select.group_by.is_empty(), Clause::GroupBy),
                (select.having.is_some(), Clause::Having),
                (!select.set_operations.is_empty(), Clause::SetOperation),
                (!select.order_by.is_empty(), Clause::OrderBy),
                (select.has_row_limit(), Clause::Limit),
            ];
            for (is_present, clause) in present {
                if is_present {
                    push_unique(&mut analysis.clauses, clause);
                }
            }
        }
        Node::TableRef(TableRef::Table { name, .. }) => {
            push_unique(&mut analysis.tables, unquote(name).to_string());
        }
        Node::Join(_) => push_unique(&mut analysis.clauses, Clause::Join),
        Node::Expr(Expr::Column { name, .. }) => {
            push_unique(&mut analysis.columns, unquote(name).to_string());
        }
        Node::Expr(expr) => {
            if let Some(name) = expr.function_name() {
                push_unique(&mut analysis.functions, name);
            }
        }
        Node::Insert(_) | Node::Update(_) | Node::Delete(_) | Node::TableRef(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{IntoClause, IntoKind};
    use crate::parser::Parser;

    fn analyze_sql(sql: &str) -> Analysis {
        let stmt = Parser::new(sql).parse_statement().unwrap();
        analyze(Some(&stmt))
    }

    #[test]
    fn test_simple_select() {
        let analysis = analyze_sql("SELECT carrid, connid FROM sflight WHERE carrid = 'AA'");
        assert_eq!(analysis.statement_type, Some(StatementType::Select));
        assert_eq!(analysis.tables, vec!["sflight"]);
        assert_eq!(analysis.columns, vec!["carrid", "connid"]);
        assert!(analysis.has_clause(Clause::Where));
        assert!(!analysis.has_clause(Clause::Join));
    }

    #[test]
    fn test_join_subquery_and_functions() {
        let analysis = analyze_sql(
            "SELECT s.carrid, COUNT(*), upper(c.carrname) FROM sflight s \
             JOIN scarr c ON s.carrid = c.carrid \
             WHERE s.price > (SELECT AVG(price) FROM sbook) \
             GROUP BY s.carrid, c.carrname ORDER BY s.carrid",
        );
        assert_eq!(analysis.tables, vec!["sflight", "scarr", "sbook"]);
        assert_eq!(analysis.columns, vec!["carrid", "carrname", "price"]);
        assert_eq!(analysis.functions, vec!["COUNT", "UPPER", "AVG"]);
        assert!(analysis.has_clause(Clause::Join));
        assert!(analysis.has_clause(Clause::GroupBy));
        assert!(analysis.has_clause(Clause::OrderBy));
        assert!(!analysis.has_clause(Clause::Having));
    }

    #[test]
    fn test_quoted_names_are_unquoted() {
        let analysis = analyze_sql("SELECT \"Name\" FROM \"Order\"");
        assert_eq!(analysis.tables, vec!["Order"]);
        assert_eq!(analysis.columns, vec!["Name"]);
    }

    #[test]
    fn test_dml_targets() {
        let analysis = analyze_sql("UPDATE sflight SET price = price * 2 WHERE carrid = 'AA'");
        assert_eq!(analysis.statement_type, Some(StatementType::Update));
        assert_eq!(analysis.tables, vec!["sflight"]);
        assert_eq!(analysis.columns, vec!["price", "carrid"]);
        assert!(analysis.has_clause(Clause::Where));

        let analysis = analyze_sql("INSERT INTO archive SELECT * FROM sflight");
        assert_eq!(analysis.tables, vec!["archive", "sflight"]);

        let analysis = analyze_sql("DELETE FROM sflight");
        assert_eq!(analysis.tables, vec!["sflight"]);
        assert!(analysis.has_clause(Clause::From));
    }

    #[test]
    fn test_limit_with_and_set_operation() {
        let analysis = analyze_sql(
            "WITH t AS (SELECT a FROM x) SELECT a FROM t UNION SELECT b FROM y LIMIT 5",
        );
        assert!(analysis.has_clause(Clause::With));
        assert!(analysis.has_clause(Clause::SetOperation));
        assert!(analysis.has_clause(Clause::Limit));
        assert_eq!(analysis.tables, vec!["x", "t", "y"]);
    }

    #[test]
    fn test_into_targets_are_not_columns() {
        let mut stmt = Parser::new("SELECT carrid, connid FROM sflight WHERE carrid = 'AA'")
            .parse_statement()
            .unwrap();
        let Statement::Select(select) = &mut stmt else {
            panic!("expected SELECT");
        };
        select.flags.into = Some(IntoClause {
            kind: IntoKind::Fields,
            targets: vec![Expr::column("wa_carrid"), Expr::column("wa_connid")],
        });
        let analysis = analyze(Some(&stmt));
        assert_eq!(analysis.columns, vec!["carrid", "connid"]);
        assert!(analysis.features.into);
    }

    #[test]
    fn test_empty_analysis() {
        assert_eq!(analyze(None), Analysis::default());
    }

    #[test]
    fn test_serializes_to_json() {
        let analysis = analyze_sql("SELECT a FROM t");
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["statement_type"], "Select");
        assert_eq!(json["clauses"], serde_json::json!(["From"]));
        assert_eq!(json["features"]["up_to_rows"], serde_json::Value::Null);
    }
}
