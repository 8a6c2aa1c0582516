//! SQL text generation from the AST.
//!
//! Output is canonical rather than faithful: keywords are upper case, clauses
//! come in a fixed order and optional noise words are dropped. Parsing the
//! generated text with the same dialect yields an equivalent statement.

use core::fmt;

use crate::ast::{
    DeleteStatement, Expr, FrameBound, FrameUnits, InSource, InsertSource, InsertStatement,
    IntoClause, IntoKind, JoinType, Literal, OrderBy, ParameterStyle, SelectStatement, Statement,
    TableRef, UnaryOp, UpdateStatement, WindowSpec,
};
use crate::dialect::{Dialect, GENERIC, SelectPrefix, SuffixClause};

/// Renders statements and expressions as SQL text for one dialect.
pub struct Generator<'a> {
    dialect: &'a dyn Dialect,
    pretty: bool,
}

impl<'a> Generator<'a> {
    /// Creates a generator. In pretty mode every clause starts on its own
    /// line and projections are indented.
    #[must_use]
    pub const fn new(dialect: &'a dyn Dialect, pretty: bool) -> Self {
        Self { dialect, pretty }
    }

    /// Renders a statement.
    #[must_use]
    pub fn statement(&self, statement: &Statement) -> String {
        match statement {
            Statement::Select(select) => self.select(select),
            Statement::Insert(insert) => self.insert(insert),
            Statement::Update(update) => self.update(update),
            Statement::Delete(delete) => self.delete(delete),
        }
    }

    /// Separator placed before a clause.
    const fn sep(&self) -> &'static str {
        if self.pretty { "\n" } else { " " }
    }

    fn push_clause(&self, sql: &mut String, clause: &str) {
        sql.push_str(self.sep());
        sql.push_str(clause);
    }

    fn supports(&self, clause: SuffixClause) -> bool {
        self.dialect.suffix_clauses().contains(&clause)
    }

    /// Renders a SELECT statement.
    #[must_use]
    pub fn select(&self, select: &SelectStatement) -> String {
        let mut sql = String::new();

        if let Some(with) = &select.with {
            sql.push_str("WITH ");
            if with.recursive {
                sql.push_str("RECURSIVE ");
            }
            let ctes: Vec<String> = with
                .ctes
                .iter()
                .map(|cte| {
                    let columns = if cte.columns.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", cte.columns.join(", "))
                    };
                    format!("{}{columns} AS ({})", cte.name, self.select(&cte.query))
                })
                .collect();
            sql.push_str(&ctes.join(", "));
            sql.push_str(self.sep());
        }

        sql.push_str("SELECT");
        if select.flags.single && self.dialect.select_prefixes().contains(&SelectPrefix::Single)
        {
            sql.push_str(" SINGLE");
        }
        if select.distinct {
            sql.push_str(" DISTINCT");
        }

        let columns: Vec<String> = select
            .columns
            .iter()
            .map(|column| match &column.alias {
                Some(alias) => format!("{} AS {alias}", self.expr(&column.expr)),
                None => self.expr(&column.expr),
            })
            .collect();
        if self.pretty {
            sql.push_str("\n  ");
            sql.push_str(&columns.join(",\n  "));
        } else {
            sql.push(' ');
            sql.push_str(&columns.join(", "));
        }

        if let Some(into) = &select.flags.into {
            if self.supports(SuffixClause::Into) {
                self.push_clause(&mut sql, &format!("INTO {}", self.target(into)));
            }
        }
        if let Some(appending) = &select.flags.appending {
            if self.supports(SuffixClause::Appending) {
                self.push_clause(&mut sql, &format!("APPENDING {}", self.target(appending)));
            }
        }

        if let Some(from) = &select.from {
            self.push_clause(&mut sql, &format!("FROM {}", self.table_ref(from)));
        }
        if let Some(where_clause) = &select.where_clause {
            self.push_clause(&mut sql, &format!("WHERE {}", self.expr(where_clause)));
        }
        if !select.group_by.is_empty() {
            self.push_clause(&mut sql, &format!("GROUP BY {}", self.expr_list(&select.group_by)));
        }
        if let Some(having) = &select.having {
            self.push_clause(&mut sql, &format!("HAVING {}", self.expr(having)));
        }

        for operation in &select.set_operations {
            let mut op = String::from(operation.op.as_str());
            if operation.all {
                op.push_str(" ALL");
            }
            self.push_clause(&mut sql, &op);
            let operand = self.select(&operation.select);
            let compound = operation.select.with.is_some()
                || !operation.select.set_operations.is_empty()
                || !operation.select.order_by.is_empty()
                || operation.select.limit.is_some()
                || operation.select.offset.is_some();
            if compound {
                self.push_clause(&mut sql, &format!("({operand})"));
            } else {
                self.push_clause(&mut sql, &operand);
            }
        }

        if !select.order_by.is_empty() {
            self.push_clause(&mut sql, &format!("ORDER BY {}", self.order_by(&select.order_by)));
        }
        if let Some(limit) = &select.limit {
            self.push_clause(&mut sql, &format!("LIMIT {}", self.expr(limit)));
        }
        if let Some(offset) = &select.offset {
            self.push_clause(&mut sql, &format!("OFFSET {}", self.expr(offset)));
        }

        if let Some(rows) = select.flags.up_to_rows {
            if self.supports(SuffixClause::UpToRows) {
                self.push_clause(&mut sql, &format!("UP TO {rows} ROWS"));
            } else if select.limit.is_none() {
                self.push_clause(&mut sql, &format!("LIMIT {rows}"));
            }
        }
        if select.flags.bypassing_buffer && self.supports(SuffixClause::BypassingBuffer) {
            self.push_clause(&mut sql, "BYPASSING BUFFER");
        }
        if select.flags.client_specified && self.supports(SuffixClause::ClientSpecified) {
            self.push_clause(&mut sql, "CLIENT SPECIFIED");
        }
        if select.flags.for_update && self.supports(SuffixClause::ForUpdate) {
            self.push_clause(&mut sql, "FOR UPDATE");
        }
        if let Some(size) = select.flags.package_size {
            if self.supports(SuffixClause::PackageSize) {
                self.push_clause(&mut sql, &format!("PACKAGE SIZE {size}"));
            }
        }

        sql
    }

    fn target(&self, into: &IntoClause) -> String {
        let targets = self.expr_list(&into.targets);
        match into.kind {
            IntoKind::Fields if into.targets.len() > 1 => format!("({targets})"),
            IntoKind::Fields => targets,
            IntoKind::Table => format!("TABLE {targets}"),
            IntoKind::CorrespondingFields => format!("CORRESPONDING FIELDS OF {targets}"),
            IntoKind::CorrespondingTable => format!("CORRESPONDING FIELDS OF TABLE {targets}"),
        }
    }

    fn order_by(&self, items: &[OrderBy]) -> String {
        let items: Vec<String> = items
            .iter()
            .map(|item| {
                let mut sql = self.expr(&item.expr);
                if let Some(direction) = item.direction {
                    sql.push(' ');
                    sql.push_str(direction.as_str());
                }
                if let Some(nulls) = item.nulls {
                    sql.push(' ');
                    sql.push_str(nulls.as_str());
                }
                sql
            })
            .collect();
        items.join(", ")
    }

    fn table_ref(&self, table: &TableRef) -> String {
        match table {
            TableRef::Table {
                schema,
                name,
                alias,
                ..
            } => {
                let mut sql = match schema {
                    Some(schema) => format!("{schema}.{name}"),
                    None => name.clone(),
                };
                if let Some(alias) = alias {
                    sql.push_str(" AS ");
                    sql.push_str(alias);
                }
                sql
            }
            TableRef::Subquery { query, alias } => {
                let mut sql = format!("({})", self.select(query));
                if let Some(alias) = alias {
                    sql.push_str(" AS ");
                    sql.push_str(alias);
                }
                sql
            }
            TableRef::Join { left, join } => {
                let mut sql = self.table_ref(left);
                let right = match &join.table {
                    nested @ TableRef::Join { .. } => format!("({})", self.table_ref(nested)),
                    other => self.table_ref(other),
                };
                if join.join_type == JoinType::Implicit {
                    sql.push_str(", ");
                    sql.push_str(&right);
                    return sql;
                }
                sql.push_str(self.sep());
                sql.push_str(join.join_type.as_str());
                sql.push(' ');
                sql.push_str(&right);
                if let Some(on) = &join.on {
                    sql.push_str(" ON ");
                    sql.push_str(&self.expr(on));
                } else if !join.using.is_empty() {
                    sql.push_str(&format!(" USING ({})", join.using.join(", ")));
                }
                sql
            }
        }
    }

    fn insert(&self, insert: &InsertStatement) -> String {
        let mut sql = String::from("INSERT INTO ");
        if let Some(schema) = &insert.schema {
            sql.push_str(schema);
            sql.push('.');
        }
        sql.push_str(&insert.table);
        if !insert.columns.is_empty() {
            sql.push_str(&format!(" ({})", insert.columns.join(", ")));
        }
        match &insert.source {
            Some(InsertSource::Values(rows)) => {
                let rows: Vec<String> = rows
                    .iter()
                    .map(|row| format!("({})", self.expr_list(row)))
                    .collect();
                self.push_clause(&mut sql, &format!("VALUES {}", rows.join(", ")));
            }
            Some(InsertSource::Query(query)) => {
                self.push_clause(&mut sql, &self.select(query));
            }
            Some(InsertSource::DefaultValues) => self.push_clause(&mut sql, "DEFAULT VALUES"),
            None => {}
        }
        sql
    }

    fn update(&self, update: &UpdateStatement) -> String {
        let mut sql = String::from("UPDATE ");
        if let Some(schema) = &update.schema {
            sql.push_str(schema);
            sql.push('.');
        }
        sql.push_str(&update.table);
        if let Some(alias) = &update.alias {
            sql.push_str(" AS ");
            sql.push_str(alias);
        }
        if !update.assignments.is_empty() {
            let assignments: Vec<String> = update
                .assignments
                .iter()
                .map(|a| format!("{} = {}", a.column, self.expr(&a.value)))
                .collect();
            self.push_clause(&mut sql, &format!("SET {}", assignments.join(", ")));
        }
        if let Some(from) = &update.from {
            self.push_clause(&mut sql, &format!("FROM {}", self.table_ref(from)));
        }
        if let Some(where_clause) = &update.where_clause {
            self.push_clause(&mut sql, &format!("WHERE {}", self.expr(where_clause)));
        }
        sql
    }

    fn delete(&self, delete: &DeleteStatement) -> String {
        let mut sql = String::from("DELETE");
        if let Some(target) = &delete.target {
            sql.push(' ');
            sql.push_str(&self.table_ref(target));
        }
        if let Some(from) = &delete.from {
            self.push_clause(&mut sql, &format!("FROM {}", self.table_ref(from)));
        }
        if !delete.using.is_empty() {
            let using: Vec<String> = delete.using.iter().map(|t| self.table_ref(t)).collect();
            self.push_clause(&mut sql, &format!("USING {}", using.join(", ")));
        }
        if let Some(where_clause) = &delete.where_clause {
            self.push_clause(&mut sql, &format!("WHERE {}", self.expr(where_clause)));
        }
        sql
    }

    fn expr_list(&self, exprs: &[Expr]) -> String {
        let items: Vec<String> = exprs.iter().map(|e| self.expr(e)).collect();
        items.join(", ")
    }

    /// Qualifier separator for a column or wildcard qualified by `table`.
    fn qualifier(&self, table: &str) -> &'static str {
        if table.contains('.') {
            "."
        } else {
            self.dialect.column_qualifier()
        }
    }

    /// Renders an expression.
    #[must_use]
    pub fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => literal_sql(literal),
            Expr::Column { table, name, .. } => match table {
                Some(table) => format!("{table}{}{name}", self.qualifier(table)),
                None => name.clone(),
            },
            Expr::Binary { left, op, right } => {
                format!("{} {} {}", self.expr(left), op.as_str(), self.expr(right))
            }
            Expr::Unary { op, operand } => {
                let operand = self.expr(operand);
                match op {
                    UnaryOp::Not => format!("NOT {operand}"),
                    // "- -1", never the comment marker "--1"
                    UnaryOp::Neg if operand.starts_with('-') => format!("- {operand}"),
                    UnaryOp::Neg | UnaryOp::BitNot => format!("{}{operand}", op.as_str()),
                }
            }
            Expr::Function(call) => self.call(call.func.as_str(), &call.args, call.distinct),
            Expr::Anonymous(call) => self.call(&call.name, &call.args, call.distinct),
            Expr::Window { function, spec } => {
                format!("{} OVER {}", self.expr(function), self.window(spec))
            }
            Expr::Subquery(query) => format!("({})", self.select(query)),
            Expr::Exists(query) => format!("EXISTS ({})", self.select(query)),
            Expr::IsNull { expr, negated } => {
                let not = if *negated { " NOT" } else { "" };
                format!("{} IS{not} NULL", self.expr(expr))
            }
            Expr::Is {
                expr,
                target,
                negated,
            } => {
                let not = if *negated { " NOT" } else { "" };
                format!("{} IS{not} {}", self.expr(expr), self.expr(target))
            }
            Expr::In {
                expr,
                source,
                negated,
            } => {
                let not = if *negated { " NOT" } else { "" };
                let source = match source {
                    InSource::List(items) => format!("({})", self.expr_list(items)),
                    InSource::Subquery(query) => format!("({})", self.select(query)),
                    InSource::Parameter(param) => self.expr(param),
                };
                format!("{}{not} IN {source}", self.expr(expr))
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                let not = if *negated { " NOT" } else { "" };
                format!(
                    "{}{not} BETWEEN {} AND {}",
                    self.expr(expr),
                    self.expr(low),
                    self.expr(high)
                )
            }
            Expr::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                let mut sql = String::from("CASE");
                if let Some(operand) = operand {
                    sql.push(' ');
                    sql.push_str(&self.expr(operand));
                }
                for (when, then) in when_clauses {
                    sql.push_str(&format!(" WHEN {} THEN {}", self.expr(when), self.expr(then)));
                }
                if let Some(else_clause) = else_clause {
                    sql.push_str(&format!(" ELSE {}", self.expr(else_clause)));
                }
                sql.push_str(" END");
                sql
            }
            Expr::Cast { expr, data_type } => format!("CAST({} AS {data_type})", self.expr(expr)),
            Expr::Extract { field, expr } => format!("EXTRACT({field} FROM {})", self.expr(expr)),
            Expr::Interval { value, unit } => match unit {
                Some(unit) => format!("INTERVAL {} {unit}", self.expr(value)),
                None => format!("INTERVAL {}", self.expr(value)),
            },
            Expr::DateTime(value) => value.as_str().to_string(),
            Expr::Paren(inner) => format!("({})", self.expr(inner)),
            Expr::Parameter { style, name, .. } => match (style, name) {
                (ParameterStyle::Named, Some(name)) => format!(":{name}"),
                (ParameterStyle::Host, Some(name)) => format!("@{name}"),
                _ => String::from("?"),
            },
            Expr::Wildcard { table } => match table {
                Some(table) => format!("{table}{}*", self.qualifier(table)),
                None => String::from("*"),
            },
        }
    }

    fn call(&self, name: &str, args: &[Expr], distinct: bool) -> String {
        let distinct = if distinct { "DISTINCT " } else { "" };
        format!("{name}({distinct}{})", self.expr_list(args))
    }

    fn window(&self, spec: &WindowSpec) -> String {
        if let Some(name) = &spec.name {
            return name.clone();
        }

        let mut parts = vec![];
        if !spec.partition_by.is_empty() {
            parts.push(format!("PARTITION BY {}", self.expr_list(&spec.partition_by)));
        }
        if !spec.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by(&spec.order_by)));
        }
        if let Some(frame) = &spec.frame {
            let units = match frame.units {
                FrameUnits::Rows => "ROWS",
                FrameUnits::Range => "RANGE",
            };
            let frame = match &frame.end {
                Some(end) => format!(
                    "{units} BETWEEN {} AND {}",
                    self.frame_bound(&frame.start),
                    self.frame_bound(end)
                ),
                None => format!("{units} {}", self.frame_bound(&frame.start)),
            };
            parts.push(frame);
        }
        format!("({})", parts.join(" "))
    }

    fn frame_bound(&self, bound: &FrameBound) -> String {
        match bound {
            FrameBound::UnboundedPreceding => String::from("UNBOUNDED PRECEDING"),
            FrameBound::Preceding(offset) => format!("{} PRECEDING", self.expr(offset)),
            FrameBound::CurrentRow => String::from("CURRENT ROW"),
            FrameBound::Following(offset) => format!("{} FOLLOWING", self.expr(offset)),
            FrameBound::UnboundedFollowing => String::from("UNBOUNDED FOLLOWING"),
        }
    }
}

fn literal_sql(literal: &Literal) -> String {
    match literal {
        Literal::Integer(n) => n.to_string(),
        Literal::Float(f) => format!("{f:?}"),
        Literal::String(s) => {
            // Escape single quotes by doubling them
            let escaped = s.replace('\'', "''");
            format!("'{escaped}'")
        }
        Literal::Boolean(true) => String::from("TRUE"),
        Literal::Boolean(false) => String::from("FALSE"),
        Literal::Null => String::from("NULL"),
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Generator::new(&GENERIC, false).statement(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Generator::new(&GENERIC, false).expr(self))
    }
}
