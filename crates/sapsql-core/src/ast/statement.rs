//! SQL statement AST types.

use serde::Serialize;

use super::expression::Expr;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction, when written.
    pub direction: Option<OrderDirection>,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
    /// Comma-separated table list entry.
    Implicit,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Implicit => ",",
        }
    }

    /// Whether a join condition is required.
    #[must_use]
    pub const fn requires_condition(&self) -> bool {
        !matches!(self, Self::Cross | Self::Implicit)
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableRef,
    /// The join condition.
    pub on: Option<Expr>,
    /// USING columns (alternative to ON).
    pub using: Vec<String>,
}

impl JoinClause {
    /// Whether the join has an ON or USING condition.
    #[must_use]
    pub fn has_condition(&self) -> bool {
        self.on.is_some() || !self.using.is_empty()
    }
}

/// A table reference in FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A table or dialect object.
    Table {
        /// Schema name (optional).
        schema: Option<String>,
        /// Table name. Fully qualified object names are kept whole.
        name: String,
        /// Alias.
        alias: Option<String>,
        /// Whether the name refers to a dialect business object.
        object: bool,
    },
    /// A derived table.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias.
        alias: Option<String>,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
    },
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            schema: None,
            name: name.into(),
            alias: None,
            object: false,
        }
    }
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    /// CTE name.
    pub name: String,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// The defining query.
    pub query: Box<SelectStatement>,
}

/// `WITH [RECURSIVE] cte, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    /// Whether RECURSIVE was specified.
    pub recursive: bool,
    /// The CTEs, in declaration order.
    pub ctes: Vec<Cte>,
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    /// UNION
    Union,
    /// INTERSECT
    Intersect,
    /// EXCEPT
    Except,
}

impl SetOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A set operation applied to the preceding query.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    /// The operator.
    pub op: SetOperator,
    /// Whether ALL was specified.
    pub all: bool,
    /// The right operand.
    pub select: Box<SelectStatement>,
}

/// Shape of an ABAP `INTO`/`APPENDING` target clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntoKind {
    /// `INTO @a` or `INTO (@a, @b)`
    Fields,
    /// `INTO TABLE @t` / `APPENDING TABLE @t`
    Table,
    /// `INTO CORRESPONDING FIELDS OF @s`
    CorrespondingFields,
    /// `INTO|APPENDING CORRESPONDING FIELDS OF TABLE @t`
    CorrespondingTable,
}

/// An `INTO` or `APPENDING` target.
#[derive(Debug, Clone, PartialEq)]
pub struct IntoClause {
    /// Target shape.
    pub kind: IntoKind,
    /// Target variables.
    pub targets: Vec<Expr>,
}

/// Dialect modifiers of a `SELECT`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectFlags {
    /// `SELECT SINGLE`
    pub single: bool,
    /// `UP TO n ROWS`
    pub up_to_rows: Option<u64>,
    /// `BYPASSING BUFFER`
    pub bypassing_buffer: bool,
    /// `CLIENT SPECIFIED`
    pub client_specified: bool,
    /// `FOR UPDATE`
    pub for_update: bool,
    /// `PACKAGE SIZE n`
    pub package_size: Option<u64>,
    /// `INTO ...`
    pub into: Option<IntoClause>,
    /// `APPENDING ...`
    pub appending: Option<IntoClause>,
}

/// A SELECT statement.
///
/// For a statement with set operations, `order_by`, `limit` and `offset`
/// apply to the whole compound query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The columns to select.
    pub columns: Vec<SelectColumn>,
    /// The FROM clause.
    pub from: Option<TableRef>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// Set operations, applied left to right.
    pub set_operations: Vec<SetOperation>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT (or FETCH FIRST) row count.
    pub limit: Option<Expr>,
    /// OFFSET clause.
    pub offset: Option<Expr>,
    /// Dialect modifiers.
    pub flags: SelectFlags,
}

impl SelectStatement {
    /// Whether the number of returned rows is bounded by LIMIT, FETCH or
    /// `UP TO n ROWS`.
    #[must_use]
    pub const fn has_row_limit(&self) -> bool {
        self.limit.is_some() || self.flags.up_to_rows.is_some()
    }
}

/// A column in SELECT clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// Values to insert; `None` when the statement has neither VALUES nor a
    /// query.
    pub source: Option<InsertSource>,
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// VALUES (...), (...), ...
    Values(Vec<Vec<Expr>>),
    /// SELECT ...
    Query(Box<SelectStatement>),
    /// DEFAULT VALUES
    DefaultValues,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// Alias.
    pub alias: Option<String>,
    /// SET assignments; empty when the SET clause is missing.
    pub assignments: Vec<UpdateAssignment>,
    /// FROM clause (for joins in UPDATE).
    pub from: Option<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAssignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: Expr,
}

/// A DELETE statement.
///
/// The target may be named directly (`DELETE t`), in FROM, or in USING.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// Table named directly after DELETE.
    pub target: Option<TableRef>,
    /// FROM clause.
    pub from: Option<TableRef>,
    /// USING tables.
    pub using: Vec<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

impl DeleteStatement {
    /// Whether any target table is named.
    #[must_use]
    pub fn has_target(&self) -> bool {
        self.target.is_some() || self.from.is_some() || !self.using.is_empty()
    }
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
}

/// The kind of a [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatementType {
    /// SELECT
    Select,
    /// INSERT
    Insert,
    /// UPDATE
    Update,
    /// DELETE
    Delete,
}

impl Statement {
    /// Returns the statement kind.
    #[must_use]
    pub const fn statement_type(&self) -> StatementType {
        match self {
            Self::Select(_) => StatementType::Select,
            Self::Insert(_) => StatementType::Insert,
            Self::Update(_) => StatementType::Update,
            Self::Delete(_) => StatementType::Delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_type() {
        assert_eq!(JoinType::Inner.as_str(), "INNER JOIN");
        assert!(JoinType::Left.requires_condition());
        assert!(!JoinType::Cross.requires_condition());
        assert!(!JoinType::Implicit.requires_condition());
    }

    #[test]
    fn test_join_condition() {
        let mut join = JoinClause {
            join_type: JoinType::Inner,
            table: TableRef::table("spfli"),
            on: None,
            using: vec![],
        };
        assert!(!join.has_condition());
        join.using.push(String::from("carrid"));
        assert!(join.has_condition());
    }

    #[test]
    fn test_row_limit() {
        let mut select = SelectStatement::default();
        assert!(!select.has_row_limit());
        select.flags.up_to_rows = Some(10);
        assert!(select.has_row_limit());
    }

    #[test]
    fn test_delete_target() {
        let mut delete = DeleteStatement {
            target: None,
            from: None,
            using: vec![],
            where_clause: None,
        };
        assert!(!delete.has_target());
        delete.from = Some(TableRef::table("sflight"));
        assert!(delete.has_target());
    }
}
