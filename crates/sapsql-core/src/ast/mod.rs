//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! The tree is closed and owned: every node is reached through `Box`/`Vec`
//! from exactly one parent. [`node`] offers a borrowed, uniform view of the
//! tree for searches.

mod expression;
pub mod node;
mod statement;
mod types;

pub use expression::{
    AnonymousCall, BinaryOp, BuiltinFunction, DateTimeValue, Expr, FrameBound, FrameUnits,
    FunctionCall, InSource, Literal, ParameterStyle, UnaryOp, WindowFrame, WindowSpec,
};
pub use node::{Node, NodeKind};
pub use statement::{
    Cte, DeleteStatement, InsertSource, InsertStatement, IntoClause, IntoKind, JoinClause,
    JoinType, NullOrdering, OrderBy, OrderDirection, SelectColumn, SelectFlags, SelectStatement,
    SetOperation, SetOperator, Statement, StatementType, TableRef, UpdateAssignment,
    UpdateStatement, WithClause,
};
pub use types::DataType;
