//! Borrowed, uniform view of the AST for tree searches.
//!
//! ```rust
//! use sapsql_core::ast::{Node, NodeKind};
//! use sapsql_core::Parser;
//!
//! let stmt = Parser::new("SELECT a FROM t WHERE b IN (SELECT c FROM u)")
//!     .parse_statement()
//!     .unwrap();
//! let selects = Node::from(&stmt).find_all(NodeKind::Select);
//! assert_eq!(selects.len(), 2);
//! ```

use super::expression::{Expr, FrameBound, InSource, WindowSpec};
use super::statement::{
    DeleteStatement, InsertSource, InsertStatement, JoinClause, SelectStatement, Statement,
    TableRef, UpdateStatement,
};

/// A reference to one node of the tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// A SELECT, at statement level or nested.
    Select(&'a SelectStatement),
    /// An INSERT statement.
    Insert(&'a InsertStatement),
    /// An UPDATE statement.
    Update(&'a UpdateStatement),
    /// A DELETE statement.
    Delete(&'a DeleteStatement),
    /// A table reference.
    TableRef(&'a TableRef),
    /// The right-hand side of a join.
    Join(&'a JoinClause),
    /// An expression.
    Expr(&'a Expr),
}

/// Node categories searched for with [`Node::find_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Select,
    Insert,
    Update,
    Delete,
    Table,
    DerivedTable,
    JoinedTable,
    Join,
    Column,
    Function,
    AnonymousFunction,
    Window,
    Subquery,
    Exists,
    Parameter,
    Wildcard,
    Literal,
    /// Any other expression.
    Expression,
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        match statement {
            Statement::Select(s) => Self::Select(s),
            Statement::Insert(i) => Self::Insert(i),
            Statement::Update(u) => Self::Update(u),
            Statement::Delete(d) => Self::Delete(d),
        }
    }
}

fn push_window<'a>(children: &mut Vec<Node<'a>>, spec: &'a WindowSpec) {
    children.extend(spec.partition_by.iter().map(Node::Expr));
    children.extend(spec.order_by.iter().map(|o| Node::Expr(&o.expr)));
    if let Some(frame) = &spec.frame {
        for bound in std::iter::once(&frame.start).chain(frame.end.as_ref()) {
            if let FrameBound::Preceding(e) | FrameBound::Following(e) = bound {
                children.push(Node::Expr(e));
            }
        }
    }
}

fn select_children(select: &SelectStatement) -> Vec<Node<'_>> {
    let mut children = Vec::new();
    if let Some(with) = &select.with {
        children.extend(with.ctes.iter().map(|cte| Node::Select(&cte.query)));
    }
    children.extend(select.columns.iter().map(|c| Node::Expr(&c.expr)));
    for target in [&select.flags.into, &select.flags.appending].into_iter().flatten() {
        children.extend(target.targets.iter().map(Node::Expr));
    }
    children.extend(select.from.iter().map(Node::TableRef));
    children.extend(select.where_clause.iter().map(Node::Expr));
    children.extend(select.group_by.iter().map(Node::Expr));
    children.extend(select.having.iter().map(Node::Expr));
    children.extend(select.set_operations.iter().map(|op| Node::Select(&op.select)));
    children.extend(select.order_by.iter().map(|o| Node::Expr(&o.expr)));
    children.extend(select.limit.iter().map(Node::Expr));
    children.extend(select.offset.iter().map(Node::Expr));
    children
}

fn expr_children(expr: &Expr) -> Vec<Node<'_>> {
    let mut children = Vec::new();
    match expr {
        Expr::Literal(_)
        | Expr::Column { .. }
        | Expr::DateTime(_)
        | Expr::Parameter { .. }
        | Expr::Wildcard { .. } => {}
        Expr::Binary { left, right, .. } => {
            children.push(Node::Expr(left));
            children.push(Node::Expr(right));
        }
        Expr::Unary { operand: e, .. }
        | Expr::Paren(e)
        | Expr::IsNull { expr: e, .. }
        | Expr::Cast { expr: e, .. }
        | Expr::Extract { expr: e, .. }
        | Expr::Interval { value: e, .. } => children.push(Node::Expr(e)),
        Expr::Function(call) => children.extend(call.args.iter().map(Node::Expr)),
        Expr::Anonymous(call) => children.extend(call.args.iter().map(Node::Expr)),
        Expr::Window { function, spec } => {
            children.push(Node::Expr(function));
            push_window(&mut children, spec);
        }
        Expr::Subquery(query) | Expr::Exists(query) => children.push(Node::Select(query)),
        Expr::Is { expr, target, .. } => {
            children.push(Node::Expr(expr));
            children.push(Node::Expr(target));
        }
        Expr::In { expr, source, .. } => {
            children.push(Node::Expr(expr));
            match source {
                InSource::List(list) => children.extend(list.iter().map(Node::Expr)),
                InSource::Subquery(query) => children.push(Node::Select(query)),
                InSource::Parameter(param) => children.push(Node::Expr(param)),
            }
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            children.push(Node::Expr(expr));
            children.push(Node::Expr(low));
            children.push(Node::Expr(high));
        }
        Expr::Case {
            operand,
            when_clauses,
            else_clause,
        } => {
            children.extend(operand.iter().map(|e| Node::Expr(e)));
            for (when, then) in when_clauses {
                children.push(Node::Expr(when));
                children.push(Node::Expr(then));
            }
            children.extend(else_clause.iter().map(|e| Node::Expr(e)));
        }
    }
    children
}

fn walk_inner<'a, F>(node: Node<'a>, ancestors: &mut Vec<Node<'a>>, visit: &mut F)
where
    F: FnMut(Node<'a>, &[Node<'a>]),
{
    visit(node, ancestors);
    ancestors.push(node);
    for child in node.children() {
        walk_inner(child, ancestors, visit);
    }
    ancestors.pop();
}

impl<'a> Node<'a> {
    /// Returns the category of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Select(_) => NodeKind::Select,
            Self::Insert(_) => NodeKind::Insert,
            Self::Update(_) => NodeKind::Update,
            Self::Delete(_) => NodeKind::Delete,
            Self::TableRef(TableRef::Table { .. }) => NodeKind::Table,
            Self::TableRef(TableRef::Subquery { .. }) => NodeKind::DerivedTable,
            Self::TableRef(TableRef::Join { .. }) => NodeKind::JoinedTable,
            Self::Join(_) => NodeKind::Join,
            Self::Expr(expr) => match expr {
                Expr::Column { .. } => NodeKind::Column,
                Expr::Function(_) => NodeKind::Function,
                Expr::Anonymous(_) => NodeKind::AnonymousFunction,
                Expr::Window { .. } => NodeKind::Window,
                Expr::Subquery(_) => NodeKind::Subquery,
                Expr::Exists(_) => NodeKind::Exists,
                Expr::Parameter { .. } => NodeKind::Parameter,
                Expr::Wildcard { .. } => NodeKind::Wildcard,
                Expr::Literal(_) => NodeKind::Literal,
                _ => NodeKind::Expression,
            },
        }
    }

    /// Direct children, in source order.
    #[must_use]
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Self::Select(select) => select_children(select),
            Self::Insert(insert) => match &insert.source {
                Some(InsertSource::Values(rows)) => {
                    rows.iter().flatten().map(Node::Expr).collect()
                }
                Some(InsertSource::Query(query)) => vec![Node::Select(query)],
                Some(InsertSource::DefaultValues) | None => vec![],
            },
            Self::Update(update) => {
                let mut children: Vec<Node<'a>> = update
                    .assignments
                    .iter()
                    .map(|a| Node::Expr(&a.value))
                    .collect();
                children.extend(update.from.iter().map(Node::TableRef));
                children.extend(update.where_clause.iter().map(Node::Expr));
                children
            }
            Self::Delete(delete) => {
                let mut children: Vec<Node<'a>> = delete
                    .target
                    .iter()
                    .chain(delete.from.iter())
                    .chain(delete.using.iter())
                    .map(Node::TableRef)
                    .collect();
                children.extend(delete.where_clause.iter().map(Node::Expr));
                children
            }
            Self::TableRef(table_ref) => match table_ref {
                TableRef::Table { .. } => vec![],
                TableRef::Subquery { query, .. } => vec![Node::Select(query)],
                TableRef::Join { left, join } => vec![Node::TableRef(left), Node::Join(join)],
            },
            Self::Join(join) => {
                let mut children = vec![Node::TableRef(&join.table)];
                children.extend(join.on.iter().map(Node::Expr));
                children
            }
            Self::Expr(expr) => expr_children(expr),
        }
    }

    /// Visits this node and all descendants in pre-order. The callback gets
    /// each node together with its ancestors, outermost first.
    pub fn walk<F>(self, visit: &mut F)
    where
        F: FnMut(Node<'a>, &[Node<'a>]),
    {
        let mut ancestors = Vec::new();
        walk_inner(self, &mut ancestors, visit);
    }

    /// All nodes of `kind` in this subtree (including this node), pre-order.
    #[must_use]
    pub fn find_all(self, kind: NodeKind) -> Vec<Node<'a>> {
        let mut found = Vec::new();
        self.walk(&mut |node, _| {
            if node.kind() == kind {
                found.push(node);
            }
        });
        found
    }

    /// The first node of `kind` in this subtree, pre-order.
    #[must_use]
    pub fn find(self, kind: NodeKind) -> Option<Node<'a>> {
        if self.kind() == kind {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(kind))
    }

    /// Whether a node of `kind` occurs in this subtree.
    #[must_use]
    pub fn contains(self, kind: NodeKind) -> bool {
        self.find(kind).is_some()
    }

    /// Returns the SELECT if this is a SELECT node.
    #[must_use]
    pub const fn as_select(&self) -> Option<&'a SelectStatement> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Returns the expression if this is an expression node.
    #[must_use]
    pub const fn as_expr(&self) -> Option<&'a Expr> {
        match self {
            Self::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    /// Returns the table reference if this is a table reference node.
    #[must_use]
    pub const fn as_table_ref(&self) -> Option<&'a TableRef> {
        match self {
            Self::TableRef(table_ref) => Some(table_ref),
            _ => None,
        }
    }

    /// Returns the join clause if this is a join node.
    #[must_use]
    pub const fn as_join(&self) -> Option<&'a JoinClause> {
        match self {
            Self::Join(join) => Some(join),
            _ => None,
        }
    }
}
