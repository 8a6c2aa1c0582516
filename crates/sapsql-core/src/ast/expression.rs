//! Expression AST types.

use super::statement::{OrderBy, SelectStatement};
use super::types::DataType;
use crate::lexer::Span;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
    Like,
    NotLike,
    /// ABAP `CS`: contains string.
    ContainsString,
    /// ABAP `CA`: contains any character of.
    ContainsAny,
    /// ABAP `CO`: contains only characters of.
    ContainsOnly,

    // Bitwise
    BitAnd,
    BitOr,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ContainsString => "CS",
            Self::ContainsAny => "CA",
            Self::ContainsOnly => "CO",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
        }
    }

    /// Arithmetic and concatenation operators.
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Concat
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
    /// Bitwise NOT (~)
    BitNot,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
            Self::BitNot => "~",
        }
    }
}

macro_rules! builtin_functions {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Functions with a dedicated AST representation.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BuiltinFunction {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl BuiltinFunction {
            /// Returns the canonical function name.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            fn from_canonical(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

builtin_functions! {
    Count => "COUNT",
    Sum => "SUM",
    Avg => "AVG",
    Min => "MIN",
    Max => "MAX",
    Coalesce => "COALESCE",
    NullIf => "NULLIF",
    If => "IF",
    Round => "ROUND",
    Ceil => "CEIL",
    Floor => "FLOOR",
    Abs => "ABS",
    Power => "POWER",
    Sqrt => "SQRT",
    Mod => "MOD",
    Upper => "UPPER",
    Lower => "LOWER",
    Length => "LENGTH",
    Substring => "SUBSTRING",
    Concat => "CONCAT",
    RowNumber => "ROW_NUMBER",
    Rank => "RANK",
    DenseRank => "DENSE_RANK",
    PercentRank => "PERCENT_RANK",
    CumeDist => "CUME_DIST",
    Ntile => "NTILE",
    Lag => "LAG",
    Lead => "LEAD",
    FirstValue => "FIRST_VALUE",
    LastValue => "LAST_VALUE",
    NthValue => "NTH_VALUE",
}

impl BuiltinFunction {
    /// Looks a function up by name (case-insensitive), including common
    /// alternative spellings.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            "CEILING" => Some(Self::Ceil),
            "POW" => Some(Self::Power),
            "SUBSTR" => Some(Self::Substring),
            "UCASE" => Some(Self::Upper),
            "LCASE" => Some(Self::Lower),
            other => Self::from_canonical(other),
        }
    }

    /// Functions only meaningful when applied over a window.
    #[must_use]
    pub const fn is_window_only(&self) -> bool {
        matches!(
            self,
            Self::RowNumber
                | Self::Rank
                | Self::DenseRank
                | Self::PercentRank
                | Self::CumeDist
                | Self::Ntile
                | Self::Lag
                | Self::Lead
                | Self::FirstValue
                | Self::LastValue
                | Self::NthValue
        )
    }

    /// Aggregate functions.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Self::Count | Self::Sum | Self::Avg | Self::Min | Self::Max
        )
    }
}

/// A call of a builtin function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function.
    pub func: BuiltinFunction,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// A call of a function without a dedicated AST representation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousCall {
    /// The function name as written.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// Unit of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnits {
    /// `ROWS`
    Rows,
    /// `RANGE`
    Range,
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    /// `UNBOUNDED PRECEDING`
    UnboundedPreceding,
    /// `n PRECEDING`
    Preceding(Box<Expr>),
    /// `CURRENT ROW`
    CurrentRow,
    /// `n FOLLOWING`
    Following(Box<Expr>),
    /// `UNBOUNDED FOLLOWING`
    UnboundedFollowing,
}

/// `ROWS|RANGE [BETWEEN start AND end | start]`
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrame {
    /// Frame unit.
    pub units: FrameUnits,
    /// Frame start.
    pub start: FrameBound,
    /// Frame end, when written as `BETWEEN .. AND ..`.
    pub end: Option<FrameBound>,
}

/// The window a function is applied over.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSpec {
    /// Named window (`OVER w`).
    pub name: Option<String>,
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY entries.
    pub order_by: Vec<OrderBy>,
    /// Frame clause.
    pub frame: Option<WindowFrame>,
}

/// How a parameter placeholder was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterStyle {
    /// `?`
    Positional,
    /// `:name`
    Named,
    /// `@name`, an ABAP host variable
    Host,
}

/// Right-hand side of `IN`.
#[derive(Debug, Clone, PartialEq)]
pub enum InSource {
    /// `IN (a, b, c)`
    List(Vec<Expr>),
    /// `IN (SELECT ...)`
    Subquery(Box<SelectStatement>),
    /// `IN @range_table`
    Parameter(Box<Expr>),
}

/// Niladic date/time functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeValue {
    /// `CURRENT_DATE`
    CurrentDate,
    /// `CURRENT_TIME`
    CurrentTime,
    /// `CURRENT_TIMESTAMP`
    CurrentTimestamp,
}

impl DateTimeValue {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
        }
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference.
    Column {
        /// Qualifier: table, alias or object path (`a.Owner` in
        /// `a.Owner.Name`). Quoted segments keep their quotes.
        table: Option<String>,
        /// Column name; quoted names keep their quotes.
        name: String,
        /// Source span.
        span: Span,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A builtin function call.
    Function(FunctionCall),

    /// A generic named function call.
    Anonymous(AnonymousCall),

    /// A function applied over a window (`f(..) OVER (..)`).
    Window {
        /// The windowed call.
        function: Box<Expr>,
        /// The window.
        spec: WindowSpec,
    },

    /// A scalar subquery.
    Subquery(Box<SelectStatement>),

    /// `EXISTS (subquery)`.
    Exists(Box<SelectStatement>),

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// `IS [NOT] TRUE | FALSE | :param`.
    Is {
        /// The expression to check.
        expr: Box<Expr>,
        /// The compared value.
        target: Box<Expr>,
        /// Whether this is IS NOT.
        negated: bool,
    },

    /// IN expression.
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The candidates.
        source: InSource,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// CASE expression.
    Case {
        /// The operand (if any).
        operand: Option<Box<Expr>>,
        /// WHEN/THEN clauses.
        when_clauses: Vec<(Expr, Expr)>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
    },

    /// CAST expression.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        data_type: DataType,
    },

    /// `EXTRACT(field FROM expr)`.
    Extract {
        /// Date part, upper case.
        field: String,
        /// Source expression.
        expr: Box<Expr>,
    },

    /// `INTERVAL value [unit]`.
    Interval {
        /// Interval value, usually a string literal.
        value: Box<Expr>,
        /// Unit word, upper case.
        unit: Option<String>,
    },

    /// `CURRENT_DATE`, `CURRENT_TIME` or `CURRENT_TIMESTAMP`.
    DateTime(DateTimeValue),

    /// Parenthesized expression.
    Paren(Box<Expr>),

    /// A parameter placeholder.
    Parameter {
        /// Placeholder style.
        style: ParameterStyle,
        /// Name for named and host parameters.
        name: Option<String>,
        /// Position in the query (1-based for `?` placeholders, else 0).
        position: usize,
    },

    /// Wildcard (*).
    Wildcard {
        /// Table qualifier (optional).
        table: Option<String>,
    },
}

impl Expr {
    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
            span: Span::default(),
        }
    }

    /// Creates a new qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            table: Some(table.into()),
            name: name.into(),
            span: Span::default(),
        }
    }

    /// Creates a new integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a call of a builtin function.
    #[must_use]
    pub const fn call(func: BuiltinFunction, args: Vec<Self>) -> Self {
        Self::Function(FunctionCall {
            func,
            args,
            distinct: false,
        })
    }

    /// Name of the called function, upper case, for function calls.
    #[must_use]
    pub fn function_name(&self) -> Option<String> {
        match self {
            Self::Function(call) => Some(call.func.as_str().to_string()),
            Self::Anonymous(call) => Some(call.name.to_ascii_uppercase()),
            _ => None,
        }
    }
}
