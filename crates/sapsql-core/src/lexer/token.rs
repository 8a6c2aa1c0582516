//! Token types for the SQL lexer.

use super::Span;

macro_rules! keywords {
    ($($variant:ident => $text:literal),+ $(,)?) => {
        /// Keywords of the base grammar shared by every dialect.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl Keyword {
            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Returns the keyword as a string.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }
    };
}

keywords! {
    // Query structure
    Select => "SELECT",
    From => "FROM",
    Where => "WHERE",
    Order => "ORDER",
    By => "BY",
    Group => "GROUP",
    Having => "HAVING",
    Limit => "LIMIT",
    Offset => "OFFSET",
    Fetch => "FETCH",
    Next => "NEXT",
    Only => "ONLY",
    Distinct => "DISTINCT",
    All => "ALL",
    With => "WITH",
    Recursive => "RECURSIVE",

    // Joins
    Join => "JOIN",
    Inner => "INNER",
    Left => "LEFT",
    Right => "RIGHT",
    Full => "FULL",
    Outer => "OUTER",
    Cross => "CROSS",
    On => "ON",
    Using => "USING",

    // Set operations
    Union => "UNION",
    Intersect => "INTERSECT",
    Except => "EXCEPT",

    // Data manipulation
    Insert => "INSERT",
    Into => "INTO",
    Values => "VALUES",
    Update => "UPDATE",
    Set => "SET",
    Delete => "DELETE",
    Default => "DEFAULT",

    // Predicates and logic
    And => "AND",
    Or => "OR",
    Not => "NOT",
    In => "IN",
    Between => "BETWEEN",
    Like => "LIKE",
    Is => "IS",
    Null => "NULL",
    True => "TRUE",
    False => "FALSE",
    Exists => "EXISTS",

    // Ordering
    Asc => "ASC",
    Desc => "DESC",
    Nulls => "NULLS",
    First => "FIRST",
    Last => "LAST",

    // Aggregates and special forms
    Count => "COUNT",
    Sum => "SUM",
    Avg => "AVG",
    Min => "MIN",
    Max => "MAX",
    As => "AS",
    Case => "CASE",
    When => "WHEN",
    Then => "THEN",
    Else => "ELSE",
    End => "END",
    Cast => "CAST",
    Coalesce => "COALESCE",
    Nullif => "NULLIF",
    Extract => "EXTRACT",
    Interval => "INTERVAL",
    CurrentDate => "CURRENT_DATE",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",

    // Data types
    Int => "INT",
    Integer => "INTEGER",
    Smallint => "SMALLINT",
    Bigint => "BIGINT",
    Real => "REAL",
    Double => "DOUBLE",
    Float => "FLOAT",
    Decimal => "DECIMAL",
    Numeric => "NUMERIC",
    Char => "CHAR",
    Varchar => "VARCHAR",
    Text => "TEXT",
    Boolean => "BOOLEAN",
    Date => "DATE",
    Time => "TIME",
    Timestamp => "TIMESTAMP",
    Datetime => "DATETIME",

    // Windows
    Over => "OVER",
    Partition => "PARTITION",
    Rows => "ROWS",
    Range => "RANGE",
    Unbounded => "UNBOUNDED",
    Preceding => "PRECEDING",
    Following => "FOLLOWING",
    Current => "CURRENT",
    Row => "ROW",
}

impl Keyword {
    /// Reserved keywords can never be used as bare identifiers.
    ///
    /// The remaining keywords (data type names, window frame words, `FIRST`,
    /// `LAST`, ...) are accepted wherever an identifier is expected.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        !matches!(
            self,
            Self::Next
                | Self::Only
                | Self::Recursive
                | Self::Nulls
                | Self::First
                | Self::Last
                | Self::Int
                | Self::Integer
                | Self::Smallint
                | Self::Bigint
                | Self::Real
                | Self::Double
                | Self::Float
                | Self::Decimal
                | Self::Numeric
                | Self::Char
                | Self::Varchar
                | Self::Text
                | Self::Boolean
                | Self::Date
                | Self::Time
                | Self::Timestamp
                | Self::Datetime
                | Self::Rows
                | Self::Range
                | Self::Unbounded
                | Self::Preceding
                | Self::Following
                | Self::Current
                | Self::Row
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14)
    Float(f64),
    /// String literal (e.g., 'hello')
    String(String),

    // Identifiers and keywords
    /// Identifier (e.g., carrid)
    Identifier(String),
    /// Quoted identifier; holds the unescaped content (e.g., "Group")
    QuotedIdentifier(String),
    /// Keyword of the base grammar
    Keyword(Keyword),
    /// Word reserved by the active dialect (e.g., `UP` in ABAP), as written
    Word(String),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// `~`: bitwise NOT, or the ABAP component selector in `alias~field`
    Tilde,
    /// <<
    LeftShift,
    /// >>
    RightShift,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,
    /// ?
    Question,
    /// @
    At,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown input, with a description
    Error(String),
}

impl TokenKind {
    /// Short human readable description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Integer(n) => format!("integer {n}"),
            Self::Float(f) => format!("number {f}"),
            Self::String(s) => format!("string '{s}'"),
            Self::Identifier(name) | Self::Word(name) => format!("'{name}'"),
            Self::QuotedIdentifier(name) => format!("\"{name}\""),
            Self::Keyword(kw) => kw.as_str().to_string(),
            Self::Eof => String::from("end of input"),
            Self::Error(message) => message.clone(),
            other => format!("'{}'", other.symbol()),
        }
    }

    /// Source text of an operator or delimiter token.
    const fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Tilde => "~",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::DoubleColon => "::",
            Self::Question => "?",
            Self::At => "@",
            _ => "",
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the bare word text of identifiers, dialect words and keywords.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(text) | TokenKind::Word(text) => Some(text),
            TokenKind::Keyword(kw) => Some(kw.as_str()),
            _ => None,
        }
    }

    /// Case-insensitive comparison of the token's word text.
    #[must_use]
    pub fn is_word(&self, expected: &str) -> bool {
        self.word()
            .is_some_and(|text| text.eq_ignore_ascii_case(expected))
    }
}
