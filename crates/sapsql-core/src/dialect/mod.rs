//! SQL Dialect support.
//!
//! The base grammar is shared by every dialect. A [`Dialect`] layers its own
//! vocabulary on top of it: reserved words, `SELECT` prefix modifiers, suffix
//! clauses, infix operators, function name mappings, object namespaces and an
//! optional textual preprocessing step.

mod generic;

use std::borrow::Cow;

pub use generic::GenericDialect;
pub(crate) use generic::GENERIC;

use crate::ast::{BinaryOp, BuiltinFunction};
use crate::lexer::Keyword;

/// Modifier accepted directly after `SELECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectPrefix {
    /// `SELECT SINGLE`: at most one row.
    Single,
}

impl SelectPrefix {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
        }
    }
}

/// Clause accepted after the standard clauses of a `SELECT`.
///
/// A dialect lists the clauses it understands in priority order; the parser
/// attempts each of them after the select list, after `FROM`, after `WHERE`
/// and once the standard clause sequence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixClause {
    /// `UP TO n ROWS`
    UpToRows,
    /// `BYPASSING BUFFER`
    BypassingBuffer,
    /// `CLIENT SPECIFIED`
    ClientSpecified,
    /// `FOR UPDATE`
    ForUpdate,
    /// `PACKAGE SIZE n`
    PackageSize,
    /// `INTO [TABLE | CORRESPONDING FIELDS OF [TABLE]] target`
    Into,
    /// `APPENDING [CORRESPONDING FIELDS OF] TABLE target`
    Appending,
}

impl SuffixClause {
    /// Every suffix clause, in the order ABAP SQL attempts them.
    pub const ALL: [Self; 7] = [
        Self::UpToRows,
        Self::BypassingBuffer,
        Self::ClientSpecified,
        Self::ForUpdate,
        Self::PackageSize,
        Self::Into,
        Self::Appending,
    ];

    /// The word that introduces the clause.
    #[must_use]
    pub const fn leading_word(&self) -> &'static str {
        match self {
            Self::UpToRows => "UP",
            Self::BypassingBuffer => "BYPASSING",
            Self::ClientSpecified => "CLIENT",
            Self::ForUpdate => "FOR",
            Self::PackageSize => "PACKAGE",
            Self::Into => "INTO",
            Self::Appending => "APPENDING",
        }
    }

    /// Clause name used in messages and generated SQL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpToRows => "UP TO ROWS",
            Self::BypassingBuffer => "BYPASSING BUFFER",
            Self::ClientSpecified => "CLIENT SPECIFIED",
            Self::ForUpdate => "FOR UPDATE",
            Self::PackageSize => "PACKAGE SIZE",
            Self::Into => "INTO",
            Self::Appending => "APPENDING",
        }
    }

    /// Target clauses may also directly follow the select list.
    #[must_use]
    pub const fn is_target(&self) -> bool {
        matches!(self, Self::Into | Self::Appending)
    }
}

/// A dialect infix operator spelled as a word, such as ABAP `CP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectOperator {
    /// The binary operator the word maps to.
    pub op: BinaryOp,
    /// Whether the comparison is wrapped in `NOT`.
    pub negated: bool,
}

impl DialectOperator {
    /// Creates a non-negated operator mapping.
    #[must_use]
    pub const fn new(op: BinaryOp) -> Self {
        Self { op, negated: false }
    }

    /// Creates a negated operator mapping.
    #[must_use]
    pub const fn negated(op: BinaryOp) -> Self {
        Self { op, negated: true }
    }
}

/// How a dialect function name is represented in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionMapping {
    /// Parsed as a call of a builtin function (e.g. `ISNULL` as `COALESCE`).
    Builtin(BuiltinFunction),
    /// Kept as a generic named call.
    Anonymous,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Words the lexer turns into [`TokenKind::Word`](crate::lexer::TokenKind::Word)
    /// tokens, in addition to the words that start prefixes and suffix
    /// clauses.
    fn reserved_words(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns true when the lexer must produce a dialect word for `word`.
    fn is_reserved_word(&self, word: &str) -> bool {
        self.reserved_words()
            .iter()
            .any(|w| w.eq_ignore_ascii_case(word))
            || self
                .select_prefixes()
                .iter()
                .any(|p| p.as_str().eq_ignore_ascii_case(word))
            || self.is_clause_word(word)
    }

    /// Returns true when `word` starts one of the dialect's suffix clauses.
    ///
    /// Clause words are never taken as implicit aliases.
    fn is_clause_word(&self, word: &str) -> bool {
        self.suffix_clauses()
            .iter()
            .any(|c| c.leading_word().eq_ignore_ascii_case(word))
    }

    /// Returns true when the dialect word `word` may also name a table or
    /// column. Operator words and select prefixes never do.
    fn is_name_word(&self, word: &str) -> bool {
        self.infix_operator(word).is_none()
            && !self
                .select_prefixes()
                .iter()
                .any(|p| p.as_str().eq_ignore_ascii_case(word))
    }

    /// Base keywords the dialect also accepts as object or column names.
    fn unreserved_keywords(&self) -> &'static [Keyword] {
        &[]
    }

    /// Modifiers accepted right after `SELECT`.
    fn select_prefixes(&self) -> &'static [SelectPrefix] {
        &[]
    }

    /// Suffix clauses, in priority order.
    fn suffix_clauses(&self) -> &'static [SuffixClause] {
        &[SuffixClause::ForUpdate]
    }

    /// Maps an infix operator word to its AST operator.
    fn infix_operator(&self, _word: &str) -> Option<DialectOperator> {
        None
    }

    /// Whether `alias~field` is a column reference.
    fn supports_tilde_qualifier(&self) -> bool {
        false
    }

    /// Separator printed between a column and its qualifier.
    fn column_qualifier(&self) -> &'static str {
        if self.supports_tilde_qualifier() {
            "~"
        } else {
            "."
        }
    }

    /// Maps a function name (upper case) to its AST representation.
    ///
    /// `None` falls back to the builtin function table.
    fn function_mapping(&self, _name: &str) -> Option<FunctionMapping> {
        None
    }

    /// Leading segments of fully qualified object names, such as `ariba`.
    fn object_namespaces(&self) -> &'static [&'static str] {
        &[]
    }

    /// Business object names the dialect knows.
    fn object_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns true when a table name starting with `segment` refers to a
    /// dialect object.
    fn is_object_reference(&self, segment: &str) -> bool {
        self.object_namespaces()
            .iter()
            .chain(self.object_names())
            .any(|name| name.eq_ignore_ascii_case(segment))
    }

    /// Returns true when `segment` starts a fully qualified object name.
    fn is_object_namespace(&self, segment: &str) -> bool {
        self.object_namespaces()
            .iter()
            .any(|name| name.eq_ignore_ascii_case(segment))
    }

    /// Rewrites the query text before tokenization.
    fn preprocess<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(sql)
    }

    /// Whether the checker runs [`Dialect::preprocess`] unless told otherwise.
    fn preprocess_by_default(&self) -> bool {
        false
    }

    /// Extra error reported when a preprocessed query fails to parse.
    fn preprocess_note(&self) -> Option<&'static str> {
        None
    }

    /// Whether the validator reports best-practice warnings.
    fn emits_advisories(&self) -> bool {
        false
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}
