//! Parser error types.

use thiserror::Error;

use crate::lexer::{Span, TokenKind};

/// Why parsing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorKind {
    /// The input does not match the grammar.
    #[default]
    Syntax,
    /// Expressions or subqueries nest deeper than the configured limit.
    NestingLimit,
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at position {}..{}", .span.start, .span.end)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
    /// Error category.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
            kind: ParseErrorKind::Syntax,
        }
    }

    /// Creates an "unexpected token" error.
    ///
    /// When the offending token is a lexer error, its description becomes the
    /// message (e.g. "Unterminated string literal").
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        let message = match &found {
            TokenKind::Error(lexer_message) => lexer_message.clone(),
            TokenKind::Eof => format!("Unexpected end of input: expected {expected}"),
            other => format!(
                "Unexpected token: expected {expected}, found {}",
                other.describe()
            ),
        };
        Self {
            message,
            span,
            expected: Some(expected),
            found: Some(found),
            kind: ParseErrorKind::Syntax,
        }
    }

    /// Creates a nesting limit error.
    #[must_use]
    pub fn nesting_limit(limit: usize, span: Span) -> Self {
        Self {
            message: format!("Query nesting exceeds {limit} levels"),
            span,
            expected: None,
            found: None,
            kind: ParseErrorKind::NestingLimit,
        }
    }
}
