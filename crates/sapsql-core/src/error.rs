//! Error types for checking.

use thiserror::Error;

use crate::parser::{ParseError, ParseErrorKind};

/// Failures reported by [`SqlChecker::parse`](crate::checker::SqlChecker::parse).
///
/// The checker's other entry points turn these into error messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    /// The text does not match the grammar.
    #[error("Syntax error: {0}")]
    Syntax(ParseError),

    /// The query nests deeper than the configured limit.
    #[error("Unexpected error: {0}")]
    NestingTooDeep(ParseError),
}

impl From<ParseError> for CheckError {
    fn from(err: ParseError) -> Self {
        match err.kind {
            ParseErrorKind::Syntax => Self::Syntax(err),
            ParseErrorKind::NestingLimit => Self::NestingTooDeep(err),
        }
    }
}

impl CheckError {
    /// The underlying parse error.
    #[must_use]
    pub const fn parse_error(&self) -> &ParseError {
        match self {
            Self::Syntax(err) | Self::NestingTooDeep(err) => err,
        }
    }
}

/// Result type alias for checker operations.
pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    #[test]
    fn test_syntax_error_message() {
        let err = CheckError::from(ParseError::new("Empty SELECT list", Span::new(7, 11)));
        assert!(matches!(err, CheckError::Syntax(_)));
        assert_eq!(
            err.to_string(),
            "Syntax error: Empty SELECT list at position 7..11"
        );
    }

    #[test]
    fn test_nesting_error_message() {
        let err = CheckError::from(ParseError::nesting_limit(4, Span::new(20, 21)));
        assert!(matches!(err, CheckError::NestingTooDeep(_)));
        assert!(err.to_string().starts_with("Unexpected error: Query nesting exceeds 4"));
        assert_eq!(err.parse_error().span, Span::new(20, 21));
    }
}
