//! Generic SQL dialect.

use super::Dialect;

/// Shared instance used by [`Lexer::new`](crate::lexer::Lexer::new),
/// [`Parser::new`](crate::parser::Parser::new) and `Display` impls.
pub(crate) static GENERIC: GenericDialect = GenericDialect::new();

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
