//! ABAP SQL dialect implementation.

use sapsql_core::ast::BinaryOp;
use sapsql_core::dialect::{Dialect, DialectOperator, SelectPrefix, SuffixClause};

/// Words of ABAP clauses and operators. The lexer returns them as dialect
/// words, so they are never taken as implicit aliases. Clause words still
/// name tables and columns.
const RESERVED_WORDS: &[&str] = &[
    "SINGLE",
    "UP",
    "TO",
    "BYPASSING",
    "BUFFER",
    "CLIENT",
    "SPECIFIED",
    "FOR",
    "PACKAGE",
    "SIZE",
    "APPENDING",
    "CORRESPONDING",
    "FIELDS",
    "OF",
    "TABLE",
    "CP",
    "NP",
    "CS",
    "NS",
    "CA",
    "NA",
    "CO",
    "CN",
];

/// ABAP SQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbapDialect;

impl AbapDialect {
    /// Creates a new ABAP SQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for AbapDialect {
    fn name(&self) -> &'static str {
        "abap"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn select_prefixes(&self) -> &'static [SelectPrefix] {
        &[SelectPrefix::Single]
    }

    fn suffix_clauses(&self) -> &'static [SuffixClause] {
        &SuffixClause::ALL
    }

    fn infix_operator(&self, word: &str) -> Option<DialectOperator> {
        let op = match word.to_ascii_uppercase().as_str() {
            "CP" => DialectOperator::new(BinaryOp::Like),
            "NP" => DialectOperator::negated(BinaryOp::Like),
            "CS" => DialectOperator::new(BinaryOp::ContainsString),
            "NS" => DialectOperator::negated(BinaryOp::ContainsString),
            "CA" => DialectOperator::new(BinaryOp::ContainsAny),
            "NA" => DialectOperator::negated(BinaryOp::ContainsAny),
            "CO" => DialectOperator::new(BinaryOp::ContainsOnly),
            "CN" => DialectOperator::negated(BinaryOp::ContainsOnly),
            _ => return None,
        };
        Some(op)
    }

    fn supports_tilde_qualifier(&self) -> bool {
        true
    }

    fn emits_advisories(&self) -> bool {
        true
    }
}
