//! Ariba AQL dialect implementation.

use std::borrow::Cow;

use sapsql_core::ast::BuiltinFunction;
use sapsql_core::dialect::{Dialect, FunctionMapping, SuffixClause};
use sapsql_core::lexer::Keyword;

use crate::preprocess::preprocess_ariba_aql;

/// Functions of the Ariba library kept as named calls.
const LIBRARY_FUNCTIONS: &[&str] = &[
    // date and time
    "FORMATDATE",
    "FORMATTIMESTAMP",
    "ADDDAYS",
    "ADDMONTHS",
    "ADDYEARS",
    "DATEDIFF",
    "DATEPART",
    "GETDATE",
    "YEAR",
    "MONTH",
    "DAY",
    "HOUR",
    "MINUTE",
    "SECOND",
    "DAYOFWEEK",
    "DAYOFYEAR",
    "WEEKOFYEAR",
    "QUARTER",
    // strings
    "STRINGCONCAT",
    "SUBSTRING",
    "CHARINDEX",
    "LEN",
    "REPLACE",
    "TRIM",
    "LTRIM",
    "RTRIM",
];

/// Business objects that may be queried by their short name.
const OBJECT_NAMES: &[&str] = &[
    "Document",
    "Project",
    "Supplier",
    "Contract",
    "Invoice",
    "Requisition",
    "Order",
];

/// Ariba Query Language dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct AqlDialect;

impl AqlDialect {
    /// Creates a new AQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for AqlDialect {
    fn name(&self) -> &'static str {
        "aql"
    }

    fn unreserved_keywords(&self) -> &'static [Keyword] {
        &[Keyword::Order]
    }

    fn suffix_clauses(&self) -> &'static [SuffixClause] {
        &[]
    }

    fn function_mapping(&self, name: &str) -> Option<FunctionMapping> {
        let builtin = match name {
            "ROUND" => BuiltinFunction::Round,
            "CEILING" => BuiltinFunction::Ceil,
            "FLOOR" => BuiltinFunction::Floor,
            "ABS" => BuiltinFunction::Abs,
            "POWER" => BuiltinFunction::Power,
            "SQRT" => BuiltinFunction::Sqrt,
            "IIF" => BuiltinFunction::If,
            "ISNULL" => BuiltinFunction::Coalesce,
            "NULLIF" => BuiltinFunction::NullIf,
            other if LIBRARY_FUNCTIONS.contains(&other) => return Some(FunctionMapping::Anonymous),
            _ => return None,
        };
        Some(FunctionMapping::Builtin(builtin))
    }

    fn object_namespaces(&self) -> &'static [&'static str] {
        &["ariba"]
    }

    fn object_names(&self) -> &'static [&'static str] {
        OBJECT_NAMES
    }

    fn preprocess<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        let cleaned = preprocess_ariba_aql(sql);
        if cleaned == sql {
            Cow::Borrowed(sql)
        } else {
            Cow::Owned(cleaned)
        }
    }

    fn preprocess_by_default(&self) -> bool {
        true
    }

    fn preprocess_note(&self) -> Option<&'static str> {
        Some("Note: Ariba-specific clauses were removed during pre-processing")
    }
}
