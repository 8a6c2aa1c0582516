//! The checking facade: parse, validate, analyze and format.
//!
//! ```rust
//! use sapsql_core::SqlChecker;
//!
//! let checker = SqlChecker::generic();
//! let result = checker.check_syntax("SELECT a FROM t JOIN u");
//! assert!(!result.valid);
//! assert_eq!(result.errors, vec!["INNER JOIN requires ON condition"]);
//! ```

use std::borrow::Cow;

use serde::Serialize;
use tracing::{debug, trace};

use crate::analyzer::{analyze, Analysis};
use crate::ast::Statement;
use crate::config::CheckerConfig;
use crate::dialect::{Dialect, GenericDialect};
use crate::error::{CheckError, Result};
use crate::generator::Generator;
use crate::parser::Parser;
use crate::validator::Validator;

/// Outcome of [`SqlChecker::check_syntax`].
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Whether the statement parsed and passed validation.
    pub valid: bool,
    /// The parsed statement, when parsing succeeded.
    pub ast: Option<Statement>,
    /// Syntax or semantic errors.
    pub errors: Vec<String>,
    /// Best-practice warnings.
    pub warnings: Vec<String>,
}

/// Outcome of [`SqlChecker::analyze_query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// The query, trimmed.
    pub sql: String,
    /// Name of the dialect used.
    pub dialect: String,
    /// Whether the statement parsed and passed validation.
    pub valid: bool,
    /// Syntax or semantic errors.
    pub errors: Vec<String>,
    /// Best-practice warnings.
    pub warnings: Vec<String>,
    /// Structural summary; empty when parsing failed.
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// Checks queries of one dialect.
#[derive(Debug, Clone, Default)]
pub struct SqlChecker<D> {
    dialect: D,
    config: CheckerConfig,
}

impl SqlChecker<GenericDialect> {
    /// A checker for standard SQL.
    #[must_use]
    pub fn generic() -> Self {
        Self::new(GenericDialect::new())
    }
}

impl<D: Dialect> SqlChecker<D> {
    /// Creates a checker with the default configuration.
    #[must_use]
    pub fn new(dialect: D) -> Self {
        Self::with_config(dialect, CheckerConfig::default())
    }

    /// Creates a checker with `config`.
    #[must_use]
    pub fn with_config(dialect: D, config: CheckerConfig) -> Self {
        Self { dialect, config }
    }

    /// The dialect queries are checked against.
    #[must_use]
    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    fn preprocess_enabled(&self) -> bool {
        self.config
            .preprocess
            .unwrap_or_else(|| self.dialect.preprocess_by_default())
    }

    fn prepare<'s>(&self, sql: &'s str, preprocess: bool) -> Cow<'s, str> {
        if !preprocess {
            return Cow::Borrowed(sql);
        }
        let prepared = self.dialect.preprocess(sql);
        if prepared != sql {
            trace!(before = %sql, after = %prepared, "Preprocessed query");
        }
        prepared
    }

    fn parse_prepared(&self, sql: &str) -> Result<Statement> {
        Parser::with_dialect(sql, &self.dialect)
            .with_max_depth(self.config.max_nesting_depth)
            .parse_statement()
            .map_err(CheckError::from)
    }

    /// Parses `sql`, applying the dialect's default preprocessing.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] when the query cannot be parsed.
    pub fn parse(&self, sql: &str) -> Result<Statement> {
        let prepared = self.prepare(sql, self.preprocess_enabled());
        self.parse_prepared(&prepared)
    }

    /// Checks syntax and semantics of one statement.
    #[must_use]
    pub fn check_syntax(&self, sql: &str) -> CheckResult {
        self.check_syntax_with(sql, self.preprocess_enabled())
    }

    /// Like [`check_syntax`](Self::check_syntax), with preprocessing forced
    /// on or off.
    #[must_use]
    pub fn check_syntax_with(&self, sql: &str, preprocess: bool) -> CheckResult {
        let prepared = self.prepare(sql, preprocess);
        let changed = prepared != sql;

        let result = match self.parse_prepared(&prepared) {
            Ok(statement) => {
                let validation = Validator::new(&self.dialect)
                    .with_warnings(self.config.emit_warnings)
                    .validate(&statement);
                CheckResult {
                    valid: validation.is_valid(),
                    ast: Some(statement),
                    errors: validation.errors,
                    warnings: validation.warnings,
                }
            }
            Err(err) => {
                let mut errors = vec![err.to_string()];
                if changed {
                    errors.extend(self.dialect.preprocess_note().map(String::from));
                }
                CheckResult {
                    valid: false,
                    ast: None,
                    errors,
                    warnings: vec![],
                }
            }
        };

        debug!(
            dialect = self.dialect.name(),
            valid = result.valid,
            errors = result.errors.len(),
            "Checked query"
        );
        result
    }

    /// Checks `sql` and summarizes what it touches.
    #[must_use]
    pub fn analyze_query(&self, sql: &str) -> AnalysisResult {
        let result = self.check_syntax(sql);
        AnalysisResult {
            sql: sql.trim().to_string(),
            dialect: self.dialect.name().to_string(),
            valid: result.valid,
            analysis: analyze(result.ast.as_ref()),
            errors: result.errors,
            warnings: result.warnings,
        }
    }

    /// Regenerates `sql` in canonical form. Returns `None` when it does not
    /// parse.
    #[must_use]
    pub fn format_sql(&self, sql: &str, pretty: bool) -> Option<String> {
        match self.parse(sql) {
            Ok(statement) => Some(Generator::new(&self.dialect, pretty).statement(&statement)),
            Err(err) => {
                debug!(error = %err, "Cannot format query");
                None
            }
        }
    }

    /// Analyzes every query, in order.
    #[must_use]
    pub fn batch_check<S: AsRef<str>>(&self, queries: &[S]) -> Vec<AnalysisResult> {
        queries
            .iter()
            .map(|sql| self.analyze_query(sql.as_ref()))
            .collect()
    }
}
