//! # sapsql-core
//!
//! A dialect-aware SQL syntax checker and semantic validator.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent parser with Pratt expression
//!   parsing, extended per dialect through the [`Dialect`] trait
//! - A closed, typed AST with a borrowed [`Node`](ast::Node) view for tree
//!   searches
//! - A semantic [`Validator`] and a structural [`analyze`](analyzer::analyze)
//!   pass
//! - A [`Generator`] that renders statements back to canonical SQL
//! - The [`SqlChecker`] facade that ties them together
//!
//! Dialects for ABAP SQL and Ariba AQL live in the `sapsql-abap` and
//! `sapsql-aql` crates.
//!
//! ## Checking a query
//!
//! ```rust
//! use sapsql_core::SqlChecker;
//!
//! let checker = SqlChecker::generic();
//!
//! let result = checker.check_syntax("SELECT carrid, connid FROM sflight WHERE carrid = 'AA'");
//! assert!(result.valid);
//!
//! let result = checker.check_syntax("UPDATE sflight WHERE carrid = 'AA'");
//! assert_eq!(result.errors, vec!["UPDATE statement requires SET clause"]);
//! ```
//!
//! ## Formatting
//!
//! ```rust
//! use sapsql_core::SqlChecker;
//!
//! let formatted = SqlChecker::generic()
//!     .format_sql("select a,b from t where a=1 order by b desc", false)
//!     .unwrap();
//! assert_eq!(formatted, "SELECT a, b FROM t WHERE a = 1 ORDER BY b DESC");
//! ```

pub mod analyzer;
pub mod ast;
pub mod checker;
pub mod config;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod lexer;
pub mod parser;
pub mod validator;

pub use analyzer::{Analysis, Clause, DialectFeatures};
pub use ast::{Expr, Statement};
pub use checker::{AnalysisResult, CheckResult, SqlChecker};
pub use config::CheckerConfig;
pub use dialect::{Dialect, GenericDialect};
pub use error::{CheckError, Result};
pub use generator::Generator;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use validator::{Validation, Validator};
