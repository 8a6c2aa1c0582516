//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Dialect vocabulary (prefixes, suffix clauses, operator words, function
//! names, object namespaces) is consulted through the
//! [`Dialect`](crate::dialect::Dialect) the parser was created with.

mod error;
mod expression;
mod extension;
mod parser;
mod pratt;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{DEFAULT_MAX_DEPTH, Parser};
