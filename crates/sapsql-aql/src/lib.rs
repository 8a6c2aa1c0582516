//! # sapsql-aql
//!
//! Ariba Query Language (AQL) support for `sapsql-core`.
//!
//! # How AQL differs from standard SQL
//!
//! - **Object paths**: tables are business objects named by fully
//!   qualified paths such as `ariba.sourcing.rfx.RFXDocument` or
//!   `ariba."user".core."Group"`. Short names (`Document`, `Project`,
//!   `Order`, ...) are recognized as objects as well.
//! - **Field paths**: fields are navigated with dots, as in
//!   `RFXBid.ContentDocumentReference.DocumentId`.
//! - **Function library**: `FORMATDATE`, `ADDDAYS`, `DATEDIFF`,
//!   `STRINGCONCAT` and friends are kept as named calls; `ISNULL`, `IIF`,
//!   `CEILING` and the math functions map onto their standard equivalents.
//! - **Annotations**: `INCLUDE INACTIVE` and `SUBCLASS <name>` are removed by
//!   [`preprocess_ariba_aql`] before parsing.
//!
//! ## Example
//!
//! ```rust
//! use sapsql_aql::aql_checker;
//!
//! let checker = aql_checker();
//! let result = checker.check_syntax(
//!     "SELECT RFXBid FROM ariba.sourcing.rfx.RFXBid AS RFXBid SUBCLASS NONE \
//!      WHERE RFXBid.ContentDocumentReference.DocumentId = BaseId(:PARAM) \
//!      ORDER BY RFXBid.SubmissionDate DESC",
//! );
//! assert!(result.valid);
//! ```

mod dialect;
mod preprocess;

pub use dialect::AqlDialect;
pub use preprocess::{preprocess_ariba_aql, AribaClause};

use sapsql_core::SqlChecker;

/// A checker for AQL with the default configuration.
#[must_use]
pub fn aql_checker() -> SqlChecker<AqlDialect> {
    SqlChecker::new(AqlDialect::new())
}
