//! # sapsql-abap
//!
//! ABAP SQL support for `sapsql-core`.
//!
//! # How ABAP SQL differs from standard SQL
//!
//! - **`SELECT SINGLE`**: reads at most one row. The checker warns when it is
//!   used without a `WHERE` clause.
//! - **Suffix clauses**: `UP TO n ROWS`, `BYPASSING BUFFER`,
//!   `CLIENT SPECIFIED`, `FOR UPDATE` and `PACKAGE SIZE n` may follow the
//!   `FROM` or `WHERE` clause, in any order.
//! - **Targets**: `INTO @v`, `INTO (@a, @b)`, `INTO TABLE @t`,
//!   `INTO CORRESPONDING FIELDS OF [TABLE] @t` and
//!   `APPENDING [CORRESPONDING FIELDS OF] TABLE @t` may directly follow the
//!   select list or come after `FROM`/`WHERE`.
//! - **Host variables**: `@var`, `@DATA(var)` and `:var`; `IN @range_table`.
//! - **Field qualifier**: `alias~field` instead of `alias.field`.
//! - **String comparisons**: `CP`/`NP` (pattern), `CS`/`NS` (contains
//!   string), `CA`/`NA` (contains any) and `CO`/`CN` (contains only).
//!
//! ## Example
//!
//! ```rust
//! use sapsql_abap::abap_checker;
//!
//! let checker = abap_checker();
//! let result = checker.check_syntax(
//!     "SELECT SINGLE f~carrid, f~connid INTO @DATA(ls_flight) \
//!      FROM sflight AS f BYPASSING BUFFER WHERE f~carrid CP 'A*'",
//! );
//! assert!(result.valid);
//! assert!(result.warnings.is_empty());
//! ```

mod dialect;

pub use dialect::AbapDialect;

use sapsql_core::SqlChecker;

/// A checker for ABAP SQL with the default configuration.
#[must_use]
pub fn abap_checker() -> SqlChecker<AbapDialect> {
    SqlChecker::new(AbapDialect::new())
}
