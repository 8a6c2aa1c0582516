//! Removal of inert Ariba annotation clauses.
//!
//! `INCLUDE INACTIVE` and `SUBCLASS <name>` only steer which object
//! instances Ariba returns; they do not change the shape of a query. They are
//! stripped from the text before tokenization.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// An annotation clause removed by [`preprocess_ariba_aql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AribaClause {
    /// `INCLUDE INACTIVE`
    IncludeInactive,
    /// `SUBCLASS NONE`
    SubclassNone,
    /// `SUBCLASS <name>`
    Subclass,
}

impl AribaClause {
    /// Every clause, in removal order.
    pub const ALL: [Self; 3] = [Self::IncludeInactive, Self::SubclassNone, Self::Subclass];

    const fn index(self) -> usize {
        match self {
            Self::IncludeInactive => 0,
            Self::SubclassNone => 1,
            Self::Subclass => 2,
        }
    }

    /// The pattern matching the clause together with its leading whitespace.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::IncludeInactive => r"(?i)\s+INCLUDE\s+INACTIVE\b",
            Self::SubclassNone => r"(?i)\s+SUBCLASS\s+NONE\b",
            Self::Subclass => r"(?i)\s+SUBCLASS\s+\w+\b",
        }
    }

    fn regex(self) -> &'static Regex {
        &PATTERNS[self.index()]
    }

    /// Whether `sql` contains the clause.
    #[must_use]
    pub fn is_present_in(self, sql: &str) -> bool {
        self.regex().is_match(sql)
    }
}

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    AribaClause::ALL
        .iter()
        .map(|clause| Regex::new(clause.pattern()).unwrap())
        .collect()
});

/// Strips Ariba annotation clauses, then collapses whitespace runs to single
/// spaces and trims.
///
/// Removal repeats until no clause is left, since stripping one clause can
/// join the words of another (`INCLUDE INCLUDE INACTIVE INACTIVE`). The
/// result is a fixed point: preprocessing it again returns it unchanged.
///
/// ```rust
/// use sapsql_aql::preprocess_ariba_aql;
///
/// assert_eq!(
///     preprocess_ariba_aql("SELECT cr FROM ariba.rfx.Document AS cr INCLUDE INACTIVE"),
///     "SELECT cr FROM ariba.rfx.Document AS cr"
/// );
/// ```
#[must_use]
pub fn preprocess_ariba_aql(sql: &str) -> String {
    let mut text = sql.to_string();
    while let Some(clause) = AribaClause::ALL
        .into_iter()
        .find(|clause| clause.is_present_in(&text))
    {
        trace!(clause = ?clause, "Removed Ariba clause");
        text = clause.regex().replace_all(&text, "").into_owned();
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
