//! Dialect extension points: `SELECT` prefixes and suffix clauses.
//!
//! Suffix clauses are attempted in passes. A pass tries every clause the
//! dialect lists, in order, whether or not an earlier one matched; passes
//! repeat while anything matched, so clauses may appear in any order.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{Expr, IntoClause, IntoKind, SelectFlags};
use crate::dialect::{SelectPrefix, SuffixClause};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Consumes dialect modifiers that directly follow `SELECT`.
    pub(super) fn parse_select_prefixes(&mut self, flags: &mut SelectFlags) {
        for prefix in self.dialect.select_prefixes() {
            if self.check_word(prefix.as_str()) {
                self.advance();
                match prefix {
                    SelectPrefix::Single => flags.single = true,
                }
            }
        }
    }

    /// Runs suffix clause passes until nothing matches.
    ///
    /// With `targets_only`, only `INTO`/`APPENDING` are attempted.
    pub(super) fn parse_suffix_clauses(
        &mut self,
        flags: &mut SelectFlags,
        targets_only: bool,
    ) -> Result<(), ParseError> {
        loop {
            let mut matched = false;
            for clause in self.dialect.suffix_clauses() {
                if targets_only && !clause.is_target() {
                    continue;
                }
                if self.parse_suffix_clause(*clause, flags)? {
                    matched = true;
                }
            }
            if !matched {
                return Ok(());
            }
        }
    }

    /// Attempts one suffix clause; returns whether it matched.
    fn parse_suffix_clause(
        &mut self,
        clause: SuffixClause,
        flags: &mut SelectFlags,
    ) -> Result<bool, ParseError> {
        if !self.check_word(clause.leading_word()) {
            return Ok(false);
        }

        match clause {
            SuffixClause::UpToRows => {
                if !self.peek_nth(1).is_word("TO") {
                    return Ok(false);
                }
                self.ensure_absent(clause, flags.up_to_rows.is_some())?;
                self.advance();
                self.advance();
                let rows = self.expect_count()?;
                if self.check_keyword(Keyword::Rows) || self.check_keyword(Keyword::Row) {
                    self.advance();
                } else {
                    return Err(self.error_expected("ROWS"));
                }
                flags.up_to_rows = Some(rows);
            }
            SuffixClause::BypassingBuffer => {
                self.ensure_absent(clause, flags.bypassing_buffer)?;
                self.advance();
                self.expect_word("BUFFER")?;
                flags.bypassing_buffer = true;
            }
            SuffixClause::ClientSpecified => {
                self.ensure_absent(clause, flags.client_specified)?;
                self.advance();
                self.expect_word("SPECIFIED")?;
                flags.client_specified = true;
            }
            SuffixClause::ForUpdate => {
                if !matches!(self.peek_nth(1).as_keyword(), Some(Keyword::Update)) {
                    return Ok(false);
                }
                self.ensure_absent(clause, flags.for_update)?;
                self.advance();
                self.advance();
                flags.for_update = true;
            }
            SuffixClause::PackageSize => {
                self.ensure_absent(clause, flags.package_size.is_some())?;
                self.advance();
                self.expect_word("SIZE")?;
                flags.package_size = Some(self.expect_count()?);
            }
            SuffixClause::Into => {
                self.ensure_absent(clause, flags.into.is_some())?;
                self.advance();
                flags.into = Some(self.parse_into_target()?);
            }
            SuffixClause::Appending => {
                self.ensure_absent(clause, flags.appending.is_some())?;
                self.advance();
                flags.appending = Some(self.parse_appending_target()?);
            }
        }

        Ok(true)
    }

    fn ensure_absent(&self, clause: SuffixClause, present: bool) -> Result<(), ParseError> {
        if present {
            return Err(ParseError::new(
                format!("Duplicate {} clause", clause.as_str()),
                self.current().span,
            ));
        }
        Ok(())
    }

    /// Parses a non-negative integer row count.
    fn expect_count(&mut self) -> Result<u64, ParseError> {
        let TokenKind::Integer(n) = self.current().kind else {
            return Err(self.error_expected("row count"));
        };
        let count = u64::try_from(n)
            .map_err(|_| ParseError::new("Row count must not be negative", self.current().span))?;
        self.advance();
        Ok(count)
    }

    /// Parses what follows `INTO`.
    fn parse_into_target(&mut self) -> Result<IntoClause, ParseError> {
        if self.check_word("TABLE") {
            self.advance();
            return Ok(IntoClause {
                kind: IntoKind::Table,
                targets: vec![self.parse_target()?],
            });
        }

        if self.check_word("CORRESPONDING") {
            self.parse_corresponding_fields_of()?;
            let kind = if self.check_word("TABLE") {
                self.advance();
                IntoKind::CorrespondingTable
            } else {
                IntoKind::CorrespondingFields
            };
            return Ok(IntoClause {
                kind,
                targets: vec![self.parse_target()?],
            });
        }

        // INTO (@a, @b)
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let mut targets = vec![];
            loop {
                targets.push(self.parse_target()?);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(IntoClause {
                kind: IntoKind::Fields,
                targets,
            });
        }

        Ok(IntoClause {
            kind: IntoKind::Fields,
            targets: vec![self.parse_target()?],
        })
    }

    /// Parses what follows `APPENDING`.
    fn parse_appending_target(&mut self) -> Result<IntoClause, ParseError> {
        let kind = if self.check_word("CORRESPONDING") {
            self.parse_corresponding_fields_of()?;
            IntoKind::CorrespondingTable
        } else {
            IntoKind::Table
        };
        self.expect_word("TABLE")?;
        Ok(IntoClause {
            kind,
            targets: vec![self.parse_target()?],
        })
    }

    fn parse_corresponding_fields_of(&mut self) -> Result<(), ParseError> {
        self.expect_word("CORRESPONDING")?;
        self.expect_word("FIELDS")?;
        self.expect_word("OF")
    }

    /// Parses a target variable: `@var`, `:var` or a bare name.
    fn parse_target(&mut self) -> Result<Expr, ParseError> {
        match self.current().kind {
            TokenKind::At | TokenKind::Colon => self.parse_primary(),
            _ => {
                let token = self.current().clone();
                if !self.is_name_start(&token) {
                    return Err(self.error_expected("target variable"));
                }
                let name = self.parse_qualified_name()?;
                Ok(Expr::Column {
                    table: None,
                    name: name.segments.join("."),
                    span: name.span,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{IntoKind, SelectStatement, Statement};
    use crate::dialect::{Dialect, SelectPrefix, SuffixClause};
    use crate::parser::Parser;

    struct SuffixDialect;

    impl Dialect for SuffixDialect {
        fn name(&self) -> &'static str {
            "suffix"
        }

        fn reserved_words(&self) -> &'static [&'static str] {
            &["TO", "BUFFER", "SPECIFIED", "SIZE", "CORRESPONDING", "FIELDS", "OF", "TABLE"]
        }

        fn select_prefixes(&self) -> &'static [SelectPrefix] {
            &[SelectPrefix::Single]
        }

        fn suffix_clauses(&self) -> &'static [SuffixClause] {
            &SuffixClause::ALL
        }
    }

    fn parse(sql: &str) -> SelectStatement {
        match Parser::with_dialect(sql, &SuffixDialect)
            .parse_statement()
            .unwrap()
        {
            Statement::Select(select) => select,
            other => panic!("Expected SELECT statement, got {other:?}"),
        }
    }

    #[test]
    fn test_prefix_and_suffixes() {
        let select = parse(
            "SELECT SINGLE * FROM sflight BYPASSING BUFFER CLIENT SPECIFIED WHERE carrid = 'AA'",
        );
        assert!(select.flags.single);
        assert!(select.flags.bypassing_buffer);
        assert!(select.flags.client_specified);
        assert!(select.where_clause.is_some());
    }

    #[test]
    fn test_suffixes_in_any_order() {
        let select = parse(
            "SELECT * FROM sflight WHERE carrid = 'AA' PACKAGE SIZE 100 UP TO 10 ROWS FOR UPDATE",
        );
        assert_eq!(select.flags.up_to_rows, Some(10));
        assert_eq!(select.flags.package_size, Some(100));
        assert!(select.flags.for_update);
    }

    #[test]
    fn test_into_variants() {
        let select = parse("SELECT carrid, connid FROM spfli INTO (@lv_carrid, @lv_connid)");
        let into = select.flags.into.unwrap();
        assert_eq!(into.kind, IntoKind::Fields);
        assert_eq!(into.targets.len(), 2);

        let select = parse("SELECT * FROM spfli INTO CORRESPONDING FIELDS OF TABLE @lt_spfli");
        assert_eq!(
            select.flags.into.unwrap().kind,
            IntoKind::CorrespondingTable
        );

        let select = parse("SELECT * INTO TABLE @DATA(lt_result) FROM spfli");
        assert_eq!(select.flags.into.unwrap().kind, IntoKind::Table);

        let select = parse("SELECT * FROM spfli APPENDING TABLE @lt_spfli");
        assert_eq!(select.flags.appending.unwrap().kind, IntoKind::Table);
    }

    #[test]
    fn test_duplicate_clause_is_error() {
        let err = Parser::with_dialect(
            "SELECT * FROM sflight UP TO 1 ROWS WHERE a = 1 UP TO 2 ROWS",
            &SuffixDialect,
        )
        .parse_statement()
        .unwrap_err();
        assert!(err.message.contains("Duplicate UP TO ROWS"));
    }

    #[test]
    fn test_for_without_update_is_not_consumed() {
        assert!(
            Parser::with_dialect("SELECT * FROM sflight FOR ALL", &SuffixDialect)
                .parse_statement()
                .is_err()
        );
    }
}
