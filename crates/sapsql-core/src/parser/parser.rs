//! SQL Parser implementation.

use super::error::ParseError;
use crate::ast::{
    Cte, DeleteStatement, Expr, InsertSource, InsertStatement, JoinClause, JoinType,
    NullOrdering, OrderBy, OrderDirection, SelectColumn, SelectFlags, SelectStatement,
    SetOperation, SetOperator, Statement, TableRef, UpdateAssignment, UpdateStatement, WithClause,
};
use crate::dialect::{Dialect, GENERIC};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Default bound on expression and subquery nesting.
///
/// Parsing at this depth fits a 2 MiB thread stack in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A dotted name as written, e.g. `ariba."user".core."Group"`.
pub(super) struct QualifiedName {
    /// Segments; quoted segments keep their quotes.
    pub(super) segments: Vec<String>,
    /// Span of the whole name.
    pub(super) span: Span,
}

/// SQL Parser.
pub struct Parser<'a> {
    pub(super) source: &'a str,
    pub(super) dialect: &'a dyn Dialect,
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
    /// Parameter counter for ? placeholders.
    pub(super) param_counter: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input using the generic dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &GENERIC)
    }

    /// Creates a new parser for the given input and dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        let tokens = Lexer::with_dialect(input, dialect).tokenize();
        let end = input.len();
        Self {
            source: input,
            dialect,
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, Span::point(end)),
            param_counter: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth of expressions and subqueries.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses a single SQL statement, optionally terminated by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = match &self.current().kind {
            TokenKind::Keyword(Keyword::Select | Keyword::With) => {
                Statement::Select(self.parse_query()?)
            }
            TokenKind::Keyword(Keyword::Insert) => {
                Statement::Insert(self.parse_insert_statement()?)
            }
            TokenKind::Keyword(Keyword::Update) => {
                Statement::Update(self.parse_update_statement()?)
            }
            TokenKind::Keyword(Keyword::Delete) => {
                Statement::Delete(self.parse_delete_statement()?)
            }
            _ => return Err(self.error_expected("SELECT, INSERT, UPDATE, or DELETE")),
        };

        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current().is_eof() {
            return Err(self.error_expected("end of statement"));
        }
        Ok(statement)
    }

    /// Parses a full query: WITH, set operations, ORDER BY, LIMIT, OFFSET,
    /// FETCH and trailing dialect clauses.
    pub(super) fn parse_query(&mut self) -> Result<SelectStatement, ParseError> {
        self.enter()?;
        let result = self.parse_query_body();
        self.leave();
        result
    }

    fn parse_query_body(&mut self) -> Result<SelectStatement, ParseError> {
        let with = if self.check_keyword(Keyword::With) {
            Some(self.parse_with_clause()?)
        } else {
            None
        };

        let mut select = self.parse_select_core()?;
        select.with = with;

        while let Some(op) = self.set_operator() {
            self.advance();
            let all = if self.check_keyword(Keyword::All) {
                self.advance();
                true
            } else {
                if self.check_keyword(Keyword::Distinct) {
                    self.advance();
                }
                false
            };
            let operand = self.parse_set_operand()?;
            select.set_operations.push(SetOperation {
                op,
                all,
                select: Box::new(operand),
            });
        }

        // ORDER BY clause
        if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            select.order_by = self.parse_order_by_list()?;
        }

        // LIMIT clause
        if self.check_keyword(Keyword::Limit) {
            self.advance();
            select.limit = Some(self.parse_expression(0)?);
        }

        // OFFSET n [ROW | ROWS]
        if self.check_keyword(Keyword::Offset) {
            self.advance();
            select.offset = Some(self.parse_expression(0)?);
            if self.check_keyword(Keyword::Row) || self.check_keyword(Keyword::Rows) {
                self.advance();
            }
        }

        // FETCH FIRST | NEXT [n] ROW | ROWS ONLY
        if self.check_keyword(Keyword::Fetch) {
            self.advance();
            if self.check_keyword(Keyword::First) || self.check_keyword(Keyword::Next) {
                self.advance();
            } else {
                return Err(self.error_expected("FIRST or NEXT"));
            }
            let count = if self.check_keyword(Keyword::Row) || self.check_keyword(Keyword::Rows)
            {
                Expr::integer(1)
            } else {
                self.parse_expression(0)?
            };
            if self.check_keyword(Keyword::Row) || self.check_keyword(Keyword::Rows) {
                self.advance();
            } else {
                return Err(self.error_expected("ROW or ROWS"));
            }
            self.expect_keyword(Keyword::Only)?;
            if select.limit.is_some() {
                return Err(ParseError::new(
                    "FETCH cannot be combined with LIMIT",
                    self.current().span,
                ));
            }
            select.limit = Some(count);
        }

        let mut flags = core::mem::take(&mut select.flags);
        self.parse_suffix_clauses(&mut flags, false)?;
        select.flags = flags;

        Ok(select)
    }

    /// Parses `SELECT ... [FROM] [WHERE] [GROUP BY] [HAVING]` with the
    /// dialect prefixes and suffix clauses in between.
    fn parse_select_core(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        let mut flags = SelectFlags::default();
        self.parse_select_prefixes(&mut flags);

        // DISTINCT or ALL
        let distinct = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            true
        } else {
            if self.check_keyword(Keyword::All) {
                self.advance();
            }
            false
        };

        let columns = self.parse_select_columns()?;
        self.parse_suffix_clauses(&mut flags, true)?;

        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            let from = self.parse_from_clause()?;
            self.parse_suffix_clauses(&mut flags, false)?;
            Some(from)
        } else {
            None
        };

        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            let condition = self.parse_expression(0)?;
            self.parse_suffix_clauses(&mut flags, false)?;
            Some(condition)
        } else {
            None
        };

        // GROUP BY clause
        let group_by = if self.check_keyword(Keyword::Group) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };

        // HAVING clause
        let having = if self.check_keyword(Keyword::Having) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            flags,
            ..SelectStatement::default()
        })
    }

    /// Parses the right operand of a set operation.
    fn parse_set_operand(&mut self) -> Result<SelectStatement, ParseError> {
        if self.check(&TokenKind::LeftParen) && self.peek_is_query(1) {
            self.advance();
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            Ok(query)
        } else {
            self.parse_select_core()
        }
    }

    fn set_operator(&self) -> Option<SetOperator> {
        match self.current().as_keyword()? {
            Keyword::Union => Some(SetOperator::Union),
            Keyword::Intersect => Some(SetOperator::Intersect),
            Keyword::Except => Some(SetOperator::Except),
            _ => None,
        }
    }

    /// Parses `WITH [RECURSIVE] name [(cols)] AS (query), ...`.
    fn parse_with_clause(&mut self) -> Result<WithClause, ParseError> {
        self.expect_keyword(Keyword::With)?;
        let recursive = if self.check_keyword(Keyword::Recursive) {
            self.advance();
            true
        } else {
            false
        };

        let mut ctes = vec![];
        loop {
            let name = self.expect_identifier()?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.advance();
                let columns = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                columns
            } else {
                vec![]
            };
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            ctes.push(Cte {
                name,
                columns,
                query: Box::new(query),
            });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(WithClause { recursive, ctes })
    }

    /// Parses SELECT columns.
    fn parse_select_columns(&mut self) -> Result<Vec<SelectColumn>, ParseError> {
        let mut columns = vec![];

        loop {
            let expr = self.parse_expression(0)?;
            let alias = self.parse_optional_alias()?;
            columns.push(SelectColumn { expr, alias });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(columns)
    }

    /// Parses the FROM clause: table factors joined by JOIN clauses or
    /// commas.
    pub(super) fn parse_from_clause(&mut self) -> Result<TableRef, ParseError> {
        let mut table_ref = self.parse_table_factor()?;

        loop {
            if self.check(&TokenKind::Comma) {
                self.advance();
                let right = self.parse_table_factor()?;
                table_ref = TableRef::Join {
                    left: Box::new(table_ref),
                    join: Box::new(JoinClause {
                        join_type: JoinType::Implicit,
                        table: right,
                        on: None,
                        using: vec![],
                    }),
                };
                continue;
            }

            if !self.is_join_keyword() {
                break;
            }
            let join_type = self.parse_join_type()?;
            let right = self.parse_table_factor()?;

            // A missing condition is reported by the validator.
            let (on, using) = if self.check_keyword(Keyword::On) {
                self.advance();
                (Some(self.parse_expression(0)?), vec![])
            } else if self.check_keyword(Keyword::Using) {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen)?;
                (None, cols)
            } else {
                (None, vec![])
            };

            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join: Box::new(JoinClause {
                    join_type,
                    table: right,
                    on,
                    using,
                }),
            };
        }

        Ok(table_ref)
    }

    /// Parses a table, a derived table or a parenthesized join.
    fn parse_table_factor(&mut self) -> Result<TableRef, ParseError> {
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            if self.is_query_start() {
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                let alias = self.parse_optional_alias()?;
                return Ok(TableRef::Subquery {
                    query: Box::new(query),
                    alias,
                });
            }
            self.enter()?;
            let inner = self.parse_from_clause();
            self.leave();
            let inner = inner?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(inner);
        }

        let (schema, name, object) = self.parse_table_name()?;
        let alias = self.parse_optional_alias()?;
        Ok(TableRef::Table {
            schema,
            name,
            alias,
            object,
        })
    }

    /// Parses a possibly qualified table name into `(schema, name, object)`.
    ///
    /// Names starting with a dialect object namespace are kept whole.
    pub(super) fn parse_table_name(
        &mut self,
    ) -> Result<(Option<String>, String, bool), ParseError> {
        let first = self.current().clone();
        if !self.is_name_start(&first) {
            return Err(self.error_expected("table name"));
        }
        let qualified = self.parse_qualified_name()?;
        let mut segments = qualified.segments;
        let head = segments
            .first()
            .map(|s| s.trim_matches(self.dialect.identifier_quote()).to_string())
            .unwrap_or_default();

        if segments.len() > 1 && self.dialect.is_object_namespace(&head) {
            return Ok((None, segments.join("."), true));
        }

        let object = self.dialect.is_object_reference(&head);
        let name = segments.pop().unwrap_or_default();
        let schema = if segments.is_empty() {
            None
        } else {
            Some(segments.join("."))
        };
        Ok((schema, name, object))
    }

    /// Parses `name(.segment)*`. The caller has checked that the current
    /// token starts a name.
    pub(super) fn parse_qualified_name(&mut self) -> Result<QualifiedName, ParseError> {
        let start = self.current().span;
        let first = self.current().clone();
        let mut segments = vec![self.name_text(&first)];
        self.advance();
        let mut end = start;

        while self.check(&TokenKind::Dot) {
            let next = self.peek_nth(1).clone();
            if matches!(next.kind, TokenKind::Star) {
                break;
            }
            self.advance();
            let Some(segment) = self.segment_text(&next) else {
                return Err(self.error_expected("name after '.'"));
            };
            segments.push(segment);
            end = next.span;
            self.advance();
        }

        Ok(QualifiedName {
            segments,
            span: start.merge(end),
        })
    }

    /// Checks if current token is a join keyword.
    fn is_join_keyword(&self) -> bool {
        matches!(
            &self.current().kind,
            TokenKind::Keyword(
                Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
            )
        )
    }

    /// Parses a join type.
    fn parse_join_type(&mut self) -> Result<JoinType, ParseError> {
        if self.check_keyword(Keyword::Join) {
            self.advance();
            return Ok(JoinType::Inner);
        }

        let join_type = match &self.current().kind {
            TokenKind::Keyword(Keyword::Inner) => JoinType::Inner,
            TokenKind::Keyword(Keyword::Cross) => JoinType::Cross,
            TokenKind::Keyword(Keyword::Left) => JoinType::Left,
            TokenKind::Keyword(Keyword::Right) => JoinType::Right,
            TokenKind::Keyword(Keyword::Full) => JoinType::Full,
            _ => return Err(self.error_expected("JOIN keyword")),
        };
        self.advance();
        if matches!(join_type, JoinType::Left | JoinType::Right | JoinType::Full)
            && self.check_keyword(Keyword::Outer)
        {
            self.advance();
        }
        self.expect_keyword(Keyword::Join)?;
        Ok(join_type)
    }

    /// Parses an optional alias: `AS name`, or a bare identifier.
    pub(super) fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.check_keyword(Keyword::As) {
            self.advance();
            let token = self.current().clone();
            return match self.segment_text(&token) {
                Some(alias) => {
                    self.advance();
                    Ok(Some(alias))
                }
                None => Err(self.error_expected("alias")),
            };
        }

        let token = self.current().clone();
        match &token.kind {
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => {
                self.advance();
                Ok(Some(self.name_text(&token)))
            }
            _ => Ok(None),
        }
    }

    /// Parses an INSERT statement.
    fn parse_insert_statement(&mut self) -> Result<InsertStatement, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let (schema, table, _) = self.parse_table_name()?;

        // Column list (optional)
        let columns = if self.check(&TokenKind::LeftParen) && !self.peek_is_query(1) {
            self.advance();
            let cols = self.parse_identifier_list()?;
            self.expect(&TokenKind::RightParen)?;
            cols
        } else {
            vec![]
        };

        // VALUES, SELECT, DEFAULT VALUES, or nothing
        let source = if self.check_keyword(Keyword::Values) {
            self.advance();
            let mut rows = vec![];
            loop {
                self.expect(&TokenKind::LeftParen)?;
                let row = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                rows.push(row);

                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            Some(InsertSource::Values(rows))
        } else if self.is_query_start() {
            Some(InsertSource::Query(Box::new(self.parse_query()?)))
        } else if self.check(&TokenKind::LeftParen) && self.peek_is_query(1) {
            self.advance();
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            Some(InsertSource::Query(Box::new(query)))
        } else if self.check_keyword(Keyword::Default) {
            self.advance();
            self.expect_keyword(Keyword::Values)?;
            Some(InsertSource::DefaultValues)
        } else {
            None
        };

        Ok(InsertStatement {
            schema,
            table,
            columns,
            source,
        })
    }

    /// Parses an UPDATE statement.
    fn parse_update_statement(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;

        let (schema, table, _) = self.parse_table_name()?;
        let alias = self.parse_optional_alias()?;

        // SET assignments; their absence is reported by the validator
        let mut assignments = vec![];
        if self.check_keyword(Keyword::Set) {
            self.advance();
            loop {
                let token = self.current().clone();
                if !self.is_name_start(&token) {
                    return Err(self.error_expected("column name"));
                }
                let column = self.parse_qualified_name()?.segments.join(".");
                self.expect(&TokenKind::Eq)?;
                let value = self.parse_expression(0)?;
                assignments.push(UpdateAssignment { column, value });

                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }

        // FROM clause (optional, for joins)
        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_from_clause()?)
        } else {
            None
        };

        // WHERE clause
        let where_clause = self.parse_optional_where()?;

        Ok(UpdateStatement {
            schema,
            table,
            alias,
            assignments,
            from,
            where_clause,
        })
    }

    /// Parses `DELETE [target] [FROM table] [USING refs] [WHERE cond]`.
    fn parse_delete_statement(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;

        let token = self.current().clone();
        let target = if self.is_name_start(&token) {
            Some(self.parse_table_factor()?)
        } else {
            None
        };

        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_from_clause()?)
        } else {
            None
        };

        let mut using = vec![];
        if self.check_keyword(Keyword::Using) {
            self.advance();
            loop {
                using.push(self.parse_table_factor()?);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }

        let where_clause = self.parse_optional_where()?;

        Ok(DeleteStatement {
            target,
            from,
            using,
            where_clause,
        })
    }

    fn parse_optional_where(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.check_keyword(Keyword::Where) {
            self.advance();
            Ok(Some(self.parse_expression(0)?))
        } else {
            Ok(None)
        }
    }

    /// Parses an ORDER BY list.
    pub(super) fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        let mut items = vec![];

        loop {
            let expr = self.parse_expression(0)?;
            let direction = if self.check_keyword(Keyword::Desc) {
                self.advance();
                Some(OrderDirection::Desc)
            } else if self.check_keyword(Keyword::Asc) {
                self.advance();
                Some(OrderDirection::Asc)
            } else {
                None
            };
            let nulls = if self.check_keyword(Keyword::Nulls) {
                self.advance();
                if self.check_keyword(Keyword::First) {
                    self.advance();
                    Some(NullOrdering::First)
                } else if self.check_keyword(Keyword::Last) {
                    self.advance();
                    Some(NullOrdering::Last)
                } else {
                    return Err(self.error_expected("FIRST or LAST"));
                }
            } else {
                None
            };

            items.push(OrderBy {
                expr,
                direction,
                nulls,
            });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(items)
    }

    /// Parses a comma-separated list of expressions.
    pub(super) fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![];

        loop {
            exprs.push(self.parse_expression(0)?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(exprs)
    }

    /// Parses a comma-separated list of identifiers.
    fn parse_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut idents = vec![];

        loop {
            idents.push(self.expect_identifier()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(idents)
    }

    // --- Helper methods ---

    /// Returns the current token.
    pub(super) fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Returns the token `n` positions ahead of the current one.
    pub(super) fn peek_nth(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    /// Advances to the next token.
    pub(super) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current().kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is a bare word with the given text.
    pub(super) fn check_word(&self, text: &str) -> bool {
        self.current().is_word(text)
    }

    /// Checks if the current token starts a query.
    pub(super) fn is_query_start(&self) -> bool {
        self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With)
    }

    /// Checks if the token `n` positions ahead starts a query.
    pub(super) fn peek_is_query(&self, n: usize) -> bool {
        matches!(
            self.peek_nth(n).as_keyword(),
            Some(Keyword::Select | Keyword::With)
        )
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expected(&kind.describe()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expected(keyword.as_str()))
        }
    }

    /// Expects the current token to be the given bare word.
    pub(super) fn expect_word(&mut self, text: &str) -> Result<(), ParseError> {
        if self.check_word(text) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expected(text))
        }
    }

    /// Expects and returns an identifier.
    pub(super) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let token = self.current().clone();
        if self.is_name_start(&token) {
            self.advance();
            Ok(self.name_text(&token))
        } else {
            Err(self.error_expected("identifier"))
        }
    }

    /// Builds an "unexpected token" error at the current token.
    pub(super) fn error_expected(&self, expected: &str) -> ParseError {
        let token = self.current();
        ParseError::unexpected(expected, token.kind.clone(), token.span)
    }

    /// Whether `token` can start a name in table or column position.
    ///
    /// Non-reserved keywords qualify, and so do the dialect's unreserved
    /// keywords unless they start a clause (`ORDER BY`). Dialect words such
    /// as ABAP `SIZE` or `CLIENT` qualify too; clause parsing only looks at
    /// them after a complete operand or table name.
    pub(super) fn is_name_start(&self, token: &Token) -> bool {
        match &token.kind {
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => true,
            TokenKind::Keyword(kw) => self.is_identifier_keyword(*kw),
            TokenKind::Word(word) => self.dialect.is_name_word(word),
            _ => false,
        }
    }

    /// Whether the keyword at the current position is usable as a name.
    pub(super) fn is_identifier_keyword(&self, keyword: Keyword) -> bool {
        if !keyword.is_reserved() {
            return true;
        }
        self.dialect.unreserved_keywords().contains(&keyword)
            && !matches!(self.peek_nth(1).as_keyword(), Some(Keyword::By))
    }

    /// Text of a name token as written. Quoted identifiers keep their quotes.
    pub(super) fn name_text(&self, token: &Token) -> String {
        match &token.kind {
            TokenKind::QuotedIdentifier(name) => self.dialect.quote_identifier(name),
            TokenKind::Keyword(kw) => token
                .span
                .slice(self.source)
                .map_or_else(|| kw.as_str().to_string(), str::to_string),
            _ => token.word().map(str::to_string).unwrap_or_default(),
        }
    }

    /// Text of a name segment after `.`, `~` or `AS`, where every word is
    /// accepted.
    pub(super) fn segment_text(&self, token: &Token) -> Option<String> {
        match &token.kind {
            TokenKind::Identifier(_)
            | TokenKind::QuotedIdentifier(_)
            | TokenKind::Keyword(_)
            | TokenKind::Word(_) => Some(self.name_text(token)),
            _ => None,
        }
    }

    /// Enters one nesting level.
    pub(super) fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::nesting_limit(
                self.max_depth,
                self.current().span,
            ));
        }
        Ok(())
    }

    /// Leaves one nesting level.
    pub(super) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::parser::ParseErrorKind;

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_statement()
    }

    fn parse_select(sql: &str) -> SelectStatement {
        match parse(sql).unwrap() {
            Statement::Select(select) => select,
            other => panic!("Expected SELECT statement, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("SELECT carrid, connid FROM sflight").unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
    }

    #[test]
    fn test_trailing_semicolon() {
        assert!(parse("SELECT * FROM sflight;").is_ok());
        let err = parse("SELECT * FROM sflight; SELECT 1").unwrap_err();
        assert!(err.message.contains("end of statement"));
    }

    #[test]
    fn test_select_with_join() {
        let select = parse_select(
            "SELECT f.carrid, p.cityfrom FROM sflight f JOIN spfli p ON f.carrid = p.carrid",
        );
        let Some(TableRef::Join { join, .. }) = &select.from else {
            panic!("Expected join");
        };
        assert_eq!(join.join_type, JoinType::Inner);
        assert!(join.on.is_some());
    }

    #[test]
    fn test_join_without_condition_parses() {
        let select = parse_select("SELECT * FROM sflight LEFT OUTER JOIN spfli");
        let Some(TableRef::Join { join, .. }) = &select.from else {
            panic!("Expected join");
        };
        assert_eq!(join.join_type, JoinType::Left);
        assert!(!join.has_condition());
    }

    #[test]
    fn test_comma_join() {
        let select = parse_select("SELECT * FROM a, b, c");
        let Some(TableRef::Join { left, join }) = &select.from else {
            panic!("Expected join");
        };
        assert_eq!(join.join_type, JoinType::Implicit);
        assert!(matches!(left.as_ref(), TableRef::Join { .. }));
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be parsed as 1 + (2 * 3)
        let select = parse_select("SELECT 1 + 2 * 3");
        let Expr::Binary { op, right, .. } = &select.columns[0].expr else {
            panic!("Expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(
            right.as_ref(),
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn test_set_operations_and_order() {
        let select =
            parse_select("SELECT a FROM t UNION ALL SELECT b FROM u EXCEPT SELECT c FROM v ORDER BY 1");
        assert_eq!(select.set_operations.len(), 2);
        assert!(select.set_operations[0].all);
        assert_eq!(select.set_operations[1].op, SetOperator::Except);
        assert_eq!(select.order_by.len(), 1);
    }

    #[test]
    fn test_with_clause() {
        let select = parse_select(
            "WITH RECURSIVE cte (n) AS (SELECT 1 FROM dual) SELECT n FROM cte",
        );
        let with = select.with.unwrap();
        assert!(with.recursive);
        assert_eq!(with.ctes[0].name, "cte");
        assert_eq!(with.ctes[0].columns, vec!["n"]);
    }

    #[test]
    fn test_offset_and_fetch() {
        let select =
            parse_select("SELECT * FROM t ORDER BY a NULLS LAST OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY");
        assert_eq!(select.limit, Some(Expr::integer(10)));
        assert_eq!(select.offset, Some(Expr::integer(5)));
        assert_eq!(select.order_by[0].nulls, Some(NullOrdering::Last));
    }

    #[test]
    fn test_insert_values() {
        let stmt = parse("INSERT INTO scarr (carrid, carrname) VALUES ('LH', 'Lufthansa')").unwrap();
        let Statement::Insert(insert) = stmt else {
            panic!("Expected INSERT statement");
        };
        assert_eq!(insert.table, "scarr");
        assert_eq!(insert.columns.len(), 2);
        assert!(matches!(insert.source, Some(InsertSource::Values(_))));
    }

    #[test]
    fn test_insert_without_source_parses() {
        let Statement::Insert(insert) = parse("INSERT INTO scarr").unwrap() else {
            panic!("Expected INSERT statement");
        };
        assert!(insert.source.is_none());
    }

    #[test]
    fn test_update() {
        let stmt = parse("UPDATE sflight SET seatsocc = seatsocc + 1 WHERE carrid = 'AA'").unwrap();
        let Statement::Update(update) = stmt else {
            panic!("Expected UPDATE statement");
        };
        assert_eq!(update.table, "sflight");
        assert_eq!(update.assignments.len(), 1);
        assert!(update.where_clause.is_some());
    }

    #[test]
    fn test_update_without_set_parses() {
        let Statement::Update(update) = parse("UPDATE sflight WHERE carrid = 'AA'").unwrap() else {
            panic!("Expected UPDATE statement");
        };
        assert!(update.assignments.is_empty());
    }

    #[test]
    fn test_delete_forms() {
        let Statement::Delete(delete) = parse("DELETE FROM sflight WHERE carrid = 'AA'").unwrap()
        else {
            panic!("Expected DELETE statement");
        };
        assert!(delete.from.is_some());
        assert!(delete.target.is_none());

        let Statement::Delete(delete) = parse("DELETE WHERE x = 1").unwrap() else {
            panic!("Expected DELETE statement");
        };
        assert!(!delete.has_target());
    }

    #[test]
    fn test_schema_qualified_table() {
        let select = parse_select("SELECT * FROM sapabap1.sflight AS f");
        let Some(TableRef::Table {
            schema,
            name,
            alias,
            object,
        }) = select.from
        else {
            panic!("Expected table");
        };
        assert_eq!(schema.as_deref(), Some("sapabap1"));
        assert_eq!(name, "sflight");
        assert_eq!(alias.as_deref(), Some("f"));
        assert!(!object);
    }

    #[test]
    fn test_non_reserved_keyword_as_name() {
        let select = parse_select("SELECT date, time FROM events");
        assert!(matches!(
            &select.columns[0].expr,
            Expr::Column { name, .. } if name == "date"
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let sql = format!("SELECT {}1{} FROM t", "(".repeat(20), ")".repeat(20));
        let err = Parser::new(&sql)
            .with_max_depth(10)
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingLimit);
        assert!(Parser::new(&sql).parse_statement().is_ok());
    }

    #[test]
    fn test_unknown_statement() {
        let err = parse("MERGE INTO t").unwrap_err();
        assert!(err.message.contains("SELECT, INSERT, UPDATE, or DELETE"));
    }
}
