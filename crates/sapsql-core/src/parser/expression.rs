//! Expression parsing.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::{
    COMPARISON_BP, infix_binding_power, prefix_binding_power, token_to_binary_op,
    token_to_unary_op,
};
use crate::ast::{
    AnonymousCall, BinaryOp, BuiltinFunction, DataType, DateTimeValue, Expr, FrameBound,
    FrameUnits, FunctionCall, InSource, Literal, ParameterStyle, UnaryOp, WindowFrame, WindowSpec,
};
use crate::dialect::FunctionMapping;
use crate::lexer::{Keyword, Token, TokenKind};

/// Interval units accepted after `INTERVAL 'n'`.
const INTERVAL_UNITS: &[&str] = &[
    "YEAR", "QUARTER", "MONTH", "WEEK", "DAY", "HOUR", "MINUTE", "SECOND",
];

/// Reserved keywords that are still function names when followed by `(`.
const fn is_function_keyword(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::Count
            | Keyword::Sum
            | Keyword::Avg
            | Keyword::Min
            | Keyword::Max
            | Keyword::Coalesce
            | Keyword::Nullif
            | Keyword::Left
            | Keyword::Right
    )
}

impl Parser<'_> {
    /// Parses an expression using Pratt parsing.
    pub(super) fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        self.enter()?;
        let result = self.parse_expression_bp(min_bp);
        self.leave();
        result
    }

    fn parse_expression_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        // Parse prefix (primary expression or unary operator)
        let mut lhs = self.parse_prefix()?;

        // Parse infix operators
        loop {
            let token = self.current().clone();

            // Dialect operator words such as CP
            if let TokenKind::Word(word) = &token.kind {
                let Some(mapping) = self.dialect.infix_operator(word) else {
                    break;
                };
                let (l_bp, r_bp) = COMPARISON_BP;
                if l_bp < min_bp {
                    break;
                }
                self.advance();
                let rhs = self.parse_expression(r_bp)?;
                let comparison = lhs.binary(mapping.op, rhs);
                lhs = if mapping.negated {
                    Expr::Unary {
                        op: UnaryOp::Not,
                        operand: Box::new(comparison),
                    }
                } else {
                    comparison
                };
                continue;
            }

            let Some((l_bp, r_bp)) = infix_binding_power(&token.kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            // Handle special infix operators
            lhs = match &token.kind {
                TokenKind::Keyword(Keyword::Is) => {
                    self.advance();
                    self.parse_is(lhs)?
                }
                TokenKind::Keyword(Keyword::In) => {
                    self.advance();
                    self.parse_in(lhs, false)?
                }
                TokenKind::Keyword(Keyword::Between) => {
                    self.advance();
                    self.parse_between(lhs, false, r_bp)?
                }
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.parse_negated_predicate(lhs, r_bp)?
                }
                _ => {
                    // Standard binary operator
                    let Some(op) = token_to_binary_op(&token.kind) else {
                        break;
                    };
                    self.advance();
                    if op.is_arithmetic() && !self.starts_expression() {
                        return Err(ParseError::new(
                            format!(
                                "Invalid arithmetic expression: missing operand after '{}'",
                                op.as_str()
                            ),
                            token.span,
                        ));
                    }
                    let rhs = self.parse_expression(r_bp)?;
                    lhs.binary(op, rhs)
                }
            };
        }

        Ok(lhs)
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let kind = self.current().kind.clone();
        if let (Some(op), Some(bp)) = (token_to_unary_op(&kind), prefix_binding_power(&kind)) {
            self.advance();
            let operand = self.parse_expression(bp)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Whether the current token can begin an operand.
    fn starts_expression(&self) -> bool {
        let token = self.current();
        match &token.kind {
            TokenKind::Integer(_)
            | TokenKind::Float(_)
            | TokenKind::String(_)
            | TokenKind::Identifier(_)
            | TokenKind::QuotedIdentifier(_)
            | TokenKind::LeftParen
            | TokenKind::Minus
            | TokenKind::Tilde
            | TokenKind::Question
            | TokenKind::Colon
            | TokenKind::At => true,
            TokenKind::Word(_) => self.is_name_start(token),
            TokenKind::Keyword(kw) => {
                matches!(
                    kw,
                    Keyword::Not
                        | Keyword::Null
                        | Keyword::True
                        | Keyword::False
                        | Keyword::Case
                        | Keyword::Cast
                        | Keyword::Exists
                        | Keyword::Extract
                        | Keyword::Interval
                        | Keyword::CurrentDate
                        | Keyword::CurrentTime
                        | Keyword::CurrentTimestamp
                ) || is_function_keyword(*kw)
                    || self.is_identifier_keyword(*kw)
            }
            _ => false,
        }
    }

    /// Parses a primary expression.
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();

        match &token.kind {
            // Literals
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expr::Literal(Literal::Integer(*n)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(Expr::Literal(Literal::Float(*f)))
            }
            TokenKind::String(s) => {
                let value = s.clone();
                self.advance();
                Ok(Expr::Literal(Literal::String(value)))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::Literal(Literal::Null))
            }

            // Parameter placeholders
            TokenKind::Question | TokenKind::Colon | TokenKind::At => self.parse_parameter(),

            // Wildcard
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Wildcard { table: None })
            }

            // Parenthesized expression or subquery
            TokenKind::LeftParen => {
                self.advance();
                if self.is_query_start() {
                    let subquery = self.parse_query()?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(Expr::Subquery(Box::new(subquery)))
                } else {
                    let expr = self.parse_expression(0)?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(Expr::Paren(Box::new(expr)))
                }
            }

            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast_expression(),
            TokenKind::Keyword(Keyword::Extract) => self.parse_extract_expression(),
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval_expression(),

            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let subquery = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Exists(Box::new(subquery)))
            }

            TokenKind::Keyword(Keyword::CurrentDate) => {
                self.advance();
                Ok(Expr::DateTime(DateTimeValue::CurrentDate))
            }
            TokenKind::Keyword(Keyword::CurrentTime) => {
                self.advance();
                Ok(Expr::DateTime(DateTimeValue::CurrentTime))
            }
            TokenKind::Keyword(Keyword::CurrentTimestamp) => {
                self.advance();
                Ok(Expr::DateTime(DateTimeValue::CurrentTimestamp))
            }

            // Keyword-named functions: COUNT(..), LEFT(..), date(..)
            TokenKind::Keyword(kw)
                if matches!(self.peek_nth(1).kind, TokenKind::LeftParen)
                    && (is_function_keyword(*kw) || !kw.is_reserved()) =>
            {
                let name = self.name_text(&token);
                self.advance();
                self.parse_function_call(name)
            }

            TokenKind::Identifier(_)
            | TokenKind::QuotedIdentifier(_)
            | TokenKind::Keyword(_)
            | TokenKind::Word(_)
                if self.is_name_start(&token) =>
            {
                self.parse_name_expression(&token)
            }

            _ => Err(self.error_expected("expression")),
        }
    }

    /// Parses a column reference, a qualified wildcard or a function call
    /// starting at a name token.
    fn parse_name_expression(&mut self, token: &Token) -> Result<Expr, ParseError> {
        if matches!(token.kind, TokenKind::Identifier(_))
            && matches!(self.peek_nth(1).kind, TokenKind::LeftParen)
        {
            let name = self.name_text(token);
            self.advance();
            return self.parse_function_call(name);
        }

        let qualified = self.parse_qualified_name()?;
        let mut segments = qualified.segments;

        // table.*
        if self.check(&TokenKind::Dot) && matches!(self.peek_nth(1).kind, TokenKind::Star) {
            self.advance();
            self.advance();
            return Ok(Expr::Wildcard {
                table: Some(segments.join(".")),
            });
        }

        // alias~field
        if segments.len() == 1
            && self.dialect.supports_tilde_qualifier()
            && self.check(&TokenKind::Tilde)
        {
            self.advance();
            let table = segments.pop().unwrap_or_default();
            if self.check(&TokenKind::Star) {
                self.advance();
                return Ok(Expr::Wildcard { table: Some(table) });
            }
            let field = self.current().clone();
            let Some(name) = self.segment_text(&field) else {
                return Err(self.error_expected("field name after '~'"));
            };
            self.advance();
            return Ok(Expr::Column {
                table: Some(table),
                name,
                span: qualified.span.merge(field.span),
            });
        }

        let name = segments.pop().unwrap_or_default();
        let table = if segments.is_empty() {
            None
        } else {
            Some(segments.join("."))
        };
        Ok(Expr::Column {
            table,
            name,
            span: qualified.span,
        })
    }

    /// Parses `?`, `:name` or `@name`.
    fn parse_parameter(&mut self) -> Result<Expr, ParseError> {
        let marker = self.current().kind.clone();
        self.advance();

        let style = match marker {
            TokenKind::Question => {
                self.param_counter += 1;
                return Ok(Expr::Parameter {
                    style: ParameterStyle::Positional,
                    name: None,
                    position: self.param_counter,
                });
            }
            TokenKind::At => ParameterStyle::Host,
            _ => ParameterStyle::Named,
        };

        let token = self.current().clone();
        let Some(mut name) = self.segment_text(&token) else {
            return Err(self.error_expected("parameter name"));
        };
        self.advance();

        // Inline declaration: @DATA(result)
        if style == ParameterStyle::Host
            && (name.eq_ignore_ascii_case("DATA") || name.eq_ignore_ascii_case("FINAL"))
            && self.check(&TokenKind::LeftParen)
        {
            self.advance();
            let inner = self.expect_identifier()?;
            self.expect(&TokenKind::RightParen)?;
            name = format!("{name}({inner})");
        }

        Ok(Expr::Parameter {
            style,
            name: Some(name),
            position: 0,
        })
    }

    /// Parses the rest of `expr IS [NOT] NULL | TRUE | FALSE | :param`.
    fn parse_is(&mut self, lhs: Expr) -> Result<Expr, ParseError> {
        let negated = if self.check_keyword(Keyword::Not) {
            self.advance();
            true
        } else {
            false
        };

        if self.check_keyword(Keyword::Null) {
            self.advance();
            return Ok(Expr::IsNull {
                expr: Box::new(lhs),
                negated,
            });
        }

        let target = match &self.current().kind {
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Expr::Literal(Literal::Boolean(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Expr::Literal(Literal::Boolean(false))
            }
            TokenKind::Colon | TokenKind::At | TokenKind::Question => self.parse_parameter()?,
            _ => return Err(self.error_expected("NULL, TRUE, FALSE or parameter")),
        };

        Ok(Expr::Is {
            expr: Box::new(lhs),
            target: Box::new(target),
            negated,
        })
    }

    /// Parses the rest of `expr [NOT] IN (list | subquery) | IN @param`.
    fn parse_in(&mut self, lhs: Expr, negated: bool) -> Result<Expr, ParseError> {
        let source = if self.check(&TokenKind::LeftParen) {
            self.advance();
            let source = if self.is_query_start() {
                InSource::Subquery(Box::new(self.parse_query()?))
            } else {
                InSource::List(self.parse_expression_list()?)
            };
            self.expect(&TokenKind::RightParen)?;
            source
        } else if self.check(&TokenKind::At) || self.check(&TokenKind::Colon) {
            InSource::Parameter(Box::new(self.parse_parameter()?))
        } else {
            return Err(self.error_expected("'(' after IN"));
        };

        Ok(Expr::In {
            expr: Box::new(lhs),
            source,
            negated,
        })
    }

    /// Parses the rest of `expr [NOT] BETWEEN low AND high`.
    fn parse_between(&mut self, lhs: Expr, negated: bool, r_bp: u8) -> Result<Expr, ParseError> {
        let low = self.parse_expression(r_bp)?;
        self.expect_keyword(Keyword::And)?;
        let high = self.parse_expression(r_bp)?;
        Ok(Expr::Between {
            expr: Box::new(lhs),
            low: Box::new(low),
            high: Box::new(high),
            negated,
        })
    }

    /// Parses `NOT IN`, `NOT BETWEEN` and `NOT LIKE` after the left operand.
    fn parse_negated_predicate(&mut self, lhs: Expr, r_bp: u8) -> Result<Expr, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::In) => {
                self.advance();
                self.parse_in(lhs, true)
            }
            Some(Keyword::Between) => {
                self.advance();
                self.parse_between(lhs, true, r_bp)
            }
            Some(Keyword::Like) => {
                self.advance();
                let rhs = self.parse_expression(r_bp)?;
                Ok(lhs.binary(BinaryOp::NotLike, rhs))
            }
            _ => Err(self.error_expected("IN, BETWEEN or LIKE after NOT")),
        }
    }

    /// Parses a function call and an optional `OVER` window.
    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        let distinct = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            true
        } else {
            false
        };

        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else if self.check(&TokenKind::Star)
            && matches!(self.peek_nth(1).kind, TokenKind::RightParen)
        {
            self.advance();
            vec![Expr::Wildcard { table: None }]
        } else {
            self.parse_expression_list()?
        };

        self.expect(&TokenKind::RightParen)?;

        let call = self.resolve_function(name, args, distinct);
        if self.check_keyword(Keyword::Over) {
            self.advance();
            let spec = self.parse_window_spec()?;
            return Ok(Expr::Window {
                function: Box::new(call),
                spec,
            });
        }
        Ok(call)
    }

    /// Maps a called name to a builtin or anonymous call, dialect table
    /// first.
    fn resolve_function(&self, name: String, args: Vec<Expr>, distinct: bool) -> Expr {
        let upper = name.to_ascii_uppercase();
        let func = match self.dialect.function_mapping(&upper) {
            Some(FunctionMapping::Builtin(func)) => Some(func),
            Some(FunctionMapping::Anonymous) => None,
            None => BuiltinFunction::from_name(&upper),
        };

        match func {
            Some(func) => Expr::Function(FunctionCall {
                func,
                args,
                distinct,
            }),
            None => Expr::Anonymous(AnonymousCall {
                name,
                args,
                distinct,
            }),
        }
    }

    /// Parses the window after `OVER`: a window name or a parenthesized
    /// specification.
    fn parse_window_spec(&mut self) -> Result<WindowSpec, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            let name = self.expect_identifier()?;
            return Ok(WindowSpec {
                name: Some(name),
                ..WindowSpec::default()
            });
        }
        self.advance();

        let mut spec = WindowSpec::default();

        if self.check_keyword(Keyword::Partition) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            spec.partition_by = self.parse_expression_list()?;
        }

        if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            spec.order_by = self.parse_order_by_list()?;
        }

        let units = if self.check_keyword(Keyword::Rows) {
            Some(FrameUnits::Rows)
        } else if self.check_keyword(Keyword::Range) {
            Some(FrameUnits::Range)
        } else {
            None
        };
        if let Some(units) = units {
            self.advance();
            let (start, end) = if self.check_keyword(Keyword::Between) {
                self.advance();
                let start = self.parse_frame_bound()?;
                self.expect_keyword(Keyword::And)?;
                let end = self.parse_frame_bound()?;
                (start, Some(end))
            } else {
                (self.parse_frame_bound()?, None)
            };
            spec.frame = Some(WindowFrame { units, start, end });
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(spec)
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, ParseError> {
        if self.check_keyword(Keyword::Unbounded) {
            self.advance();
            if self.check_keyword(Keyword::Preceding) {
                self.advance();
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_keyword(Keyword::Following)?;
            return Ok(FrameBound::UnboundedFollowing);
        }

        if self.check_keyword(Keyword::Current) {
            self.advance();
            self.expect_keyword(Keyword::Row)?;
            return Ok(FrameBound::CurrentRow);
        }

        let offset = Box::new(self.parse_expression(COMPARISON_BP.1)?);
        if self.check_keyword(Keyword::Preceding) {
            self.advance();
            Ok(FrameBound::Preceding(offset))
        } else {
            self.expect_keyword(Keyword::Following)?;
            Ok(FrameBound::Following(offset))
        }
    }

    /// Parses a CASE expression.
    fn parse_case_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        // Check for simple CASE (CASE expr WHEN ...)
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression(0)?))
        };

        // Parse WHEN/THEN clauses
        let mut when_clauses = vec![];
        while self.check_keyword(Keyword::When) {
            self.advance();
            let when_expr = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let then_expr = self.parse_expression(0)?;
            when_clauses.push((when_expr, then_expr));
        }
        if when_clauses.is_empty() {
            return Err(self.error_expected("WHEN"));
        }

        // Parse ELSE clause
        let else_clause = if self.check_keyword(Keyword::Else) {
            self.advance();
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    /// Parses a CAST expression.
    fn parse_cast_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// Parses `EXTRACT(field FROM expr)`.
    fn parse_extract_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Extract)?;
        self.expect(&TokenKind::LeftParen)?;
        let token = self.current().clone();
        let Some(field) = token.word().map(str::to_ascii_uppercase) else {
            return Err(self.error_expected("date part"));
        };
        self.advance();
        self.expect_keyword(Keyword::From)?;
        let expr = self.parse_expression(0)?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Extract {
            field,
            expr: Box::new(expr),
        })
    }

    /// Parses `INTERVAL value [unit]`.
    fn parse_interval_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Interval)?;
        self.enter()?;
        let value = self.parse_prefix();
        self.leave();
        let value = value?;
        let unit = match self.current().word() {
            Some(word) if INTERVAL_UNITS.iter().any(|u| u.eq_ignore_ascii_case(word)) => {
                let unit = word.to_ascii_uppercase();
                self.advance();
                Some(unit)
            }
            _ => None,
        };

        Ok(Expr::Interval {
            value: Box::new(value),
            unit,
        })
    }

    /// Parses a data type.
    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let token = self.current().clone();
        let data_type = match &token.kind {
            TokenKind::Keyword(Keyword::Int | Keyword::Integer) => DataType::Integer,
            TokenKind::Keyword(Keyword::Smallint) => DataType::Smallint,
            TokenKind::Keyword(Keyword::Bigint) => DataType::Bigint,
            TokenKind::Keyword(Keyword::Real) => DataType::Real,
            TokenKind::Keyword(Keyword::Double | Keyword::Float) => DataType::Double,
            TokenKind::Keyword(Keyword::Text) => DataType::Text,
            TokenKind::Keyword(Keyword::Boolean) => DataType::Boolean,
            TokenKind::Keyword(Keyword::Date) => DataType::Date,
            TokenKind::Keyword(Keyword::Time) => DataType::Time,
            TokenKind::Keyword(Keyword::Timestamp) => DataType::Timestamp,
            TokenKind::Keyword(Keyword::Datetime) => DataType::Datetime,
            TokenKind::Keyword(kw @ (Keyword::Decimal | Keyword::Numeric)) => {
                let kw = *kw;
                self.advance();
                let (precision, scale) = self.parse_precision_scale()?;
                return Ok(if kw == Keyword::Decimal {
                    DataType::Decimal { precision, scale }
                } else {
                    DataType::Numeric { precision, scale }
                });
            }
            TokenKind::Keyword(kw @ (Keyword::Char | Keyword::Varchar)) => {
                let kw = *kw;
                self.advance();
                let length = self.parse_type_args()?.first().copied();
                return Ok(if kw == Keyword::Char {
                    DataType::Char(length)
                } else {
                    DataType::Varchar(length)
                });
            }
            TokenKind::Identifier(name) | TokenKind::Word(name) => {
                let name = name.clone();
                self.advance();
                let args = self.parse_type_args()?;
                return Ok(DataType::Custom { name, args });
            }
            _ => return Err(self.error_expected("data type")),
        };
        self.advance();

        // DOUBLE PRECISION
        if data_type == DataType::Double && self.check_word("PRECISION") {
            self.advance();
        }
        Ok(data_type)
    }

    /// Parses optional `(precision[, scale])`.
    fn parse_precision_scale(&mut self) -> Result<(Option<u16>, Option<u16>), ParseError> {
        let args = self.parse_type_args()?;
        let narrow = |value: Option<&u32>| -> Result<Option<u16>, ParseError> {
            value
                .map(|v| u16::try_from(*v))
                .transpose()
                .map_err(|_| ParseError::new("Precision too large", self.current().span))
        };
        Ok((narrow(args.first())?, narrow(args.get(1))?))
    }

    /// Parses optional `(n[, m ...])` type arguments.
    fn parse_type_args(&mut self) -> Result<Vec<u32>, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(vec![]);
        }
        self.advance();

        let mut args = vec![];
        loop {
            let TokenKind::Integer(n) = self.current().kind else {
                return Err(self.error_expected("integer"));
            };
            let value = u32::try_from(n)
                .map_err(|_| ParseError::new("Length too large", self.current().span))?;
            args.push(value);
            self.advance();

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(args)
    }
}
