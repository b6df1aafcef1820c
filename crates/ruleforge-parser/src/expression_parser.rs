//! Expression parser
//!
//! Parses condition strings into Expression AST nodes.
//!
//! Supported syntax:
//! - Fact references: `#trade`, `#customer.address.city`, `#items[0]`
//! - Root object: `#root`, `#this`, or a bare property name such as `price`
//! - Literals: `42`, `3.14`, `'string'`, `"string"`, `true`, `false`, `null`
//! - Binary operators: `>`, `<`, `>=`, `<=`, `==`, `!=`, `+`, `-`, `*`, `/`, `%`,
//!   `&&`/`and`, `||`/`or`, `matches`
//! - Unary operators: `!`/`not`, `-`
//! - Method calls: `#name.length()`, `#email.endsWith('.com')`
//! - Null-safe navigation: `#customer?.address?.city`
//! - Ternary and elvis: `#a > 1 ? 'big' : 'small'`, `#nickname ?: 'anonymous'`
//! - Inline lists: `{1, 2, 3}`
//! - Parentheses for grouping: `(a + b) * c`

use crate::error::{ParseError, Result};
use crate::lexer::{tokenize, Spanned, Token};
use ruleforge_core::ast::{Expression, Operator, UnaryOperator};
use ruleforge_core::Value;

/// Deepest syntax tree the parser will build
///
/// Counts nested groups, unary operators, operator chain links and postfix
/// steps. Both parsing and evaluation recurse once per level.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let tokens = tokenize(input)?;
        let mut cursor = Cursor {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = cursor.parse_expression()?;

        if let Some(extra) = cursor.peek_spanned() {
            return Err(ParseError::UnexpectedToken {
                found: extra.token.to_string(),
                expected: "end of expression".to_string(),
                position: extra.position,
            });
        }

        tracing::trace!("parsed condition '{}'", input);
        Ok(expr)
    }
}

/// Token cursor driving the recursive descent
struct Cursor {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl Cursor {
    fn peek_spanned(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_spanned().map(|s| &s.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(name)) if name == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Enter one more level of the tree
    fn descend(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            let position = self
                .peek_spanned()
                .or_else(|| self.tokens.last())
                .map_or(0, |s| s.position);
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Run `parse` one level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.descend()?;
        let parsed = parse(self);
        self.depth -= 1;
        parsed
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.advance() {
            Some(spanned) if spanned.token == expected => Ok(()),
            Some(spanned) => Err(ParseError::UnexpectedToken {
                found: spanned.token.to_string(),
                expected: format!("'{}'", expected),
                position: spanned.position,
            }),
            None => Err(ParseError::UnexpectedEnd(format!("'{}'", expected))),
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match self.advance() {
            Some(Spanned {
                token: Token::Ident(name),
                ..
            }) => Ok(name),
            Some(spanned) => Err(ParseError::UnexpectedToken {
                found: spanned.token.to_string(),
                expected: "property or method name".to_string(),
                position: spanned.position,
            }),
            None => Err(ParseError::UnexpectedEnd(
                "property or method name".to_string(),
            )),
        }
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        self.nested(Self::parse_conditional)
    }

    /// Lowest precedence: ternary and elvis
    fn parse_conditional(&mut self) -> Result<Expression> {
        let condition = self.parse_or()?;

        if self.eat(&Token::Question) {
            let true_expr = self.parse_expression()?;
            self.expect(Token::Colon)?;
            let false_expr = self.parse_expression()?;
            return Ok(Expression::ternary(condition, true_expr, false_expr));
        }

        if self.eat(&Token::Elvis) {
            let fallback = self.parse_expression()?;
            return Ok(Expression::Elvis {
                value: Box::new(condition),
                fallback: Box::new(fallback),
            });
        }

        Ok(condition)
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mark = self.depth;
        let mut left = self.parse_and()?;
        while self.eat(&Token::OrOr) || self.eat_keyword("or") {
            self.descend()?;
            let right = self.parse_and()?;
            left = Expression::binary(left, Operator::Or, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mark = self.depth;
        let mut left = self.parse_equality()?;
        while self.eat(&Token::AndAnd) || self.eat_keyword("and") {
            self.descend()?;
            let right = self.parse_equality()?;
            left = Expression::binary(left, Operator::And, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expression> {
        let mark = self.depth;
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => Operator::Eq,
                Some(Token::NotEq) => Operator::Ne,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let right = self.parse_relational()?;
            left = Expression::binary(left, op, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expression> {
        let mark = self.depth;
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => Operator::Lt,
                Some(Token::Le) => Operator::Le,
                Some(Token::Gt) => Operator::Gt,
                Some(Token::Ge) => Operator::Ge,
                Some(Token::Ident(name)) if name == "matches" => Operator::Matches,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let right = self.parse_additive()?;
            left = Expression::binary(left, op, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mark = self.depth;
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => Operator::Add,
                Some(Token::Minus) => Operator::Sub,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let right = self.parse_multiplicative()?;
            left = Expression::binary(left, op, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mark = self.depth;
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => Operator::Mul,
                Some(Token::Slash) => Operator::Div,
                Some(Token::Percent) => Operator::Mod,
                _ => break,
            };
            self.pos += 1;
            self.descend()?;
            let right = self.parse_unary()?;
            left = Expression::binary(left, op, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        if self.eat(&Token::Bang) || self.eat_keyword("not") {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expression::unary(UnaryOperator::Not, operand));
        }

        if self.eat(&Token::Minus) {
            // Fold negative number literals
            if let Some(Token::Number(n)) = self.peek() {
                let n = *n;
                self.pos += 1;
                return self.parse_postfix(Expression::literal(-n));
            }
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expression::unary(UnaryOperator::Negate, operand));
        }

        let primary = self.parse_primary()?;
        self.parse_postfix(primary)
    }

    /// Property access, method calls and indexing
    fn parse_postfix(&mut self, mut expr: Expression) -> Result<Expression> {
        let mark = self.depth;
        loop {
            let null_safe = match self.peek() {
                Some(Token::Dot) => false,
                Some(Token::SafeDot) => true,
                Some(Token::LBracket) => {
                    self.descend()?;
                    self.pos += 1;
                    let index = self.parse_expression()?;
                    self.expect(Token::RBracket)?;
                    expr = Expression::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    };
                    continue;
                }
                _ => break,
            };
            self.descend()?;
            self.pos += 1;

            let name = self.expect_ident()?;
            if self.eat(&Token::LParen) {
                let args = self.parse_arguments(Token::RParen)?;
                expr = Expression::MethodCall {
                    target: Box::new(expr),
                    name,
                    args,
                    null_safe,
                };
            } else {
                expr = Expression::Property {
                    target: Box::new(expr),
                    name,
                    null_safe,
                };
            }
        }
        self.depth = mark;
        Ok(expr)
    }

    /// Comma-separated expressions up to (and consuming) `close`
    fn parse_arguments(&mut self, close: Token) -> Result<Vec<Expression>> {
        let mut args = Vec::new();
        if self.eat(&close) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(close)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let Some(spanned) = self.advance() else {
            return Err(ParseError::UnexpectedEnd("expression".to_string()));
        };

        match spanned.token {
            Token::Number(n) => Ok(Expression::literal(n)),
            Token::Str(s) => Ok(Expression::literal(s)),
            Token::Variable(name) => match name.as_str() {
                "root" | "this" => Ok(Expression::Root),
                _ => Ok(Expression::Variable(name)),
            },
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Expression::literal(true)),
                "false" => Ok(Expression::literal(false)),
                "null" => Ok(Expression::Literal(Value::Null)),
                // Bare identifiers resolve against the root object
                _ => Ok(Expression::property(Expression::Root, name)),
            },
            Token::LParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::LBrace => Ok(Expression::List(self.parse_arguments(Token::RBrace)?)),
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                expected: "expression".to_string(),
                position: spanned.position,
            }),
        }
    }
}
