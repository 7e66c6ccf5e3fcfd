//! Expression parsing using Pratt parsing (top-down operator precedence).
//!
//! Each binary operator maps to a [`Precedence`] level; the core loop in
//! [`Parser::parse_expression`] keeps folding infix operators into the
//! left-hand side while the next operator binds tighter than the caller's
//! minimum. Left associativity falls out of re-entering the loop with the
//! operator's own precedence.
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level       | Operators     |
//! |-------------|---------------|
//! | Equals      | `==`, `!=`    |
//! | LessGreater | `<`, `>`      |
//! | Sum         | `+`, `-`      |
//! | Product     | `*`, `/`, `%` |
//! | Prefix      | `-x`, `!x`    |
//! | Call        | `f(...)`      |
//! | Index       | `a[...]`      |

use mnk_lex::TokenKind;

use crate::ast::{
    ArrayLiteral, BooleanLiteral, CallExpression, Expression, FunctionLiteral, HashLiteral,
    Identifier, IfExpression, IndexExpression, InfixExpression, IntegerLiteral, MacroLiteral,
    PrefixExpression, StringLiteral,
};
use crate::error::{ParseError, ParseResult};
use crate::Parser;

/// Binding strength of an operator position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==`, `!=`
    Equals,
    /// `<`, `>`
    LessGreater,
    /// `+`, `-`
    Sum,
    /// `*`, `/`, `%`
    Product,
    /// `-x`, `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `a[0]`
    Index,
}

impl Precedence {
    /// The precedence a token has in infix position. Tokens that cannot
    /// appear as infix operators get `Lowest`, which never enters the
    /// Pratt loop.
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

impl<'a> Parser<'a> {
    /// The Pratt loop: parse a prefix expression, then fold infix
    /// operators while they bind tighter than `precedence`.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_token_is(TokenKind::Semicolon)
            && precedence < Precedence::of(self.peek_token.kind)
        {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Ok(left)
    }

    // =========================================================================
    // PREFIX POSITION
    // =========================================================================

    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        match self.cur_token.kind {
            TokenKind::Ident => Ok(Expression::Identifier(self.cur_identifier())),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Str => Ok(Expression::Str(StringLiteral {
                token: self.cur_token.clone(),
                value: self.cur_token.literal.clone(),
            })),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::True | TokenKind::False => Ok(Expression::Boolean(BooleanLiteral {
                token: self.cur_token.clone(),
                value: self.cur_token_is(TokenKind::True),
            })),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            TokenKind::Macro => self.parse_macro_literal(),
            kind => Err(ParseError::NoPrefixParseFn(kind)),
        }
    }

    fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let value = token
            .literal
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger {
                literal: token.literal.clone(),
            })?;

        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal.clone();

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_if_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        // The condition needs no parentheses of its own; `(cond)` works
        // through the ordinary grouping rule.
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::Function(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_macro_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::Macro(MacroLiteral {
            token,
            parameters,
            body,
        }))
    }

    /// Parses a comma-separated identifier list. The cursor must be on
    /// the opening parenthesis; it ends on the closing one.
    fn parse_function_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut identifiers = Vec::new();

        if self.peek_token_is(TokenKind::RParen) {
            self.next_token();
            return Ok(identifiers);
        }

        self.next_token();
        identifiers.push(self.cur_identifier());

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            identifiers.push(self.cur_identifier());
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(identifiers)
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Ok(Expression::Array(ArrayLiteral { token, elements }))
    }

    /// Parses `{ k : v , ... }`. Keys are arbitrary expressions; pairs
    /// keep source order; a trailing comma is rejected.
    fn parse_hash_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let mut pairs = Vec::new();

        if self.peek_token_is(TokenKind::RBrace) {
            self.next_token();
            return Ok(Expression::Hash(HashLiteral { token, pairs }));
        }

        self.next_token();
        pairs.push(self.parse_hash_pair()?);

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            pairs.push(self.parse_hash_pair()?);
        }

        self.expect_peek(TokenKind::RBrace)?;
        Ok(Expression::Hash(HashLiteral { token, pairs }))
    }

    fn parse_hash_pair(&mut self) -> ParseResult<(Expression, Expression)> {
        let key = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Colon)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok((key, value))
    }

    /// Parses a comma-separated expression list terminated by `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_token_is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(list)
    }

    // =========================================================================
    // INFIX POSITION
    // =========================================================================

    fn parse_infix(&mut self, left: Expression) -> ParseResult<Expression> {
        match self.cur_token.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_infix_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal.clone();
        let precedence = Precedence::of(token.kind);

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_call_expression(&mut self, function: Expression) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Ok(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let token = self.cur_token.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Ok(Expression::Index(IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn cur_identifier(&self) -> Identifier {
        Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.clone(),
        }
    }
}
