//! mnk-par - Parser for the Monkey language.
//!
//! A Pratt (top-down operator precedence) parser over the token stream
//! produced by `mnk-lex`. The parser keeps a one-token lookahead
//! (`cur_token`/`peek_token`), dispatches statements by keyword, and
//! parses expressions with precedence-driven prefix/infix handlers; in
//! Rust the handler tables are `match` arms over [`mnk_lex::TokenKind`].
//!
//! Entry points:
//! - [`parse`]: one-shot, source in, [`ast::Program`] or the collected
//!   error list out.
//! - [`Parser::parse_program`]: incremental, parses everything, keeps
//!   going after an error, and exposes the errors via [`Parser::errors`].

pub mod ast;
pub mod error;
pub mod expr;
pub mod modify;

pub use error::{ParseError, ParseResult};
pub use modify::modify;

use mnk_lex::{Lexer, Token, TokenKind};

use ast::{
    BlockStatement, ExpressionStatement, Identifier, LetStatement, Program, ReturnStatement,
    Statement, WhileStatement,
};
use expr::Precedence;

/// Parses a complete source string.
///
/// # Example
///
/// ```
/// let program = mnk_par::parse("let x = 1 + 2;").unwrap();
/// assert_eq!(program.to_string(), "let x = (1 + 2);");
/// ```
pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::from_source(source);
    let program = parser.parse_program();
    let errors = parser.into_errors();
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

/// The Monkey parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,

    /// The token under examination.
    cur_token: Token,

    /// One token of lookahead.
    peek_token: Token,

    /// Errors collected across statements by [`Parser::parse_program`].
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over an existing lexer, priming both lookahead
    /// tokens.
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut parser = Self {
            lexer,
            cur_token: Token::eof(),
            peek_token: Token::eof(),
            errors: Vec::new(),
        };

        // Fill cur_token and peek_token.
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Creates a parser directly from source text.
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Lexer::new(source))
    }

    /// The errors collected so far.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the parser, yielding its collected errors.
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Parses statements until `EOF`.
    ///
    /// A statement that fails to parse records its error and is dropped;
    /// parsing resumes at the following token.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_token_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => program.statements.push(stmt),
                Err(err) => self.errors.push(err),
            }
            self.next_token();
        }

        program
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            TokenKind::While => self.parse_while_statement().map(Statement::While),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> ParseResult<LetStatement> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.clone(),
        };

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Semicolon)?;

        Ok(LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> ParseResult<ReturnStatement> {
        let token = self.cur_token.clone();
        self.next_token();

        let return_value = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Semicolon)?;

        Ok(ReturnStatement {
            token,
            return_value,
        })
    }

    fn parse_while_statement(&mut self) -> ParseResult<WhileStatement> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;

        let body = self.parse_block_statement()?;

        Ok(WhileStatement {
            token,
            condition,
            body,
        })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<ExpressionStatement> {
        let token = self.cur_token.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        // The trailing semicolon is optional after an expression statement.
        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Ok(ExpressionStatement { token, expression })
    }

    /// Parses statements between `{` and `}`. The cursor must be on the
    /// opening brace.
    pub(crate) fn parse_block_statement(&mut self) -> ParseResult<BlockStatement> {
        let token = self.cur_token.clone();
        let mut statements = Vec::new();

        self.next_token();

        while !self.cur_token_is(TokenKind::RBrace) && !self.cur_token_is(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
            self.next_token();
        }

        Ok(BlockStatement { token, statements })
    }

    // =========================================================================
    // TOKEN PLUMBING
    // =========================================================================

    /// Advances the lookahead window, dropping comment tokens.
    pub(crate) fn next_token(&mut self) {
        let mut token = self.lexer.next_token();
        while token.kind == TokenKind::Comment {
            token = self.lexer.next_token();
        }
        self.cur_token = std::mem::replace(&mut self.peek_token, token);
    }

    pub(crate) fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    pub(crate) fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advances if the next token has the expected kind, errors otherwise.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek_token_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind,
                got: self.peek_token.kind,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;

    fn parse_program(source: &str) -> Program {
        let mut parser = Parser::from_source(source);
        let program = parser.parse_program();
        assert!(
            parser.errors().is_empty(),
            "parser errors for input {:?}: {:?}",
            source,
            parser.errors()
        );
        program
    }

    fn parse_errors(source: &str) -> Vec<String> {
        let mut parser = Parser::from_source(source);
        parser.parse_program();
        parser
            .into_errors()
            .iter()
            .map(ParseError::to_string)
            .collect()
    }

    // =========================================================================
    // LET STATEMENTS
    // =========================================================================

    #[test]
    fn test_let_statements() {
        let tests = [
            ("let x = 5;", "x", "5"),
            ("let y = true;", "y", "true"),
            ("let foobar = y;", "foobar", "y"),
        ];

        for (source, name, value) in tests {
            let program = parse_program(source);
            assert_eq!(program.statements.len(), 1);

            let Statement::Let(stmt) = &program.statements[0] else {
                panic!("expected let statement, got {:?}", program.statements[0]);
            };
            assert_eq!(stmt.token.literal, "let");
            assert_eq!(stmt.name.value, name);
            assert_eq!(stmt.value.to_string(), value);
        }
    }

    #[test]
    fn test_let_statement_errors() {
        let tests = [
            ("let x 5;", "expected next token to be =, got INT instead"),
            ("let = 5;", "expected next token to be IDENT, got = instead"),
            ("let 838383;", "expected next token to be IDENT, got INT instead"),
            ("let x = 5", "expected next token to be ;, got EOF instead"),
        ];

        for (source, expected) in tests {
            let errors = parse_errors(source);
            assert!(!errors.is_empty(), "no errors for {:?}", source);
            assert_eq!(errors[0], expected, "input {:?}", source);
        }
    }

    // =========================================================================
    // RETURN STATEMENTS
    // =========================================================================

    #[test]
    fn test_return_statements() {
        let tests = [
            ("return 5;", "5"),
            ("return true;", "true"),
            ("return foobar;", "foobar"),
        ];

        for (source, value) in tests {
            let program = parse_program(source);
            assert_eq!(program.statements.len(), 1);

            let Statement::Return(stmt) = &program.statements[0] else {
                panic!("expected return statement, got {:?}", program.statements[0]);
            };
            assert_eq!(stmt.token.literal, "return");
            assert_eq!(stmt.return_value.to_string(), value);
        }
    }

    #[test]
    fn test_return_requires_semicolon() {
        let errors = parse_errors("return 5");
        assert_eq!(errors[0], "expected next token to be ;, got EOF instead");
    }

    // =========================================================================
    // WHILE STATEMENTS
    // =========================================================================

    #[test]
    fn test_while_statement() {
        let program = parse_program("while (x < 3) { let y = x + 1; }");
        assert_eq!(program.statements.len(), 1);

        let Statement::While(stmt) = &program.statements[0] else {
            panic!("expected while statement, got {:?}", program.statements[0]);
        };
        assert_eq!(stmt.condition.to_string(), "(x < 3)");
        assert_eq!(stmt.body.statements.len(), 1);
        assert_eq!(program.to_string(), "while ((x < 3)) let y = (x + 1);");
    }

    #[test]
    fn test_while_requires_parenthesized_condition() {
        let errors = parse_errors("while x < 3 { x; }");
        assert_eq!(errors[0], "expected next token to be (, got IDENT instead");
    }

    // =========================================================================
    // PROGRAM-LEVEL BEHAVIOR
    // =========================================================================

    #[test]
    fn test_comments_are_skipped() {
        let source = "// leading comment\nlet x = 5; // trailing comment\n// another\nx;";
        let program = parse_program(source);
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.to_string(), "let x = 5;x");
    }

    #[test]
    fn test_errors_do_not_abort_later_statements() {
        let mut parser = Parser::from_source("let x 5; let y = 10;");
        let program = parser.parse_program();
        assert_eq!(parser.errors().len(), 1);
        assert!(program
            .statements
            .iter()
            .any(|stmt| matches!(stmt, Statement::Let(s) if s.name.value == "y")));
    }

    #[test]
    fn test_parse_reports_all_errors() {
        let result = parse("let x 5; let = 10; let 838383;");
        let errors = result.expect_err("expected parse failure");
        // One error per broken statement, plus recovery cascades.
        assert!(errors.len() >= 3, "got {:?}", errors);
        assert_eq!(
            errors[0].to_string(),
            "expected next token to be =, got INT instead"
        );
    }

    #[test]
    fn test_expression_statement_semicolon_optional() {
        let program = parse_program("x + y");
        assert_eq!(program.statements.len(), 1);

        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        assert!(matches!(stmt.expression, Expression::Infix(_)));
    }

    // =========================================================================
    // ROUND-TRIP
    // =========================================================================

    #[test]
    fn test_string_rendering_reparses_to_same_string() {
        let sources = [
            "let x = 5;",
            "return (a + b);",
            "if (x < y) { x } else { y }",
            "let add = fn(a, b) { return a + b; };",
            "add(1, 2 * 3, 4 + 5);",
            "[1, 2, 3][1]",
            "{\"one\": 1, \"two\": 2}",
            "let m = macro(x) { quote(unquote(x) + 1); };",
            "while (x < 10) { let x = x + 1; }",
        ];

        for source in sources {
            let first = parse_program(source).to_string();
            let second = parse_program(&first).to_string();
            assert_eq!(second, first, "round trip diverged for {:?}", source);
        }
    }
}
