//! Main lexer for Monkey source code.
//!
//! The lexer transforms source text into a stream of tokens using direct
//! character dispatch. Whitespace is skipped; `//` line comments are
//! emitted as [`TokenKind::Comment`] tokens so the parser can decide what
//! to do with them (it drops them while advancing).

use crate::cursor::Cursor;
use crate::token::{lookup_ident, Token, TokenKind};

/// The Monkey lexer.
///
/// # Example
///
/// ```
/// use mnk_lex::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("let x = 42;");
/// assert_eq!(lexer.next_token().kind, TokenKind::Let);
/// assert_eq!(lexer.next_token().literal, "x");
/// ```
pub struct Lexer<'a> {
    /// Character cursor over the source.
    cursor: Cursor<'a>,

    /// Start position of the token currently being lexed.
    token_start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
        }
    }

    /// Returns the next token from the source.
    ///
    /// Skips whitespace, then dispatches on the first character of the
    /// token. Returns [`Token::eof`] forever once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        self.token_start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Token::eof();
        }

        match self.cursor.current_char() {
            '=' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::new(TokenKind::Eq, "==")
                } else {
                    Token::new(TokenKind::Assign, "=")
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Token::new(TokenKind::NotEq, "!=")
                } else {
                    Token::new(TokenKind::Bang, "!")
                }
            }
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Asterisk),
            '/' => {
                if self.cursor.peek_char(1) == '/' {
                    self.lex_line_comment()
                } else {
                    self.single(TokenKind::Slash)
                }
            }
            '%' => self.single(TokenKind::Percent),
            '<' => self.single(TokenKind::Lt),
            '>' => self.single(TokenKind::Gt),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            ':' => self.single(TokenKind::Colon),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '"' => self.lex_string(),
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.cursor.advance();
                Token::new(TokenKind::Illegal, c.to_string())
            }
        }
    }

    /// Emits a single-character token of the given kind.
    fn single(&mut self, kind: TokenKind) -> Token {
        let c = self.cursor.current_char();
        self.cursor.advance();
        Token::new(kind, c.to_string())
    }

    /// Lexes an identifier or keyword.
    fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        Token::new(lookup_ident(text), text)
    }

    /// Lexes a decimal integer literal. The literal text is kept verbatim;
    /// conversion to `i64` (and overflow detection) happens in the parser.
    fn lex_number(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        Token::new(TokenKind::Int, self.cursor.slice_from(self.token_start))
    }

    /// Lexes a double-quoted string literal.
    ///
    /// No escape sequences are processed; the literal is the raw content
    /// between the quotes. An unterminated string ends at EOF.
    fn lex_string(&mut self) -> Token {
        self.cursor.advance();
        let content_start = self.cursor.position();

        while !self.cursor.is_at_end() && self.cursor.current_char() != '"' {
            self.cursor.advance();
        }

        let content = self.cursor.slice_from(content_start);
        self.cursor.match_char('"');

        Token::new(TokenKind::Str, content)
    }

    /// Lexes a `//` comment through the end of the line.
    fn lex_line_comment(&mut self) -> Token {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }

        Token::new(TokenKind::Comment, self.cursor.slice_from(self.token_start))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current_char(), ' ' | '\t' | '\r' | '\n') {
            self.cursor.advance();
        }
    }
}

/// Iterate over tokens up to (and excluding) `Eof`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
