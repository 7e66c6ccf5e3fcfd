//! mnk-lex - Lexical analyzer for the Monkey language.
//!
//! Transforms Monkey source text into a stream of tokens. The lexer is
//! pull-based: the parser calls [`Lexer::next_token`] repeatedly and
//! receives `EOF` forever once the input is exhausted.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{lookup_ident, Token, TokenKind};
