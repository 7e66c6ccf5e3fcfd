//! Parser error types.

use mnk_lex::TokenKind;
use thiserror::Error;

/// A structural violation found while parsing.
///
/// The `Display` form of each variant is the user-facing message reported
/// by the driver and asserted by tests.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token after the current one was not what the production needed.
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        expected: TokenKind,
        got: TokenKind,
    },

    /// No expression can start with this token.
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),

    /// An integer literal did not fit in a signed 64-bit value.
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String },
}

/// Result alias used throughout the parser.
pub type ParseResult<T> = Result<T, ParseError>;
