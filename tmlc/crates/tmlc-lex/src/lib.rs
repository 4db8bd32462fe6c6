//! tmlc-lex - Streaming lexer for TOML 0.4 input.
//!
//! The lexer validates the input as UTF-8 once, then hands out one token per
//! [`Lexer::next_token`] call. Tokens carry their span plus a decoded payload:
//! integers and floats arrive as values, dates as a [`tmlc_util::Date`], and
//! strings/identifiers as owned text with escape sequences already expanded
//! ("demangled"). The input buffer itself is never mutated.
//!
//! Token boundaries follow the TOML 0.4 surface: newline is a token rather
//! than whitespace, comments are emitted (the grammar skips them), and bare
//! `true`/`false` are plain identifiers - the grammar decides what an
//! identifier means in value position.

pub mod cursor;
mod edge_cases;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind, TokenValue};
