//! Identifier lexing.
//!
//! An identifier is the fallback token: a maximal run of characters that are
//! not line whitespace, not a newline, and not one of the reserved
//! punctuation characters. The lexer does not interpret `true`/`false`;
//! the grammar gives identifiers meaning by position.

use crate::token::{Token, TokenKind, TokenValue};
use crate::Lexer;

/// Characters that terminate an identifier run.
fn is_reserved(c: char) -> bool {
    matches!(c, '.' | ',' | '=' | '[' | ']' | '{' | '}' | ':' | '#')
}

impl<'a> Lexer<'a> {
    /// Lexes a bare identifier, preserving its literal text.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();

        while !self.cursor.is_at_end() {
            let c = self.cursor.current_char();
            if c == '\n' || matches!(c, ' ' | '\t' | '\r') || is_reserved(c) {
                break;
            }
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start).to_string();
        self.token(TokenKind::Identifier, TokenValue::Text(text))
    }
}
