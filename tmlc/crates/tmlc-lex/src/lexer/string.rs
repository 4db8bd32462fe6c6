//! String literal lexing.
//!
//! Four forms, all emitted as [`TokenKind::String`]: single-quoted (literal),
//! double-quoted (escaped), and the triple-quoted variants of each, which may
//! span lines. Escape demangling happens here, into the token's own scratch
//! string; the input buffer is left untouched.

use tmlc_util::{ErrorKind, Result, TomlError};

use crate::token::{Token, TokenKind, TokenValue};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes any of the four string forms. `single` selects the quote
    /// character the dispatcher saw.
    pub(crate) fn lex_quote(&mut self, single: bool) -> Result<Token> {
        let quote = if single { '\'' } else { '"' };
        let triple = self.cursor.peek_char(1) == quote && self.cursor.peek_char(2) == quote;

        match (single, triple) {
            (true, false) => self.lex_single_quoted(),
            (false, false) => self.lex_double_quoted(),
            (true, true) => self.lex_triple_single(),
            (false, true) => self.lex_triple_double(),
        }
    }

    /// `'...'` - literal, no escapes, single line.
    fn lex_single_quoted(&mut self) -> Result<Token> {
        self.cursor.advance();

        let mut text = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_here(ErrorKind::UnclosedSingleQuote));
            }

            match self.cursor.current_char() {
                '\'' => {
                    self.cursor.advance();
                    break;
                }
                '\n' => return Err(self.error_here(ErrorKind::UnclosedSingleQuote)),
                c => {
                    text.push(c);
                    self.cursor.advance();
                }
            }
        }

        Ok(self.token(TokenKind::String, TokenValue::Text(text)))
    }

    /// `"..."` - escapes processed, single line.
    fn lex_double_quoted(&mut self) -> Result<Token> {
        self.cursor.advance();

        let mut text = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_here(ErrorKind::UnclosedDoubleQuote));
            }

            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\n' => return Err(self.error_here(ErrorKind::UnclosedDoubleQuote)),
                '\\' => {
                    let (line, column) = (self.cursor.line(), self.cursor.column());
                    self.cursor.advance();
                    text.push(self.demangle_escape(
                        ErrorKind::UnclosedDoubleQuote,
                        line,
                        column,
                    )?);
                }
                c => {
                    text.push(c);
                    self.cursor.advance();
                }
            }
        }

        Ok(self.token(TokenKind::String, TokenValue::Text(text)))
    }

    /// `'''...'''` - literal, may span lines.
    fn lex_triple_single(&mut self) -> Result<Token> {
        self.cursor.advance();
        self.cursor.advance();
        self.cursor.advance();
        self.trim_leading_newline();

        let mut text = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_here(ErrorKind::UnclosedTripleSingleQuote));
            }

            if self.at_triple('\'') {
                self.cursor.advance();
                self.cursor.advance();
                self.cursor.advance();
                break;
            }

            text.push(self.cursor.current_char());
            self.cursor.advance();
        }

        Ok(self.token(TokenKind::String, TokenValue::Text(text)))
    }

    /// `"""..."""` - escapes processed, may span lines, backslash-newline
    /// continuation.
    fn lex_triple_double(&mut self) -> Result<Token> {
        self.cursor.advance();
        self.cursor.advance();
        self.cursor.advance();
        self.trim_leading_newline();

        let mut text = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_here(ErrorKind::UnclosedTripleDoubleQuote));
            }

            if self.at_triple('"') {
                self.cursor.advance();
                self.cursor.advance();
                self.cursor.advance();
                break;
            }

            match self.cursor.current_char() {
                '\\' => {
                    let (line, column) = (self.cursor.line(), self.cursor.column());
                    self.cursor.advance();
                    if self.cursor.current_char() == '\n' {
                        // Backslash before a newline eats the newline and all
                        // following whitespace, newlines included.
                        self.cursor.advance();
                        self.eat_string_whitespace();
                    } else {
                        text.push(self.demangle_escape(
                            ErrorKind::UnclosedTripleDoubleQuote,
                            line,
                            column,
                        )?);
                    }
                }
                c => {
                    text.push(c);
                    self.cursor.advance();
                }
            }
        }

        Ok(self.token(TokenKind::String, TokenValue::Text(text)))
    }

    /// True if the next three characters are all `quote`.
    fn at_triple(&self, quote: char) -> bool {
        self.cursor.current_char() == quote
            && self.cursor.peek_char(1) == quote
            && self.cursor.peek_char(2) == quote
    }

    /// Applies the triple-quote opening trim: a newline directly after the
    /// opening delimiter is dropped together with the whitespace/newline run
    /// that follows it.
    fn trim_leading_newline(&mut self) {
        if self.cursor.current_char() == '\n' {
            self.cursor.advance();
            self.eat_string_whitespace();
        }
    }

    /// Skips spaces, tabs, carriage returns, and newlines.
    fn eat_string_whitespace(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => self.cursor.advance(),
                _ => break,
            }
        }
    }

    /// Expands one escape sequence. The backslash has already been consumed;
    /// `line`/`column` point at it for error reporting. `unclosed` is the
    /// error kind to report if the input ends mid-escape.
    fn demangle_escape(&mut self, unclosed: ErrorKind, line: u32, column: u32) -> Result<char> {
        if self.cursor.is_at_end() {
            return Err(self.error_here(unclosed));
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        match c {
            'b' => Ok('\u{0008}'),
            't' => Ok('\t'),
            'n' => Ok('\n'),
            'f' => Ok('\u{000C}'),
            'r' => Ok('\r'),
            '\\' => Ok('\\'),
            '"' => Ok('"'),
            'u' => self.hex_escape(4, line, column),
            'U' => self.hex_escape(8, line, column),
            _ => Err(TomlError::new(ErrorKind::InvalidEscape, line, column)),
        }
    }

    /// Reads exactly `digits` hex digits and converts them to a code point.
    fn hex_escape(&mut self, digits: u32, line: u32, column: u32) -> Result<char> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let d = self
                .cursor
                .current_char()
                .to_digit(16)
                .ok_or(TomlError::new(ErrorKind::InvalidEscape, line, column))?;
            value = value * 16 + d;
            self.cursor.advance();
        }

        char::from_u32(value).ok_or(TomlError::new(ErrorKind::InvalidEscape, line, column))
    }
}
