//! Core lexer: dispatch, whitespace, comments.
//!
//! One token family per submodule; each extends [`Lexer`] with the lexing
//! methods for its family.

mod date;
mod identifier;
mod string;
mod value;

use tmlc_util::{ErrorKind, Result, Span, TomlError};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, TokenValue};

/// Streaming lexer over a single TOML input.
///
/// Construction validates the input as UTF-8; after that, every
/// [`next_token`](Lexer::next_token) call skips line whitespace and emits
/// exactly one token. Newline is a token, not whitespace, and comments are
/// emitted rather than swallowed - the grammar engine decides to skip them.
#[derive(Debug)]
pub struct Lexer<'a> {
    /// Character cursor over the decoded input.
    cursor: Cursor<'a>,

    /// Byte offset where the current token starts.
    token_start: usize,

    /// Line where the current token starts (1-based).
    token_line: u32,

    /// Column where the current token starts (1-based).
    token_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`, validating it as UTF-8.
    ///
    /// Fails with [`ErrorKind::Encoding`] on ill-formed input; the error's
    /// `code` field records how many leading bytes were valid. NUL bytes are
    /// well-formed UTF-8 and pass through as ordinary data.
    pub fn new(input: &'a [u8]) -> Result<Self> {
        let source =
            std::str::from_utf8(input).map_err(|e| TomlError::encoding(e.valid_up_to()))?;

        Ok(Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_line: 1,
            token_column: 1,
        })
    }

    /// Returns the next token.
    ///
    /// Skips spaces, tabs, and carriage returns, records the token start,
    /// then dispatches on the first character. At end of input this keeps
    /// returning [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Result<Token> {
        self.eat_whitespace();

        self.token_start = self.cursor.position();
        self.token_line = self.cursor.line();
        self.token_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Ok(self.token(TokenKind::Eof, TokenValue::None));
        }

        match self.cursor.current_char() {
            '\n' => Ok(self.single(TokenKind::Newline)),
            '[' => Ok(self.single(TokenKind::BracketOpen)),
            ']' => Ok(self.single(TokenKind::BracketClose)),
            '{' => Ok(self.single(TokenKind::BraceOpen)),
            '}' => Ok(self.single(TokenKind::BraceClose)),
            '=' => Ok(self.single(TokenKind::Equals)),
            ',' => Ok(self.single(TokenKind::Comma)),
            ':' => Ok(self.single(TokenKind::Colon)),
            '.' => Ok(self.single(TokenKind::Dot)),
            '#' => Ok(self.lex_comment()),
            '\'' => self.lex_quote(true),
            '"' => self.lex_quote(false),
            c if c == '+' || c == '-' || c.is_ascii_digit() => self.lex_value(),
            _ => Ok(self.lex_identifier()),
        }
    }

    /// Skips line whitespace: space, tab, carriage return. Newline is a
    /// token and is left in place.
    fn eat_whitespace(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' => self.cursor.advance(),
                _ => break,
            }
        }
    }

    /// Consumes a `#` comment up to (not past) the next newline, so a
    /// NEWLINE token still follows it.
    fn lex_comment(&mut self) -> Token {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }

        self.token(TokenKind::Comment, TokenValue::None)
    }

    /// Emits a single-character token.
    fn single(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.token(kind, TokenValue::None)
    }

    /// Builds a token spanning from the recorded token start to the current
    /// cursor position.
    pub(crate) fn token(&self, kind: TokenKind, value: TokenValue) -> Token {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_line,
            self.token_column,
        );
        Token::new(kind, span, value)
    }

    /// An error positioned at the current cursor location.
    pub(crate) fn error_here(&self, kind: ErrorKind) -> TomlError {
        TomlError::new(kind, self.cursor.line(), self.cursor.column())
    }

    /// An error positioned at the start of the current token.
    pub(crate) fn error_at_start(&self, kind: ErrorKind) -> TomlError {
        TomlError::new(kind, self.token_line, self.token_column)
    }

    /// Current line number (1-based).
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Current column number (1-based, in code points).
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }
}

/// Iterates tokens up to (not including) EOF. After an error is yielded the
/// iterator should not be polled further.
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(tok) if tok.kind == TokenKind::Eof => None,
            other => Some(other),
        }
    }
}
