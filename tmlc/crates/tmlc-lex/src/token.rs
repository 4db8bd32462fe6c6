//! Token definitions.

use tmlc_util::{Date, Span};

/// The kind of a lexed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `# ...` up to (not including) the next newline.
    Comment,
    /// Any of the four string forms, escape-processed.
    String,
    /// A bare word; includes `true`/`false`.
    Identifier,
    /// Signed 64-bit integer literal.
    Int,
    /// Float literal.
    Double,
    /// Date-time literal.
    Date,
    /// `\n`.
    Newline,
    /// `=`.
    Equals,
    /// `,`.
    Comma,
    /// `:`.
    Colon,
    /// `.`.
    Dot,
    /// `{`.
    BraceOpen,
    /// `}`.
    BraceClose,
    /// `[`.
    BracketOpen,
    /// `]`.
    BracketClose,
    /// End of input.
    Eof,
}

/// Decoded payload of a token.
///
/// Punctuation, newlines, comments, and EOF carry [`TokenValue::None`].
/// String and identifier tokens own their final text; for strings that is
/// the post-demangle form with escapes expanded and triple-quote trimming
/// applied.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    None,
    Int(i64),
    Float(f64),
    Date(Date),
    Text(String),
}

/// One lexed token: kind, source span, decoded payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub value: TokenValue,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, span: Span, value: TokenValue) -> Self {
        Self { kind, span, value }
    }

    /// The textual payload of a string or identifier token; empty for
    /// everything else.
    pub fn text(&self) -> &str {
        match &self.value {
            TokenValue::Text(text) => text,
            _ => "",
        }
    }

    /// The integer payload, or 0 for non-INT tokens.
    pub fn int_value(&self) -> i64 {
        match self.value {
            TokenValue::Int(v) => v,
            _ => 0,
        }
    }

    /// The float payload, or 0.0 for non-DOUBLE tokens.
    pub fn float_value(&self) -> f64 {
        match self.value {
            TokenValue::Float(v) => v,
            _ => 0.0,
        }
    }

    /// The date payload, or the zero date for non-DATE tokens.
    pub fn date_value(&self) -> Date {
        match self.value {
            TokenValue::Date(d) => d,
            _ => Date::default(),
        }
    }
}
