//! Error model for the tmlc parser.
//!
//! Every failure in the pipeline - decoding, lexing, grammar actions - is
//! terminal for the parse and surfaces as a single [`TomlError`]: a kind plus
//! the line/column captured at the point of detection.

use thiserror::Error;

use crate::Span;

/// Classification of a parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The input was not well-formed UTF-8.
    #[error("input is not valid UTF-8")]
    Encoding,

    /// The parser reached a state it believes unreachable; a bug, not an
    /// input problem.
    #[error("internal parser error")]
    Internal,

    /// An allocation failed.
    #[error("out of memory")]
    OutOfMemory,

    /// A `"..."` string hit a newline or end of input before closing.
    #[error("unclosed double-quoted string")]
    UnclosedDoubleQuote,

    /// A `'...'` string hit a newline or end of input before closing.
    #[error("unclosed single-quoted string")]
    UnclosedSingleQuote,

    /// A `"""..."""` string hit end of input before closing.
    #[error("unclosed triple-double-quoted string")]
    UnclosedTripleDoubleQuote,

    /// A `'''...'''` string hit end of input before closing.
    #[error("unclosed triple-single-quoted string")]
    UnclosedTripleSingleQuote,

    /// A backslash escape other than the recognized set, or a malformed
    /// `\u`/`\U` codepoint escape.
    #[error("invalid escape sequence")]
    InvalidEscape,

    /// An integer literal with no digits, leading zeros, stray characters,
    /// or a value outside the signed 64-bit range.
    #[error("invalid integer literal")]
    InvalidInt,

    /// A float literal with a malformed integer, fractional, or exponent
    /// part.
    #[error("invalid float literal")]
    InvalidDouble,

    /// A date literal with wrong digit counts, separators, or field ranges.
    #[error("invalid date literal")]
    InvalidDate,

    /// An underscore separator in a numeric literal that is leading,
    /// trailing, or doubled.
    #[error("misplaced underscore in numeric literal")]
    InvalidUnderscore,

    /// A table header re-declared a table that was already declared.
    #[error("table redeclared")]
    TableReassigned,

    /// A key was assigned a second time.
    #[error("value reassigned")]
    ValueReassigned,

    /// The token stream did not match the grammar.
    #[error("syntax error")]
    Parse,

    /// A bare identifier other than `true`/`false` appeared in value
    /// position.
    #[error("misplaced identifier")]
    MisplacedIdentifier,

    /// An array-of-tables header collided with an existing non-table-array
    /// value.
    #[error("list redeclared")]
    ListReassigned,

    /// An inline array with elements of differing kinds.
    #[error("mixed types in array")]
    MixedList,
}

/// A terminal parse failure with its position.
///
/// `line` and `column` locate the point of detection (1-based; columns count
/// code points). `code` carries auxiliary detail for [`ErrorKind::Encoding`]:
/// the number of leading input bytes that were valid UTF-8. It is zero for
/// every other kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{line}:{column}: {kind}")]
pub struct TomlError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Line of the offending character (1-based).
    pub line: u32,
    /// Column of the offending character (1-based, in code points).
    pub column: u32,
    /// Auxiliary error detail; see the type-level docs.
    pub code: usize,
}

impl TomlError {
    /// Creates an error at an explicit line/column.
    pub fn new(kind: ErrorKind, line: u32, column: u32) -> Self {
        Self {
            kind,
            line,
            column,
            code: 0,
        }
    }

    /// Creates an error positioned at the start of `span`.
    pub fn at(kind: ErrorKind, span: Span) -> Self {
        Self::new(kind, span.line, span.column)
    }

    /// Creates a UTF-8 decoding error. `valid_up_to` is the number of
    /// leading bytes that decoded cleanly; the reported position assumes the
    /// failure is on line 1 of an undecodable input.
    pub fn encoding(valid_up_to: usize) -> Self {
        Self {
            kind: ErrorKind::Encoding,
            line: 1,
            column: 1,
            code: valid_up_to,
        }
    }
}

/// Convenience alias used across the tmlc crates.
pub type Result<T> = std::result::Result<T, TomlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = TomlError::new(ErrorKind::Parse, 3, 7);
        assert_eq!(err.to_string(), "3:7: syntax error");
    }

    #[test]
    fn test_at_takes_span_start() {
        let span = Span::new(10, 14, 2, 5);
        let err = TomlError::at(ErrorKind::MixedList, span);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 5);
        assert_eq!(err.code, 0);
    }

    #[test]
    fn test_encoding_carries_valid_prefix_len() {
        let err = TomlError::encoding(12);
        assert_eq!(err.kind, ErrorKind::Encoding);
        assert_eq!(err.code, 12);
    }

    #[test]
    fn test_kind_messages() {
        assert_eq!(
            ErrorKind::UnclosedSingleQuote.to_string(),
            "unclosed single-quoted string"
        );
        assert_eq!(ErrorKind::MixedList.to_string(), "mixed types in array");
    }
}
