//! Numeric value lexing: classification plus INT/DOUBLE decoding.
//!
//! A value literal is first scanned as a maximal run over the characters
//! that can appear in integers, floats, and dates; the run's contents then
//! pick the kind. Dates force themselves via `T`/`t`/`Z`/`z`/`:` or an
//! interior `-` separator; otherwise `.`/`e`/`E` mean DOUBLE, and anything
//! left is INT.

use tmlc_util::{ErrorKind, Result};

use crate::token::{Token, TokenKind, TokenValue};
use crate::Lexer;

/// Characters that may appear anywhere in a numeric or date literal.
fn in_value_set(c: char) -> bool {
    matches!(c, '0'..='9' | '_' | '+' | '-' | '.' | 'e' | 'E' | ':' | 't' | 'T' | 'z' | 'Z')
}

/// Splits an optional leading sign off a literal.
fn split_sign(text: &str) -> (&str, &str) {
    match text.as_bytes().first() {
        Some(b'+') => ("+", &text[1..]),
        Some(b'-') => ("-", &text[1..]),
        _ => ("", text),
    }
}

impl<'a> Lexer<'a> {
    /// Lexes a value starting at `+`, `-`, or a digit.
    pub(crate) fn lex_value(&mut self) -> Result<Token> {
        let start = self.cursor.position();
        while in_value_set(self.cursor.current_char()) && !self.cursor.is_at_end() {
            self.cursor.advance();
        }
        let run = self.cursor.slice_from(start);

        let mut force_date = false;
        let mut float_marker = false;
        let mut prev = '\0';
        for (i, c) in run.chars().enumerate() {
            match c {
                ':' | 't' | 'T' | 'z' | 'Z' => force_date = true,
                // A date separator; an exponent sign sits right after e/E
                // and a leading sign at position 0.
                '-' if i != 0 && prev != 'e' && prev != 'E' => force_date = true,
                '.' | 'e' | 'E' => float_marker = true,
                _ => {}
            }
            prev = c;
        }

        if force_date {
            let date = self.parse_date(run)?;
            Ok(self.token(TokenKind::Date, TokenValue::Date(date)))
        } else if float_marker {
            let value = self.parse_float(run)?;
            Ok(self.token(TokenKind::Double, TokenValue::Float(value)))
        } else {
            let value = self.parse_int(run)?;
            Ok(self.token(TokenKind::Int, TokenValue::Int(value)))
        }
    }

    /// Decodes a signed 64-bit integer literal.
    fn parse_int(&self, run: &str) -> Result<i64> {
        let (sign, digits) = split_sign(run);
        let cleaned = self.strip_underscores(digits, ErrorKind::InvalidInt)?;

        if cleaned.len() > 1 && cleaned.starts_with('0') {
            return Err(self.error_at_start(ErrorKind::InvalidInt));
        }

        let mut text = String::with_capacity(sign.len() + cleaned.len());
        text.push_str(sign);
        text.push_str(&cleaned);
        text.parse::<i64>()
            .map_err(|_| self.error_at_start(ErrorKind::InvalidInt))
    }

    /// Decodes a float literal: integer part, optional fraction, optional
    /// signed exponent.
    fn parse_float(&self, run: &str) -> Result<f64> {
        let (mantissa, exponent) = match run.find(['e', 'E']) {
            Some(i) => (&run[..i], Some(&run[i + 1..])),
            None => (run, None),
        };
        let (sign, mantissa) = split_sign(mantissa);
        let (int_part, frac_part) = match mantissa.find('.') {
            Some(i) => (&mantissa[..i], Some(&mantissa[i + 1..])),
            None => (mantissa, None),
        };

        let int_clean = self.strip_underscores(int_part, ErrorKind::InvalidDouble)?;
        if int_clean.len() > 1 && int_clean.starts_with('0') {
            return Err(self.error_at_start(ErrorKind::InvalidDouble));
        }

        let mut text = String::with_capacity(run.len());
        text.push_str(sign);
        text.push_str(&int_clean);

        if let Some(frac) = frac_part {
            let frac_clean = self.strip_underscores(frac, ErrorKind::InvalidDouble)?;
            text.push('.');
            text.push_str(&frac_clean);
        }

        if let Some(exp) = exponent {
            let (exp_sign, exp_digits) = split_sign(exp);
            let exp_clean = self.strip_underscores(exp_digits, ErrorKind::InvalidDouble)?;
            text.push('e');
            text.push_str(exp_sign);
            text.push_str(&exp_clean);
        }

        text.parse::<f64>()
            .map_err(|_| self.error_at_start(ErrorKind::InvalidDouble))
    }

    /// Validates underscore placement in one digit group and returns the
    /// group with separators removed. `invalid` is the kind reported for a
    /// missing digit or a non-digit character; underscore placement faults
    /// report [`ErrorKind::InvalidUnderscore`].
    pub(in crate::lexer) fn strip_underscores(
        &self,
        part: &str,
        invalid: ErrorKind,
    ) -> Result<String> {
        if part.is_empty() {
            return Err(self.error_at_start(invalid));
        }
        if part.starts_with('_') || part.ends_with('_') || part.contains("__") {
            return Err(self.error_at_start(ErrorKind::InvalidUnderscore));
        }

        let mut out = String::with_capacity(part.len());
        for c in part.chars() {
            if c == '_' {
                continue;
            }
            if !c.is_ascii_digit() {
                return Err(self.error_at_start(invalid));
            }
            out.push(c);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(source: &str) -> Token {
        let mut lexer = Lexer::new(source.as_bytes()).unwrap();
        lexer.next_token().unwrap()
    }

    fn lex_int(source: &str) -> i64 {
        let tok = lex_one(source);
        assert_eq!(tok.kind, TokenKind::Int);
        tok.int_value()
    }

    fn lex_float(source: &str) -> f64 {
        let tok = lex_one(source);
        assert_eq!(tok.kind, TokenKind::Double);
        tok.float_value()
    }

    fn lex_err(source: &str) -> ErrorKind {
        let mut lexer = Lexer::new(source.as_bytes()).unwrap();
        lexer.next_token().unwrap_err().kind
    }

    #[test]
    fn test_int_basic() {
        assert_eq!(lex_int("0"), 0);
        assert_eq!(lex_int("42"), 42);
        assert_eq!(lex_int("+99"), 99);
        assert_eq!(lex_int("-17"), -17);
    }

    #[test]
    fn test_int_underscores() {
        assert_eq!(lex_int("1_000"), 1000);
        assert_eq!(lex_int("5_349_221"), 5_349_221);
        assert_eq!(lex_int("-1_2"), -12);
    }

    #[test]
    fn test_int_limits() {
        assert_eq!(lex_int("9223372036854775807"), i64::MAX);
        assert_eq!(lex_int("-9223372036854775808"), i64::MIN);
        assert_eq!(lex_err("9223372036854775808"), ErrorKind::InvalidInt);
    }

    #[test]
    fn test_int_bad_underscores() {
        assert_eq!(lex_err("4__2"), ErrorKind::InvalidUnderscore);
        assert_eq!(lex_err("1_"), ErrorKind::InvalidUnderscore);
        assert_eq!(lex_err("+_1"), ErrorKind::InvalidUnderscore);
    }

    #[test]
    fn test_int_leading_zero() {
        assert_eq!(lex_err("042"), ErrorKind::InvalidInt);
        assert_eq!(lex_err("-07"), ErrorKind::InvalidInt);
        assert_eq!(lex_int("+0"), 0);
    }

    #[test]
    fn test_int_no_digits() {
        assert_eq!(lex_err("+"), ErrorKind::InvalidInt);
        assert_eq!(lex_err("-"), ErrorKind::InvalidInt);
        assert_eq!(lex_err("++1"), ErrorKind::InvalidInt);
    }

    #[test]
    fn test_float_basic() {
        assert_eq!(lex_float("3.14"), 3.14);
        assert_eq!(lex_float("-0.01"), -0.01);
        assert_eq!(lex_float("1e6"), 1e6);
        assert_eq!(lex_float("5e+22"), 5e22);
        assert_eq!(lex_float("-2E-2"), -2e-2);
        assert_eq!(lex_float("6.626e-34"), 6.626e-34);
    }

    #[test]
    fn test_float_underscores() {
        assert_eq!(lex_float("9_224_617.445_991"), 9_224_617.445_991);
        assert_eq!(lex_float("1e1_0"), 1e10);
    }

    #[test]
    fn test_float_requires_digits_around_dot() {
        assert_eq!(lex_err("1."), ErrorKind::InvalidDouble);
        assert_eq!(lex_err("3.e2"), ErrorKind::InvalidDouble);
        assert_eq!(lex_float("0.5"), 0.5);
    }

    #[test]
    fn test_float_exponent_needs_digits() {
        assert_eq!(lex_err("1e"), ErrorKind::InvalidDouble);
        assert_eq!(lex_err("1e+"), ErrorKind::InvalidDouble);
    }

    #[test]
    fn test_float_bad_shapes() {
        assert_eq!(lex_err("1.2.3"), ErrorKind::InvalidDouble);
        assert_eq!(lex_err("01.5"), ErrorKind::InvalidDouble);
        assert_eq!(lex_err("1._5"), ErrorKind::InvalidUnderscore);
    }

    #[test]
    fn test_value_errors_point_at_literal_start() {
        let mut lexer = Lexer::new(b"x = 4__2").unwrap();
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidUnderscore);
        assert_eq!((err.line, err.column), (1, 5));
    }
}
