//! Date literal decoding.
//!
//! `YYYY-MM-DD`, optionally `T`/`t` plus `HH:MM:SS`, optionally fractional
//! seconds (consumed, discarded), optionally `Z`/`z` or a `±HH:MM` offset.
//! Digit counts are mandatory; any deviation is `InvalidDate`.

use std::iter::Peekable;
use std::str::Chars;

use tmlc_util::{Date, ErrorKind, Result, TomlError};

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Decodes a date literal from an already-scanned value run.
    pub(in crate::lexer) fn parse_date(&self, run: &str) -> Result<Date> {
        let invalid = || self.error_at_start(ErrorKind::InvalidDate);
        let mut chars = run.chars().peekable();

        let year = take_digits(&mut chars, 4, invalid)? as i32;
        take_separator(&mut chars, '-', invalid)?;
        let month = take_digits(&mut chars, 2, invalid)?;
        take_separator(&mut chars, '-', invalid)?;
        let day = take_digits(&mut chars, 2, invalid)?;

        let mut hour = 0;
        let mut minute = 0;
        let mut second = 0;
        let mut offset = 0i32;

        if let Some(&c) = chars.peek() {
            if c != 'T' && c != 't' {
                return Err(invalid());
            }
            chars.next();

            hour = take_digits(&mut chars, 2, invalid)?;
            take_separator(&mut chars, ':', invalid)?;
            minute = take_digits(&mut chars, 2, invalid)?;
            take_separator(&mut chars, ':', invalid)?;
            second = take_digits(&mut chars, 2, invalid)?;

            // Fractional seconds: at least one digit, value ignored.
            if chars.peek() == Some(&'.') {
                chars.next();
                let mut any = false;
                while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                    chars.next();
                    any = true;
                }
                if !any {
                    return Err(invalid());
                }
            }

            match chars.next() {
                None => {}
                Some('Z') | Some('z') => {}
                Some(sign @ ('+' | '-')) => {
                    let oh = take_digits(&mut chars, 2, invalid)?;
                    take_separator(&mut chars, ':', invalid)?;
                    let om = take_digits(&mut chars, 2, invalid)?;
                    if oh > 23 || om > 59 {
                        return Err(invalid());
                    }
                    offset = (3600 * oh + 60 * om) as i32;
                    if sign == '-' {
                        offset = -offset;
                    }
                }
                Some(_) => return Err(invalid()),
            }
        }

        if chars.next().is_some() {
            return Err(invalid());
        }
        if !(1..=12).contains(&month)
            || !(1..=31).contains(&day)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return Err(invalid());
        }

        Ok(Date {
            year,
            month: month - 1,
            day,
            hour,
            minute,
            second,
            offset,
        })
    }
}

/// Reads exactly `count` ASCII digits.
fn take_digits(
    chars: &mut Peekable<Chars<'_>>,
    count: u32,
    invalid: impl Fn() -> TomlError,
) -> Result<u32> {
    let mut value = 0;
    for _ in 0..count {
        match chars.next().and_then(|c| c.to_digit(10)) {
            Some(d) => value = value * 10 + d,
            None => return Err(invalid()),
        }
    }
    Ok(value)
}

/// Consumes one expected separator character.
fn take_separator(
    chars: &mut Peekable<Chars<'_>>,
    expected: char,
    invalid: impl Fn() -> TomlError,
) -> Result<()> {
    if chars.next() == Some(expected) {
        Ok(())
    } else {
        Err(invalid())
    }
}
