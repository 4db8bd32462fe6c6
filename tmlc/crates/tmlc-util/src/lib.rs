//! tmlc-util - Shared foundation types for the tmlc TOML parser.
//!
//! This crate holds the small leaf types every other tmlc crate agrees on:
//! source spans, the calendar date-time representation, and the error model.
//! It deliberately has no knowledge of tokens or documents.

mod date;
mod error;
mod span;

pub use date::Date;
pub use error::{ErrorKind, Result, TomlError};
pub use span::Span;
