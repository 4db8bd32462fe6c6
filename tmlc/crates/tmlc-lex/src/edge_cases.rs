//! Edge case tests for tmlc-lex
