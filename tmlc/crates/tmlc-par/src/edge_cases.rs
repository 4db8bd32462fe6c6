//! Edge case tests for tmlc-par
