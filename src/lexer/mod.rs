//! Lexical analysis module for the transpiler.
//!
//! This module contains the pull lexer that the parser drives one token at
//! a time. It handles:
//!
//! - Single and two-character operators
//! - Keywords (case-insensitive) and identifiers
//! - Integer, decimal and string literals
//! - Newlines, `;` separators, `#` comments and whitespace
//! - Line and column tracking for error reporting

pub mod lexer;
pub mod tokens;
