//! Error types and error handling for the transpiler.
//!
//! This module defines the single error value surfaced by every phase.
//! It includes:
//!
//! - An error structure carrying the line and column of the failure
//! - One variant per lexical or syntactic failure
//! - Error names, categories and human-readable suggestions

pub mod errors;
