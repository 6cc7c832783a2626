//! Parser module: grammar recognition and C code generation in one pass.
//!
//! Each grammar rule is a function that validates its structure and
//! immediately writes the matching C fragment to the emitter. It handles:
//!
//! - Statement dispatch through a lookup table keyed by token kind
//! - `print`, `if`/`elseif`/`else`, `while`, `var` and reassignment
//! - Comparisons and arithmetic expressions with `*`/`/` binding tighter
//!   than `+`/`-`
//! - Type inference from a variable's first assignment
//!
//! The first error stops the whole translation.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
