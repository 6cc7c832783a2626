//! Output sink for generated C source.
//!
//! The emitter accumulates two ordered, append-only regions:
//!
//! - the header (includes and variable declarations)
//! - the body (the translated statements)
//!
//! and writes them out concatenated once the parser has finished.

pub mod emitter;
