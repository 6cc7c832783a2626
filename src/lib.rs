#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    emitter::emitter::Emitter,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Lexer,
};

pub mod emitter;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Line and column inside a named source.
///
/// Lines are 1-based. Columns in diagnostics are 0-based offsets into the
/// line; token start positions use 1-based columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }
}

/// Translates `lexer`'s source into `emitter`.
pub fn transpile(lexer: Lexer, emitter: &mut Emitter) -> Result<(), Error> {
    parser::parser::parse(lexer, emitter)
}

/// Translates `source` and returns the generated C program.
pub fn compile(source: String, file: Option<String>) -> Result<String, Error> {
    let mut emitter = Emitter::in_memory();
    transpile(Lexer::new(source, file), &mut emitter)?;

    Ok(emitter.output())
}

/// Returns the text of the 1-based `line` of `source`, without its newline.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches('\r'))
}


/// Formats an error with the offending source line and a caret under it.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: name (tip)
        -> test.fc
          |
        2 | print   y
          | --------^
    */

    let position = error.get_position();
    let line_text = get_line_at_position(source, position.line).unwrap_or("");

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}\n", position.file));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize).saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", render_error(error, source));
    eprintln!("{}", error);
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (&string[start..], start)
}
