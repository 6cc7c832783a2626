//! Parser state and the top-level `program` rule.
//!
//! The parser pulls tokens from the lexer through a two-token window
//! (current and peek) and writes C fragments to the emitter as each rule
//! is recognised. There is no intermediate tree.
//!
//! It owns, for one compilation unit:
//! - The lexer
//! - The symbol table (variable name to inferred type)
//! - The statement lookup table

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::{
    emitter::emitter::Emitter,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
    stmt::parse_stmt,
};

/// Type inferred from a variable's first assignment.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VarType {
    String,
    Numeric,
}

/// Lexer location captured when a token enters the `current` slot.
#[derive(Debug, Clone, Copy, Default)]
struct Snapshot {
    line: u32,
    column: u32,
    last_line_end: u32,
}

pub struct Parser<'e> {
    lexer: Lexer,
    emitter: &'e mut Emitter,
    current: Token,
    peek: Token,
    /// Lexer location right after `current` was classified
    snapshot: Snapshot,
    /// Variables assigned so far
    symbols: HashMap<String, VarType>,
    // No rule declares or jumps to labels yet.
    #[allow(dead_code)]
    labels_declared: HashSet<String>,
    #[allow(dead_code)]
    labels_gotoed: HashSet<String>,
    stmt_lookup: StmtLookup,
}

impl<'e> Parser<'e> {
    /// Creates a parser and fills the two-token window.
    pub fn new(mut lexer: Lexer, emitter: &'e mut Emitter) -> Result<Self, Error> {
        let current = next_significant(&mut lexer)?;
        let snapshot = Snapshot {
            line: lexer.line(),
            column: lexer.column(),
            last_line_end: lexer.last_line_end(),
        };
        let peek = next_significant(&mut lexer)?;

        let mut parser = Parser {
            lexer,
            emitter,
            current,
            peek,
            snapshot,
            symbols: HashMap::new(),
            labels_declared: HashSet::new(),
            labels_gotoed: HashSet::new(),
            stmt_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        Ok(parser)
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn check_token(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn check_peek(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Shifts the window by one token.
    pub fn advance(&mut self) -> Result<(), Error> {
        self.snapshot = Snapshot {
            line: self.lexer.line(),
            column: self.lexer.column(),
            last_line_end: self.lexer.last_line_end(),
        };
        let next = next_significant(&mut self.lexer)?;
        self.current = std::mem::replace(&mut self.peek, next);

        Ok(())
    }

    /// Requires the current token to be of `expected_kind` and consumes it.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if !self.check_token(expected_kind) {
            return Err(self.error(ErrorImpl::UnexpectedToken {
                expected: expected_kind.name(),
                received: self.current.kind.name(),
            }));
        }

        let token = self.current.clone();
        self.advance()?;

        Ok(token)
    }

    /// `nl ::= '\n'+`
    pub fn nl(&mut self) -> Result<(), Error> {
        trace!("NL");

        self.expect(TokenKind::Newline)?;
        while self.check_token(TokenKind::Newline) {
            self.advance()?;
        }

        Ok(())
    }

    /// Builds an error located at the current token.
    ///
    /// The column is the lexer column captured after the token, minus the
    /// token text length, minus one. A negative result (only a newline token
    /// can produce one) moves the location to the end of the previous line.
    pub fn error(&self, error_impl: ErrorImpl) -> Error {
        let mut line = self.snapshot.line;
        let mut column = self.snapshot.column as i64 - self.current.len() as i64 - 1;

        if column < 0 {
            line = line.saturating_sub(1).max(1);
            column = self.snapshot.last_line_end as i64;
        }

        Error::new(
            error_impl,
            Position::new(line, column as u32, self.lexer.file()),
        )
    }

    pub fn get_symbol(&self, name: &str) -> Option<VarType> {
        self.symbols.get(name).copied()
    }

    /// Records the type of a variable on its first assignment.
    pub fn declare(&mut self, name: &str, var_type: VarType) {
        self.symbols.insert(name.to_string(), var_type);
    }

    /// Variables assigned so far and their inferred types.
    pub fn symbols(&self) -> &HashMap<String, VarType> {
        &self.symbols
    }

    pub fn emit(&mut self, code: &str) {
        self.emitter.emit(code);
    }

    pub fn emit_line(&mut self, code: &str) {
        self.emitter.emit_line(code);
    }

    pub fn header_line(&mut self, code: &str) {
        self.emitter.header_line(code);
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers the handler for statements starting with `kind`.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// `program ::= {statement}`
    ///
    /// Includes and declarations go to the header. `main` opens the body,
    /// so the output reads includes, declarations, `main`, statements.
    pub fn program(&mut self) -> Result<(), Error> {
        trace!("PROGRAM");

        self.header_line("#include <stdio.h>");
        self.header_line("#include <string.h>");
        self.emit_line("int main(void) {");

        while self.check_token(TokenKind::Newline) {
            self.advance()?;
        }

        while !self.check_token(TokenKind::EOF) {
            parse_stmt(self)?;
        }

        self.emit_line("return 0;");
        self.emit_line("}");

        trace!("PROGRAM-END");
        Ok(())
    }
}

/// Next token that is not a `;` separator.
fn next_significant(lexer: &mut Lexer) -> Result<Token, Error> {
    loop {
        let token = lexer.next_token()?;
        if token.kind != TokenKind::Ignore {
            return Ok(token);
        }
    }
}

/// Translates one compilation unit into `emitter`.
///
/// Nothing is emitted after the first error, which is returned as is.
pub fn parse(lexer: Lexer, emitter: &mut Emitter) -> Result<(), Error> {
    let mut parser = Parser::new(lexer, emitter)?;
    parser.program()
}
