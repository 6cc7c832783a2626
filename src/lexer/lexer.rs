use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{check_if_keyword, Token, TokenKind};

/// Sentinel returned by the cursor once the source is exhausted.
pub const EOF_CHAR: char = '\0';

lazy_static! {
    static ref SYMBOL: Regex = Regex::new(r"^\p{Alphabetic}+").unwrap();
    static ref NUMBER: Regex = Regex::new(r"^[0-9]+(\.[0-9]*)?").unwrap();
}

/// Pull lexer over a single compilation unit.
///
/// Every call to [`Lexer::next_token`] starts with the cursor on the first
/// character that has not been classified yet and leaves it on the first
/// character after the token it returns.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    /// Byte offset of `cur_char` in `source`.
    pos: usize,
    cur_char: char,
    line: u32,
    /// 1-based column of `cur_char`.
    column: u32,
    /// 0-based offset of the newline that ended the previous line.
    last_line_end: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        // Statements are newline terminated, including the last one.
        let mut source = source;
        source.push('\n');

        let cur_char = source.chars().next().unwrap_or(EOF_CHAR);

        Lexer {
            source,
            pos: 0,
            cur_char,
            line: 1,
            column: 1,
            last_line_end: 0,
            file: file_name,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn last_line_end(&self) -> u32 {
        self.last_line_end
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn next_char(&mut self) {
        if !self.at_eof() {
            self.pos += self.cur_char.len_utf8();
            self.column += 1;
        }
        self.cur_char = self.remainder().chars().next().unwrap_or(EOF_CHAR);
    }

    fn peek(&self) -> char {
        self.remainder().chars().nth(1).unwrap_or(EOF_CHAR)
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn get_position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    fn error(&self, error_impl: ErrorImpl) -> Error {
        Error::new(
            error_impl,
            Position::new(self.line, self.column - 1, Rc::clone(&self.file)),
        )
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cur_char, ' ' | '\t' | '\r') {
            self.next_char();
        }
    }

    fn skip_comment(&mut self) {
        if self.cur_char == '#' {
            while self.cur_char != '\n' && !self.at_eof() {
                self.next_char();
            }
        }
    }

    /// Moves the cursor `n` characters forward.
    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.next_char();
        }
    }

    /// Classifies the next token.
    ///
    /// Once the end of the source is reached every further call returns
    /// another EOF token.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_whitespace();
        self.skip_comment();

        let start = self.get_position();

        let token = match self.cur_char {
            '+' => MK_TOKEN!(TokenKind::Plus, String::from("+"), start),
            '-' => MK_TOKEN!(TokenKind::Minus, String::from("-"), start),
            '*' => MK_TOKEN!(TokenKind::Asterisk, String::from("*"), start),
            '/' => MK_TOKEN!(TokenKind::Slash, String::from("/"), start),
            '=' => self.one_or_two(TokenKind::Eq, TokenKind::EqEq, start),
            '>' => self.one_or_two(TokenKind::Gt, TokenKind::GtEq, start),
            '<' => self.one_or_two(TokenKind::Lt, TokenKind::LtEq, start),
            '!' => {
                if self.peek() != '=' {
                    return Err(self.error(ErrorImpl::ExpectedNotEquals {
                        found: self.peek().escape_default().to_string(),
                    }));
                }
                self.next_char();
                MK_TOKEN!(TokenKind::NotEq, String::from("!="), start)
            }
            '"' => self.string_literal(start)?,
            '\n' => {
                let token = MK_TOKEN!(TokenKind::Newline, String::from("\\n"), start);
                self.last_line_end = self.column - 1;
                self.line += 1;
                self.column = 0;
                token
            }
            ';' => MK_TOKEN!(TokenKind::Ignore, String::from(";"), start),
            EOF_CHAR if self.at_eof() => MK_TOKEN!(TokenKind::EOF, String::new(), start),
            c if c.is_ascii_digit() => self.number(start)?,
            c if c.is_alphabetic() => self.symbol(start)?,
            c => {
                return Err(self.error(ErrorImpl::UnrecognisedToken {
                    token: c.to_string(),
                }))
            }
        };

        self.next_char();
        trace!("{} {:?}", token.kind, token.value);

        Ok(token)
    }

    /// `=`, `>` and `<` optionally followed by `=`.
    fn one_or_two(&mut self, single: TokenKind, double: TokenKind, start: Position) -> Token {
        if self.peek() == '=' {
            let first = self.cur_char;
            self.next_char();
            MK_TOKEN!(double, format!("{}=", first), start)
        } else {
            MK_TOKEN!(single, self.cur_char.to_string(), start)
        }
    }

    fn string_literal(&mut self, start: Position) -> Result<Token, Error> {
        self.next_char();
        let start_pos = self.pos;

        while self.cur_char != '"' && !self.at_eof() {
            let invalid = match self.cur_char {
                '\r' => Some("\\r"),
                '\n' => Some("\\n"),
                '\t' => Some("\\t"),
                '\\' => Some("\\"),
                '%' => Some("%"),
                _ => None,
            };

            if let Some(character) = invalid {
                return Err(self.error(ErrorImpl::InvalidStringCharacter {
                    character: String::from(character),
                }));
            }

            self.next_char();
        }

        let string_literal = self.source[start_pos..self.pos].to_string();
        Ok(MK_TOKEN!(TokenKind::String, string_literal, start))
    }

    fn number(&mut self, start: Position) -> Result<Token, Error> {
        let Some(matched) = NUMBER.find(self.remainder()) else {
            return Err(self.error(ErrorImpl::UnrecognisedToken {
                token: self.cur_char.to_string(),
            }));
        };
        let number = matched.as_str().to_string();

        // Leave the cursor on the last character of the literal.
        self.advance_n(number.len() - 1);

        if number.ends_with('.') {
            return Err(self.error(ErrorImpl::MalformedDecimal { token: number }));
        }

        if number.contains('.') {
            Ok(MK_TOKEN!(TokenKind::Decimal, number, start))
        } else {
            Ok(MK_TOKEN!(TokenKind::Integer, number, start))
        }
    }

    fn symbol(&mut self, start: Position) -> Result<Token, Error> {
        let Some(matched) = SYMBOL.find(self.remainder()) else {
            return Err(self.error(ErrorImpl::UnrecognisedToken {
                token: self.cur_char.to_string(),
            }));
        };
        let value = matched.as_str().to_string();

        self.advance_n(value.chars().count() - 1);

        let kind = check_if_keyword(&value).unwrap_or(TokenKind::Variable);
        Ok(MK_TOKEN!(kind, value, start))
    }
}

/// Lexes a whole unit up to and including its EOF token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
