use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    /// Keyword vocabulary, keyed by lowercase text.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("print", TokenKind::Print);
        map.insert("input", TokenKind::Input);
        map.insert("var", TokenKind::Var);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("elseif", TokenKind::ElseIf);
        map.insert("end", TokenKind::End);
        map.insert("while", TokenKind::While);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("for", TokenKind::For);
        map
    };
}

/// Coarse grouping of token kinds.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenBand {
    Meta,
    Literal,
    Keyword,
    Operator,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Ignore,
    Unknown,
    EOF,

    Newline,
    Integer,
    Decimal,
    Variable,
    String,

    // Reserved
    Print,
    Input,
    Var,
    If,
    Else,
    ElseIf,
    End,
    While,
    Repeat,
    For,

    Eq,       // =
    Plus,     // +
    Minus,    // -
    Asterisk, // *
    Slash,    // /
    EqEq,     // ==
    NotEq,    // !=
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=
}

impl TokenKind {
    pub fn band(&self) -> TokenBand {
        use TokenKind::*;

        match self {
            Ignore | Unknown | EOF => TokenBand::Meta,
            Newline | Integer | Decimal | Variable | String => TokenBand::Literal,
            Print | Input | Var | If | Else | ElseIf | End | While | Repeat | For => {
                TokenBand::Keyword
            }
            Eq | Plus | Minus | Asterisk | Slash | EqEq | NotEq | Lt | LtEq | Gt | GtEq => {
                TokenBand::Operator
            }
        }
    }

    pub fn is_comparison_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
        )
    }

    /// Upper-case name used in diagnostics, e.g. `NEWLINE` or `EQEQ`.
    pub fn name(&self) -> String {
        format!("{:?}", self).to_uppercase()
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Looks up `text` in the keyword table, ignoring case.
///
/// Only whole words match: `printer` is not a keyword.
pub fn check_if_keyword(text: &str) -> Option<TokenKind> {
    RESERVED_LOOKUP.get(text.to_lowercase().as_str()).copied()
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// Line and column of the first character of the token.
    pub start: Position,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Length of the token text in characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
