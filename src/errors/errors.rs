use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::ExpectedNotEquals { .. }
            | ErrorImpl::InvalidStringCharacter { .. }
            | ErrorImpl::MalformedDecimal { .. } => ErrorCategory::Lexical,
            _ => ErrorCategory::Syntax,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::ExpectedNotEquals { .. } => "ExpectedNotEquals",
            ErrorImpl::InvalidStringCharacter { .. } => "InvalidStringCharacter",
            ErrorImpl::MalformedDecimal { .. } => "MalformedDecimal",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::InvalidStatement { .. } => "InvalidStatement",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::MissingComparison { .. } => "MissingComparison",
            ErrorImpl::ExpectedComparisonOperator { .. } => "ExpectedComparisonOperator",
            ErrorImpl::UnexpectedExpressionToken { .. } => "UnexpectedExpressionToken",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::ExpectedNotEquals { .. } => ErrorTip::Suggestion(String::from(
                "there is no `!` operator, did you mean `!=`?",
            )),
            ErrorImpl::InvalidStringCharacter { character } => ErrorTip::Suggestion(format!(
                "`{}` cannot appear inside a string literal",
                character
            )),
            ErrorImpl::MalformedDecimal { token } => ErrorTip::Suggestion(format!(
                "add a digit after the `.` in `{}`",
                token
            )),
            ErrorImpl::UnexpectedToken { expected, received } => {
                if expected == "NEWLINE" {
                    ErrorTip::Suggestion(format!(
                        "Expected a line break, got {}, statements end at the end of the line",
                        received
                    ))
                } else {
                    ErrorTip::Suggestion(format!("Expected {}, got {}", expected, received))
                }
            }
            ErrorImpl::InvalidStatement { token, kind } => ErrorTip::Suggestion(format!(
                "`{}` ({}) cannot start a statement",
                token, kind
            )),
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` not declared, assign it with `var {} = ...` first",
                variable, variable
            )),
            ErrorImpl::MissingComparison { keyword } => {
                ErrorTip::Suggestion(format!("Expected comparison after '{}'", keyword))
            }
            ErrorImpl::ExpectedComparisonOperator { .. } => ErrorTip::Suggestion(String::from(
                "conditions need one of `==`, `!=`, `<`, `<=`, `>` or `>=`",
            )),
            ErrorImpl::UnexpectedExpressionToken { .. } => ErrorTip::Suggestion(String::from(
                "expected a number or a variable",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}:{} {}",
            self.position.line, self.position.column, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("Unknown Token: {token}")]
    UnrecognisedToken { token: String },
    #[error("Expected !=, got !{found}")]
    ExpectedNotEquals { found: String },
    #[error("{character} not allowed in strings in this language")]
    InvalidStringCharacter { character: String },
    #[error("Number cannot end with '.': {token}")]
    MalformedDecimal { token: String },
    #[error("Expected {expected}, got {received}")]
    UnexpectedToken { expected: String, received: String },
    #[error("Invalid statement at '{token}' ({kind})")]
    InvalidStatement { token: String, kind: String },
    #[error("Referencing variable before assignment: {variable}")]
    VariableNotDeclared { variable: String },
    #[error("Expected comparison after '{keyword}'.")]
    MissingComparison { keyword: String },
    #[error("Expected comparison operator, got '{token}'")]
    ExpectedComparisonOperator { token: String },
    #[error("Unexpected token at {token}")]
    UnexpectedExpressionToken { token: String },
}
