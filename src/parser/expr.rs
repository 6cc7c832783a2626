use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// `comparison ::= expression (("==" | "!=" | ">" | ">=" | "<" | "<=") expression)+`
///
/// Chained operators are emitted one after the other, so `a == b == c`
/// becomes `a == b == c` in C and follows C precedence.
pub fn parse_comparison(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("COMPARISON");
    parse_expr(parser)?;

    if !parser.current_token_kind().is_comparison_operator() {
        return Err(parser.error(ErrorImpl::ExpectedComparisonOperator {
            token: parser.current_token().value.clone(),
        }));
    }

    while parser.current_token_kind().is_comparison_operator() {
        emit_operator(parser)?;
        parse_expr(parser)?;
    }

    Ok(())
}

/// `expression ::= term {("-" | "+") term}`
pub fn parse_expr(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("EXPRESSION");
    parse_term(parser)?;

    while parser.check_token(TokenKind::Plus) || parser.check_token(TokenKind::Minus) {
        emit_operator(parser)?;
        parse_term(parser)?;
    }

    Ok(())
}

/// `term ::= unary {("/" | "*") unary}`
pub fn parse_term(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("TERM");
    parse_unary(parser)?;

    while parser.check_token(TokenKind::Asterisk) || parser.check_token(TokenKind::Slash) {
        emit_operator(parser)?;
        parse_unary(parser)?;
    }

    Ok(())
}

/// `unary ::= ["+" | "-"] primary`
pub fn parse_unary(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("UNARY");

    if parser.check_token(TokenKind::Plus) || parser.check_token(TokenKind::Minus) {
        let sign = parser.current_token().value.clone();
        parser.emit(&sign);
        parser.advance()?;
    }

    parse_primary(parser)
}

/// `primary ::= integer | decimal | ident`
pub fn parse_primary(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("PRIMARY");
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Integer | TokenKind::Decimal => {}
        TokenKind::Variable => {
            if parser.get_symbol(&token.value).is_none() {
                return Err(parser.error(ErrorImpl::VariableNotDeclared {
                    variable: token.value,
                }));
            }
        }
        _ => {
            return Err(parser.error(ErrorImpl::UnexpectedExpressionToken {
                token: token.value,
            }))
        }
    }

    parser.emit(&token.value);
    parser.advance()
}

/// Binary operators are spaced so `1 - -2` cannot read as `--`.
fn emit_operator(parser: &mut Parser<'_>) -> Result<(), Error> {
    let operator = parser.current_token().value.clone();
    parser.emit(&format!(" {} ", operator));
    parser.advance()
}
