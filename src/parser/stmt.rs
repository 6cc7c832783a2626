use log::{debug, trace, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_comparison, parse_expr},
    parser::{Parser, VarType},
};

/// Size of the `char` buffer declared for string variables.
pub const STRING_BUFFER_SIZE: usize = 100;
/// Decimal places used when printing numbers.
pub const NUMERIC_PRECISION: usize = 2;

/// `statement ::= (print | if | while | var | assignment) nl`
pub fn parse_stmt(parser: &mut Parser<'_>) -> Result<(), Error> {
    let kind = parser.current_token_kind();

    let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() else {
        return Err(parser.error(ErrorImpl::InvalidStatement {
            token: parser.current_token().value.clone(),
            kind: kind.name(),
        }));
    };

    handler(parser)?;
    parser.nl()
}

/// `print (string | expression)`
pub fn parse_print_stmt(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("PRINT");
    parser.advance()?;

    let token = parser.current_token().clone();

    if token.is(TokenKind::String) {
        trace!("PRINT-STRING");
        parser.emit_line(&format!("printf(\"{}\\n\");", token.value));
        parser.advance()?;
    } else if token.is(TokenKind::Variable)
        && parser.get_symbol(&token.value) == Some(VarType::String)
    {
        // Prints the variable's name, not its contents.
        trace!("PRINT-VARIABLE");
        parser.emit_line(&format!("printf(\"{}\\n\");", token.value));
        parser.advance()?;
    } else {
        trace!("PRINT-NUMBER");
        parser.emit(&format!("printf(\"%.{}f\\n\", (float)(", NUMERIC_PRECISION));
        parse_expr(parser)?;
        parser.emit_line("));");
    }

    Ok(())
}

/// `if comparison nl {statement | elseif comparison nl | else nl} end`
pub fn parse_if_stmt(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("IF");
    parser.advance()?;

    parser.emit("if (");
    parse_condition(parser, "if")?;
    parser.nl()?;
    parser.emit_line(") {");

    while !parser.check_token(TokenKind::End) {
        match parser.current_token_kind() {
            TokenKind::ElseIf => {
                trace!("ELSEIF");
                parser.advance()?;
                parser.emit("} else if (");
                parse_condition(parser, "elseif")?;
                parser.nl()?;
                parser.emit_line(") {");
            }
            TokenKind::Else => {
                trace!("ELSE");
                parser.advance()?;
                parser.emit_line("} else {");
                parser.nl()?;
            }
            _ => parse_stmt(parser)?,
        }
    }

    trace!("IF-END");
    parser.expect(TokenKind::End)?;
    parser.emit_line("}");

    Ok(())
}

/// `while comparison nl {statement} end`
pub fn parse_while_stmt(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("WHILE");
    parser.advance()?;

    parser.emit("while (");
    parse_comparison(parser)?;
    parser.nl()?;
    parser.emit_line(") {");

    while !parser.check_token(TokenKind::End) {
        parse_stmt(parser)?;
    }

    trace!("WHILE-END");
    parser.expect(TokenKind::End)?;
    parser.emit_line("}");

    Ok(())
}

/// A comparison directly after `if` or `elseif`; a bare newline there is an error.
fn parse_condition(parser: &mut Parser<'_>, keyword: &str) -> Result<(), Error> {
    if parser.check_token(TokenKind::Newline) {
        return Err(parser.error(ErrorImpl::MissingComparison {
            keyword: keyword.to_string(),
        }));
    }

    parse_comparison(parser)
}

/// `var ident = (string | expression)`
///
/// The first assignment of a name fixes its type and hoists its
/// declaration into the header. Later ones assign according to that type.
pub fn parse_var_decl_stmt(parser: &mut Parser<'_>) -> Result<(), Error> {
    trace!("VAR");
    parser.advance()?;

    let name = parser.expect(TokenKind::Variable)?.value;
    parser.expect(TokenKind::Eq)?;

    match parser.get_symbol(&name) {
        Some(VarType::Numeric) if parser.check_token(TokenKind::String) => {
            warn!("string assigned to numeric variable `{}` is ignored", name);
            return parser.advance();
        }
        Some(var_type) => return assign(parser, &name, var_type),
        None => {}
    }

    if parser.check_token(TokenKind::String) {
        let text = parser.current_token().value.clone();
        parser.declare(&name, VarType::String);
        debug!("`{}` inferred as string", name);

        parser.header_line(&format!(
            "char {}[{}] = \"{}\";",
            name, STRING_BUFFER_SIZE, text
        ));
        parser.advance()?;
    } else {
        // Declared before the value is parsed, so `var x = x + 1` is accepted.
        parser.declare(&name, VarType::Numeric);
        debug!("`{}` inferred as numeric", name);

        parser.header_line(&format!("float {};", name));
        parser.emit(&format!("{} = ", name));
        parse_expr(parser)?;
        parser.emit_line(";");
    }

    Ok(())
}

/// `ident = value` for a variable that was already assigned.
pub fn parse_assignment_stmt(parser: &mut Parser<'_>) -> Result<(), Error> {
    let name = parser.current_token().value.clone();

    let Some(var_type) = parser.get_symbol(&name) else {
        return Err(parser.error(ErrorImpl::VariableNotDeclared { variable: name }));
    };
    trace!("VARIABLE {:?}", var_type);

    parser.advance()?;
    parser.expect(TokenKind::Eq)?;

    assign(parser, &name, var_type)
}

/// Assignment to a known variable, current token on the value.
fn assign(parser: &mut Parser<'_>, name: &str, var_type: VarType) -> Result<(), Error> {
    match var_type {
        VarType::String => {
            // The token text is copied as is, so `s = t` copies "t".
            let token = parser.current_token().clone();
            if !token.is_one_of_many(&[
                TokenKind::String,
                TokenKind::Integer,
                TokenKind::Decimal,
                TokenKind::Variable,
            ]) {
                return Err(parser.error(ErrorImpl::UnexpectedToken {
                    expected: TokenKind::String.name(),
                    received: token.kind.name(),
                }));
            }

            parser.emit_line(&format!("strcpy({}, \"{}\");", name, token.value));
            parser.advance()?;
        }
        VarType::Numeric => {
            parser.emit(&format!("{} = ", name));
            parse_expr(parser)?;
            parser.emit_line(";");
        }
    }

    Ok(())
}
