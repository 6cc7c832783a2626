//! Unit tests for the parser module.
//!
//! This module contains tests for parsing and code generation of:
//! - print statements
//! - var declarations and reassignments
//! - Conditionals and loops
//! - Expressions and comparisons
//! - Error kinds and their reported locations

use crate::{
    emitter::emitter::Emitter,
    errors::errors::{Error, ErrorCategory, ErrorImpl},
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::parser::{parse, Parser, VarType};

fn lexer(source: &str) -> Lexer {
    Lexer::new(source.to_string(), Some("test.fc".to_string()))
}

fn translate(source: &str) -> Result<Emitter, Error> {
    let mut emitter = Emitter::in_memory();
    parse(lexer(source), &mut emitter)?;
    Ok(emitter)
}

fn body(source: &str) -> String {
    translate(source).unwrap().body().to_string()
}

fn failure(source: &str) -> Error {
    match translate(source) {
        Ok(emitter) => panic!("expected an error, got:\n{}", emitter.output()),
        Err(error) => error,
    }
}

fn assert_located(error: &Error, line: u32, column: u32) {
    assert_eq!(
        (error.get_position().line, error.get_position().column),
        (line, column),
        "{}",
        error
    );
}

#[test]
fn test_parse_empty_program() {
    let emitter = translate("").unwrap();

    assert_eq!(emitter.header(), "#include <stdio.h>\n#include <string.h>\n");
    assert_eq!(emitter.body(), "int main(void) {\nreturn 0;\n}\n");
}

#[test]
fn test_parse_print_string() {
    assert_eq!(
        body("PRINT \"hi\""),
        "int main(void) {\nprintf(\"hi\\n\");\nreturn 0;\n}\n"
    );
}

#[test]
fn test_parse_print_expression() {
    assert!(body("print 1.5 * 2").contains("printf(\"%.2f\\n\", (float)(1.5 * 2));\n"));
}

#[test]
fn test_parse_print_numeric_variable() {
    let output = body("var x = 1\nprint x + 1");

    assert!(output.contains("printf(\"%.2f\\n\", (float)(x + 1));\n"));
}

#[test]
fn test_parse_print_string_variable_prints_its_name() {
    let output = body("var s = \"ok\"\nprint s");

    assert!(output.contains("printf(\"s\\n\");\n"));
    assert!(!output.contains("%s"));
}

#[test]
fn test_parse_numeric_declaration() {
    let emitter = translate("VAR x = 3 + 4 * 2").unwrap();

    assert!(emitter.header().ends_with("float x;\n"));
    assert!(emitter.body().contains("x = 3 + 4 * 2;\n"));
}

#[test]
fn test_parse_string_declaration_is_hoisted() {
    let emitter = translate("print 1\nvar s = \"ok\"").unwrap();

    assert!(emitter.header().ends_with("char s[100] = \"ok\";\n"));
    assert!(!emitter.body().contains("ok"));
}

#[test]
fn test_declarations_follow_first_assignment_order() {
    let emitter = translate("var b = 1\nvar a = \"x\"\nvar c = 2\nvar b = 3").unwrap();

    assert_eq!(
        emitter.header(),
        "#include <stdio.h>\n#include <string.h>\nfloat b;\nchar a[100] = \"x\";\nfloat c;\n"
    );
}

#[test]
fn test_string_reassignment_copies() {
    let output = body("VAR s = \"ok\"\ns = \"no\"");

    assert!(output.contains("strcpy(s, \"no\");\n"));
    assert!(!output.contains("s = "));
}

#[test]
fn test_numeric_reassignment_assigns() {
    let output = body("var x = 1\nx = x * 2");

    assert!(output.contains("x = 1;\nx = x * 2;\n"));
}

#[test]
fn test_var_redeclaration_keeps_first_type() {
    let emitter = translate("var s = \"a\"\nvar s = \"b\"\nvar x = 1\nvar x = 2").unwrap();

    assert_eq!(emitter.header().matches("char s[100]").count(), 1);
    assert_eq!(emitter.header().matches("float x;").count(), 1);
    assert!(emitter.body().contains("strcpy(s, \"b\");\n"));
    assert!(emitter.body().contains("x = 2;\n"));
}

#[test]
fn test_number_assigned_to_string_variable_is_copied() {
    let output = body("var s = \"a\"\ns = 5");

    assert!(output.contains("strcpy(s, \"5\");\n"));
}

#[test]
fn test_variable_assigned_to_string_variable_copies_its_name() {
    let emitter = translate("var s = \"a\"\nvar t = \"b\"\ns = t").unwrap();

    assert!(emitter.body().contains("strcpy(s, \"t\");\n"));
    assert!(!emitter.body().contains("s = t"));
}

#[test]
fn test_string_value_on_numeric_redeclaration_is_ignored() {
    let emitter = translate("var x = 1\nvar x = \"s\"").unwrap();

    assert_eq!(emitter.body(), "int main(void) {\nx = 1;\nreturn 0;\n}\n");
    assert!(!emitter.header().contains("char"));
}

#[test]
fn test_string_reassigned_to_numeric_variable() {
    let error = failure("var x = 1\nx = \"t\"\nprint x");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedExpressionToken {
            token: "t".to_string()
        }
    );
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_symbol_types() {
    let mut emitter = Emitter::in_memory();
    let mut parser = Parser::new(lexer("var s = \"a\"\nvar n = 2\ns = 3"), &mut emitter).unwrap();
    parser.program().unwrap();

    assert_eq!(parser.symbols().len(), 2);
    assert_eq!(parser.get_symbol("s"), Some(VarType::String));
    assert_eq!(parser.get_symbol("n"), Some(VarType::Numeric));
    assert_eq!(parser.get_symbol("missing"), None);
}

#[test]
fn test_self_reference_on_first_assignment() {
    assert!(body("var x = x + 1").contains("x = x + 1;\n"));
}

#[test]
fn test_parse_unary() {
    let output = body("var x = -1\nvar y = 1 - -x\nvar z = +2");

    assert!(output.contains("x = -1;\n"));
    assert!(output.contains("y = 1 - -x;\n"));
    assert!(output.contains("z = +2;\n"));
}

#[test]
fn test_parse_if_elseif_else() {
    let source = "var x = 1\nif x > 1\nprint \"big\"\nelseif x == 1\nprint \"one\"\nelse\nprint \"small\"\nend";

    assert_eq!(
        body(source),
        "int main(void) {\n\
         x = 1;\n\
         if (x > 1) {\n\
         printf(\"big\\n\");\n\
         } else if (x == 1) {\n\
         printf(\"one\\n\");\n\
         } else {\n\
         printf(\"small\\n\");\n\
         }\n\
         return 0;\n\
         }\n"
    );
}

#[test]
fn test_parse_empty_branches() {
    assert!(body("if 1 == 1\nelse\nend").contains("if (1 == 1) {\n} else {\n}\n"));
}

#[test]
fn test_parse_while_loop() {
    let output = body("var i = 0\nwhile i < 3\ni = i + 1\nend");

    assert!(output.contains("while (i < 3) {\ni = i + 1;\n}\n"));
}

#[test]
fn test_parse_nested_blocks() {
    let source = "var i = 0\nwhile i <= 10\nif i != 5\nprint i\nend\ni = i + 1\nend";

    assert!(body(source).contains(
        "while (i <= 10) {\nif (i != 5) {\nprintf(\"%.2f\\n\", (float)(i));\n}\ni = i + 1;\n}\n"
    ));
}

#[test]
fn test_chained_comparison_has_no_connective() {
    // Whether `x == y == z` should mean `x == y && y == z` is undecided;
    // the operators are emitted back to back for now.
    let output = body("var x = 1\nvar y = 1\nvar z = 1\nif x == y == z\nend");

    assert!(output.contains("if (x == y == z) {\n"));
    assert!(!output.contains("&&"));
    assert!(!output.contains("||"));
}

#[test]
fn test_blank_lines_comments_and_semicolons() {
    let output = body("\n\n# header comment\nprint 1;\n\n\nprint 2 # trailing\n;print 3");

    assert!(output.contains("(float)(1)"));
    assert!(output.contains("(float)(2)"));
    assert!(output.contains("(float)(3)"));
}

#[test]
fn test_statement_lookup() {
    let mut emitter = Emitter::in_memory();
    let parser = Parser::new(lexer("print 1"), &mut emitter).unwrap();

    for kind in [
        TokenKind::Print,
        TokenKind::If,
        TokenKind::While,
        TokenKind::Var,
        TokenKind::Variable,
    ] {
        assert!(parser.get_stmt_lookup().contains_key(&kind));
    }
    assert!(!parser.get_stmt_lookup().contains_key(&TokenKind::Input));
}

#[test]
fn test_two_token_window() {
    let mut emitter = Emitter::in_memory();
    let mut parser = Parser::new(lexer("print 1"), &mut emitter).unwrap();

    assert!(parser.check_token(TokenKind::Print));
    assert!(parser.check_peek(TokenKind::Integer));

    parser.advance().unwrap();
    assert_eq!(parser.current_token().value, "1");
    assert!(parser.check_peek(TokenKind::Newline));
}

#[test]
fn test_undeclared_variable_in_print() {
    let error = failure("print y");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::VariableNotDeclared {
            variable: "y".to_string()
        }
    );
    assert_located(&error, 1, 6);
}

#[test]
fn test_undeclared_variable_everywhere() {
    for source in [
        "y = 2",
        "var x = y + 1",
        "var x = 1\nx = 2 * y",
        "if y > 1\nend",
        "var x = 1\nwhile x < q\nend",
        "print 1 + z",
        "x = 1\nvar x = 2",
    ] {
        let error = failure(source);
        assert_eq!(error.get_error_name(), "VariableNotDeclared", "{}", source);
    }
}

#[test]
fn test_undeclared_assignment_location() {
    assert_located(&failure("print 1\n  total = 2"), 2, 2);
}

#[test]
fn test_invalid_statement() {
    let error = failure("end");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::InvalidStatement {
            token: "end".to_string(),
            kind: "END".to_string()
        }
    );
    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert_located(&error, 1, 0);
}

#[test]
fn test_unsupported_keywords_are_invalid_statements() {
    for source in ["input x", "repeat", "for", "else", "elseif x > 1"] {
        assert_eq!(failure(source).get_error_name(), "InvalidStatement", "{}", source);
    }
}

#[test]
fn test_unterminated_block() {
    let error = failure("while 1 < 2\nprint 1");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::InvalidStatement {
            token: String::new(),
            kind: "EOF".to_string()
        }
    );
}

#[test]
fn test_missing_newline_after_statement() {
    let error = failure("print 1 2");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: "NEWLINE".to_string(),
            received: "INTEGER".to_string()
        }
    );
    assert_located(&error, 1, 8);
}

#[test]
fn test_missing_comparison_after_if() {
    let error = failure("if\nend");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::MissingComparison {
            keyword: "if".to_string()
        }
    );
    // The newline token rolls the location back to the end of line 1.
    assert_located(&error, 1, 2);
}

#[test]
fn test_missing_comparison_after_elseif() {
    let error = failure("var x = 1\nif x > 0\nelseif\nend");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::MissingComparison {
            keyword: "elseif".to_string()
        }
    );
    assert_located(&error, 3, 6);
}

#[test]
fn test_while_without_condition() {
    let error = failure("while\nend");

    assert_eq!(error.get_error_name(), "UnexpectedExpressionToken");
    assert_ne!(error.get_error_name(), "MissingComparison");
    assert_located(&error, 1, 5);
}

#[test]
fn test_condition_without_operator() {
    let error = failure("var x = 1\nif x\nend");

    assert_eq!(error.get_error_name(), "ExpectedComparisonOperator");
    assert_ne!(error.get_error_name(), "MissingComparison");
    assert_located(&error, 2, 4);
}

#[test]
fn test_expected_token_on_next_line() {
    let error = failure("print 1\nvar\nprint 2");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: "VARIABLE".to_string(),
            received: "NEWLINE".to_string()
        }
    );
    assert_located(&error, 2, 3);
}

#[test]
fn test_missing_value() {
    let error = failure("var x =\n");

    assert_eq!(error.get_error_name(), "UnexpectedExpressionToken");
    assert_located(&error, 1, 7);
}

#[test]
fn test_operator_without_operand() {
    let error = failure("var x = * 2");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedExpressionToken {
            token: "*".to_string()
        }
    );
    assert_located(&error, 1, 8);
}

#[test]
fn test_no_parentheses() {
    let error = failure("var x = (1 + 2)");

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.category(), ErrorCategory::Lexical);
}

#[test]
fn test_lexical_error_surfaces_through_parser() {
    let error = failure("print 1\nprint \"50%\"");

    assert_eq!(error.category(), ErrorCategory::Lexical);
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_nothing_emitted_after_first_error() {
    let mut emitter = Emitter::in_memory();
    let result = parse(lexer("print 1\nend\nprint 2"), &mut emitter);

    assert!(result.is_err());
    assert!(emitter.body().contains("(float)(1)"));
    assert!(!emitter.body().contains("(float)(2)"));
    assert!(!emitter.body().contains("return 0;"));
}
