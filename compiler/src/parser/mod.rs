//! Parser for tlisp source code
//!
//! Uses logos for lexing and a hand-written recursive descent over the
//! token stream.
use crate::ast::*;
use crate::error::ParseError;
use tracing::debug;

pub mod grammar;
pub mod lexer;

/// Parse a tlisp source file into an AST
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let program = grammar::Parser::new(source).parse_program()?;
    debug!(forms = program.forms.len(), bytes = source.len(), "parsed program");
    Ok(program)
}

/// Parse a single value, e.g. `(eat 1 2 3)`
pub fn parse_value(source: &str) -> Result<Value, ParseError> {
    grammar::Parser::new(source).parse_standalone_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty() {
        let result = parse("");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_main_fn_call() {
        let program = parse("(main () (eat 1 2 3))").expect("should parse");
        let body = &program.main().expect("Expected main").body;
        let call = body.as_fn_call().expect("Expected function call");
        assert_eq!(call.name, "eat");
        let args: Vec<_> = call.args.iter().filter_map(Value::as_int).collect();
        assert_eq!(args, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_close_is_end_of_input() {
        let err = parse("(main ()").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { offset: 8, .. }));
    }

    #[test]
    fn test_unknown_top_level_form() {
        let err = parse("(foo () 1)").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedTopLevelForm {
                found: "identifier `foo`".to_string(),
                span: Span::new(1, 4),
            }
        );
    }

    #[test]
    fn test_top_level_form_needs_keyword() {
        let err = parse("(1 2)").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedTopLevelForm { .. }));
    }

    #[test]
    fn test_lex_error_aborts_parse() {
        let err = parse("(defvar x 1)\n(main () 4294967296)").unwrap_err();
        assert_eq!(
            err,
            ParseError::Lex {
                error: LexError::IntegerOverflow,
                span: Span::new(22, 32),
            }
        );
    }

    #[test]
    fn test_unterminated_string_in_body() {
        let err = parse(r#"(main () "abc)"#).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Lex {
                error: LexError::UnterminatedString,
                ..
            }
        ));
        assert_eq!(err.offset(), 9);
    }

    #[test]
    fn test_parse_twice_is_identical() {
        let source = "(defun f (x) (g x 2 \"s\"))\n(main () (f 1))";
        assert_eq!(parse(source), parse(source));
    }

    #[test]
    fn test_parse_value_entry_point() {
        let value = parse_value("(eat 1 2 3)").expect("should parse");
        assert_eq!(value.to_string(), "(eat 1 2 3)");
    }
}
