//! Property-based tests for the tlisp parser
//!
//! These tests use proptest to verify that:
//! 1. Rendering a parsed program and re-parsing it preserves its structure
//! 2. Parsing is deterministic
//! 3. Comments between forms do not change the parsed program
//! 4. The parser never panics on arbitrary input

use proptest::prelude::*;
use tlispc::parse;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_!?*+<>=-]{0,8}"
}

fn value() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        identifier(),
        (0..=i32::MAX).prop_map(|n| n.to_string()),
        "[a-zA-Z0-9 _!.]{0,12}".prop_map(|s| format!("\"{}\"", s)),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (identifier(), prop::collection::vec(inner, 0..4)).prop_map(|(name, args)| {
            let mut call = format!("({}", name);
            for arg in args {
                call.push(' ');
                call.push_str(&arg);
            }
            call.push(')');
            call
        })
    })
}

fn def_or_main() -> impl Strategy<Value = String> {
    prop_oneof![
        value().prop_map(|body| format!("(main () {})", body)),
        (identifier(), prop::collection::vec(identifier(), 0..4), value()).prop_map(
            |(name, args, body)| format!("(defun {} ({}) {})", name, args.join(" "), body)
        ),
        (identifier(), value()).prop_map(|(name, v)| format!("(defvar {} {})", name, v)),
    ]
}

/// Valid programs with irregular whitespace between forms
fn program() -> impl Strategy<Value = String> {
    prop::collection::vec((def_or_main(), "[ \t\n]{1,3}"), 0..6).prop_map(|forms| {
        forms
            .into_iter()
            .map(|(form, gap)| format!("{}{}", form, gap))
            .collect()
    })
}

/// Line and block comments, including `*` runs inside block comments
fn comment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z *()\"/]{0,20}".prop_map(|body| format!("//{}\n", body)),
        "[a-z *()\"\n]{0,20}".prop_map(|body| format!("/*{}*/", body)),
        Just("/**/".to_string()),
        Just("/** doc */".to_string()),
        Just("/* x **/".to_string()),
    ]
}

/// Forms rendered twice: once bare, once with comments before each form
fn program_with_comments() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec((def_or_main(), comment()), 0..6).prop_map(|forms| {
        let mut plain = String::new();
        let mut commented = String::new();
        for (form, comment) in forms {
            plain.push_str(&form);
            plain.push('\n');
            commented.push_str(&comment);
            commented.push_str(&form);
            commented.push('\n');
        }
        (plain, commented)
    })
}

proptest! {
    #[test]
    fn valid_programs_round_trip(source in program()) {
        let parsed = parse(&source).expect("generated program should parse");
        let rendered = parsed.to_string();
        let reparsed = parse(&rendered).expect("rendered program should parse");
        prop_assert_eq!(reparsed.forms.len(), parsed.forms.len());
        prop_assert_eq!(reparsed.to_string(), rendered);
    }

    #[test]
    fn parsing_is_deterministic(source in program()) {
        prop_assert_eq!(parse(&source), parse(&source));
    }

    #[test]
    fn comments_are_skipped((plain, commented) in program_with_comments()) {
        let expected = parse(&plain).expect("generated program should parse");
        let parsed = parse(&commented).expect("commented program should parse");
        prop_assert_eq!(parsed.to_string(), expected.to_string());
    }

    #[test]
    fn parser_never_panics(source in r#"[()" a-z0-9/*\n]{0,200}"#) {
        let _ = parse(&source);
    }
}
