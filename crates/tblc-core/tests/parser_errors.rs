//! Tests for parser error cases.

mod common;
use common::*;

use tblc_core::{LexError, ParseErrorKind, parse_source};

#[test]
fn test_empty_input_is_not_an_error() {
    assert!(parse_source("").unwrap().is_empty());
    assert!(parse_source("   \n\t").unwrap().is_empty());
}

#[test]
fn test_error_top_level_garbage() {
    let err = parse_err("field a { }");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownDirective {
            token: "field".into()
        }
    );
    assert_eq!(err.table, "");
}

#[test]
fn test_error_unterminated_string() {
    assert!(matches!(
        parse_err_kind(r#"table t { field a { default "open } }"#),
        ParseErrorKind::Lex(LexError::UnterminatedString { .. })
    ));
}

#[test]
fn test_error_unterminated_comment() {
    assert!(matches!(
        parse_err_kind("table t { /* field a { } }"),
        ParseErrorKind::Lex(LexError::UnterminatedComment { .. })
    ));
}

#[test]
fn test_error_display_includes_table_and_position() {
    let source = table_with("field a { type nope }");
    let err = parse_err(&source);
    let start = source.find("nope").unwrap();
    assert_eq!(
        err.to_string(),
        format!(
            "table 't': invalid field type for field 'a': 'nope' at position {}..{}",
            start,
            start + 4
        )
    );
}

#[test]
fn test_error_display_outside_table() {
    let err = parse_err("table");
    assert!(!err.to_string().starts_with("table '"), "{err}");
    assert!(err.to_string().contains("expected table name"));
}

#[test]
fn test_error_display_multi_field_constraint() {
    let err = parse_err(&table_with(
        "field a { } field b { } constraints { (a, b) index }",
    ));
    assert!(
        err.to_string()
            .contains("constraint 'index' is not supported on field group (a, b)"),
        "{err}"
    );
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&parse_err("table"));
}

#[test]
fn test_error_span_at_end_of_input() {
    let source = "table t { field a {";
    let err = parse_err(source);
    assert_eq!(err.span.start, source.len());
    assert!(err.span.is_empty());
}

#[test]
fn test_first_error_wins() {
    let err = parse_err(&table_with(
        "field new { } field a { type nope }",
    ));
    assert_eq!(err.kind, ParseErrorKind::ReservedKeyword { field: "new".into() });
}
