#![allow(dead_code)]

use tblc_core::{Field, ParseError, ParseErrorKind, Table, parse_source};

/// Parses a source holding exactly one table definition.
pub fn parse(source: &str) -> Table {
    let mut tables = parse_source(source)
        .unwrap_or_else(|e| panic!("Failed to parse: {source}\nError: {e}"));
    assert_eq!(tables.len(), 1, "Expected exactly one table in: {source}");
    tables.remove(0)
}

pub fn parse_err(source: &str) -> ParseError {
    parse_source(source).expect_err(&format!("Expected parse error for: {source}"))
}

pub fn parse_err_kind(source: &str) -> ParseErrorKind {
    parse_err(source).kind
}

pub fn field<'a>(table: &'a Table, name: &str) -> &'a Field {
    table
        .field(name)
        .unwrap_or_else(|| panic!("Table '{}' has no field '{name}'", table.name))
}

/// Wraps field and constraint declarations into a table named `t`.
pub fn table_with(body: &str) -> String {
    format!("table t {{ {body} }}")
}
