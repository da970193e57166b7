//! Parsing of complete schema sources holding several table definitions.

use tracing::warn;

use super::Parser;
use crate::error::ParseError;
use crate::schema::Table;

/// Parses every table definition in `source`.
///
/// # Errors
///
/// Returns the first `ParseError`; tables parsed before it are discarded.
pub fn parse_source(source: &str) -> Result<Vec<Table>, ParseError> {
    let mut parser = Parser::from_source(source)?;
    let mut tables = Vec::new();
    while let Some(table) = parser.parse_next_table()? {
        tables.push(table);
    }
    Ok(tables)
}

/// Outcome of [`parse_source_lenient`].
#[derive(Debug, Default)]
pub struct SourceReport {
    /// Tables that parsed successfully, in source order.
    pub tables: Vec<Table>,
    /// One error per rejected table definition.
    pub errors: Vec<ParseError>,
}

impl SourceReport {
    /// Returns true if no definition was rejected.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses every table definition in `source`, skipping invalid ones.
///
/// After a failed definition parsing resumes at the next `table` keyword.
/// A source that cannot be tokenized yields no tables and a single error.
#[must_use]
pub fn parse_source_lenient(source: &str) -> SourceReport {
    let mut report = SourceReport::default();
    let mut parser = match Parser::from_source(source) {
        Ok(parser) => parser,
        Err(err) => {
            report.errors.push(err);
            return report;
        }
    };

    loop {
        match parser.parse_next_table() {
            Ok(Some(table)) => report.tables.push(table),
            Ok(None) => break,
            Err(err) => {
                let skipped = parser.skip_to_next_table();
                warn!(table = %err.table, skipped, "skipping to the next table definition");
                report.errors.push(err);
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    const TWO_TABLES: &str = r"
        table user {
            field id { type long }
        }
        table post {
            field id { type long }
            field title { type string length 64 }
        }
    ";

    #[test]
    fn test_parse_source_multiple_tables() {
        let tables = parse_source(TWO_TABLES).unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["user", "post"]);
    }

    #[test]
    fn test_parse_source_empty() {
        assert!(parse_source("  // nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_source_stops_at_first_error() {
        let err = parse_source("table a { field x { type nope } } table b { field y { } }")
            .unwrap_err();
        assert_eq!(err.table, "a");
        assert!(matches!(err.kind, ParseErrorKind::UnknownType { .. }));
    }

    #[test]
    fn test_parse_source_rejects_top_level_garbage() {
        let err = parse_source("tabel user { }").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnknownDirective {
                token: "tabel".into()
            }
        );
    }

    #[test]
    fn test_lenient_skips_invalid_tables() {
        let report = parse_source_lenient(
            r"
            table a { field new { } }
            table b { field id { type long } }
            table c { constraints { missing unique } field id { } }
            table d { field id { type int } }
            ",
        );
        let names: Vec<&str> = report.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d"]);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].table, "a");
        assert_eq!(report.errors[1].table, "c");
        assert!(!report.is_ok());
    }

    #[test]
    fn test_lenient_resumes_after_unclosed_table() {
        let report = parse_source_lenient(
            "table a { field x { type long } \
             table b { field y { type int } } \
             table c { field z { } }",
        );
        let names: Vec<&str> = report.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].table, "a");
    }

    #[test]
    fn test_lenient_lex_error() {
        let report = parse_source_lenient("table a { field x { default \"open } }");
        assert!(report.tables.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0].kind, ParseErrorKind::Lex(_)));
    }
}
