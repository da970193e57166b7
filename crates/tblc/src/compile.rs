//! Loading schema files and rendering the compiled model.

use std::fs;
use std::path::Path;

use tblc_core::{SourceReport, Table, parse_source, parse_source_lenient};
use tracing::{debug, info};

use crate::error::{CompileError, CompileResult};

/// Reads a schema file into memory.
///
/// # Errors
///
/// Returns [`CompileError::Io`] if the file cannot be read.
pub fn read_source(path: &Path) -> CompileResult<String> {
    debug!("Reading {}", path.display());
    fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Compiles every table of a schema file, stopping at the first error.
///
/// # Errors
///
/// Returns [`CompileError::Io`] if the file cannot be read and
/// [`CompileError::Parse`] for the first invalid table definition.
pub fn compile_file(path: &Path) -> CompileResult<Vec<Table>> {
    let text = read_source(path)?;
    let tables = parse_source(&text).map_err(|source| CompileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Compiled {} table(s) from {}", tables.len(), path.display());
    Ok(tables)
}

/// Compiles the valid tables of a schema file, collecting the errors of the
/// invalid ones.
///
/// # Errors
///
/// Returns [`CompileError::Io`] if the file cannot be read.
pub fn compile_file_lenient(path: &Path) -> CompileResult<SourceReport> {
    let text = read_source(path)?;
    let report = parse_source_lenient(&text);
    info!(
        "Compiled {} table(s) from {} ({} rejected)",
        report.tables.len(),
        path.display(),
        report.errors.len()
    );
    Ok(report)
}

/// Serializes the compiled tables as a JSON array.
///
/// # Errors
///
/// Returns [`CompileError::Json`] if serialization fails.
pub fn to_json(tables: &[Table], pretty: bool) -> CompileResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(tables)?
    } else {
        serde_json::to_string(tables)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tblc_core::ParseErrorKind;
    use tempfile::TempDir;

    use super::*;

    fn write_schema(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_compile_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(
            &dir,
            "user.tbl",
            "table user { field id { type long } constraints { id primarykey } }",
        );

        let tables = compile_file(&path).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "user");
        assert_eq!(tables[0].primary_keys, 1);
    }

    #[test]
    fn test_compile_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.tbl");

        let err = compile_file(&path).unwrap_err();
        assert!(matches!(err, CompileError::Io { .. }));
        assert!(err.to_string().contains("missing.tbl"));
    }

    #[test]
    fn test_compile_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(&dir, "bad.tbl", "table t { field new { } }");

        let err = compile_file(&path).unwrap_err();
        let CompileError::Parse { source, .. } = &err else {
            panic!("expected parse error, got {err:?}");
        };
        assert!(matches!(source.kind, ParseErrorKind::ReservedKeyword { .. }));
        assert!(err.to_string().contains("bad.tbl"));
        assert!(err.to_string().contains("reserved keyword"));
    }

    #[test]
    fn test_compile_file_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(
            &dir,
            "mixed.tbl",
            "table a { field x { type nope } } table b { field y { type int } }",
        );

        let report = compile_file_lenient(&path).unwrap();
        assert_eq!(report.tables.len(), 1);
        assert_eq!(report.tables[0].name, "b");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].table, "a");
    }

    #[test]
    fn test_to_json() {
        let tables = parse_source("table user { field id { type long } }").unwrap();

        let compact = to_json(&tables, false).unwrap();
        assert!(!compact.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value[0]["name"], "user");
        assert_eq!(value[0]["classname"], "UserModel");
        assert_eq!(value[0]["fields"][0]["field_type"], "long");

        let pretty = to_json(&tables, true).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&pretty).unwrap(),
            value
        );
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[], false).unwrap(), "[]");
    }
}
