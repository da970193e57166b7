//! Error types for compiling schema files.

use std::path::PathBuf;

use tblc_core::ParseError;

/// Errors that can occur while compiling schema files.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The schema file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A table definition in the schema file is invalid.
    #[error("{}: {source}", path.display())]
    Parse {
        /// Path of the schema file.
        path: PathBuf,
        /// The first parse error in the file.
        source: ParseError,
    },

    /// The model could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for compile operations.
pub type CompileResult<T> = Result<T, CompileError>;
