//! # tblc
//!
//! Reads table schema files, runs them through [`tblc_core`] and renders the
//! validated model as JSON for a downstream code generator.

pub mod compile;
pub mod error;

pub use compile::{compile_file, compile_file_lenient, read_source, to_json};
pub use error::{CompileError, CompileResult};
