//! Schema Parser
//!
//! A hand-written recursive descent parser for `table { ... }` definitions,
//! followed by the normalization pass in [`crate::schema::TableBuilder`].

#[allow(clippy::module_inception)]
mod parser;
mod source;

pub use parser::Parser;
pub use source::{SourceReport, parse_source, parse_source_lenient};
