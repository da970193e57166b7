//! # tblc-core
//!
//! Parser and semantic normalizer for the table schema DSL.
//!
//! This crate provides:
//! - A hand-written lexer and a token cursor with single-step back-off
//! - A recursive descent parser for `table`, `field` and `constraints` blocks
//! - A normalization pass that merges constraints into per-field masks,
//!   resolves every field reference and sorts fields into canonical order
//!
//! The crate performs no I/O and generates no code: it turns schema source
//! text into validated [`Table`] models for a downstream code generator.
//!
//! ## Example
//!
//! ```rust
//! use tblc_core::{ConstraintMask, parse_source};
//!
//! let tables = parse_source(
//!     "table user {
//!          field id { type long notnull autoincrement }
//!          field name { type string length 32 }
//!          constraints { id primarykey }
//!      }",
//! )
//! .unwrap();
//!
//! let user = &tables[0];
//! assert_eq!(user.classname, "UserModel");
//! assert_eq!(user.primary_keys, 1);
//! assert!(user.field("id").unwrap().constraint_mask.contains(
//!     ConstraintMask::NOT_NULL | ConstraintMask::AUTOINCREMENT | ConstraintMask::PRIMARY_KEY
//! ));
//! assert_eq!(user.field("name").unwrap().length, Some(32));
//! ```
//!
//! ## Errors
//!
//! Every failure is logged through `tracing` at error level and returned as a
//! [`ParseError`] carrying the table name and the offending source span. A
//! failed table is never returned; [`parse_source_lenient`] skips it and
//! continues with the next definition.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod schema;

pub use error::{LexError, ParseError, ParseErrorKind};
pub use lexer::{Lexer, Span, Token, TokenCursor, TokenKind};
pub use parser::{Parser, SourceReport, parse_source, parse_source_lenient};
pub use schema::{
    Constraint, ConstraintMask, ConstraintType, Field, FieldType, ForeignKey, Operator, Table,
    TableBuilder, UniqueKey,
};
