//! Schema model produced by the parser.
//!
//! A [`Table`] is only ever handed out by [`TableBuilder::finish`], so every
//! instance has passed normalization: constraint bits are transferred onto
//! the fields they name, all references resolve, and the fields are in
//! canonical order.

mod field;
mod table;
mod types;

pub use field::{Constraint, Field, ForeignKey};
pub use table::{Table, TableBuilder, UniqueKey};
pub use types::{
    ConstraintMask, ConstraintType, FieldType, Operator, RESERVED_KEYWORDS, is_reserved_keyword,
};
