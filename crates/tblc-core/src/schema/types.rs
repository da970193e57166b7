//! Closed lookup tables of the schema DSL: field types, update operators,
//! constraint types and reserved field names.

use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Field names that would clash with the generated bindings.
pub const RESERVED_KEYWORDS: &[&str] = &["new", "delete", "const", "volatile"];

/// Returns true if `name` may not be used as a field name.
#[must_use]
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Column types understood by the code generator.
///
/// The discriminants index [`FieldType::ALL`]; do not reorder without
/// updating the name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Password,
    #[default]
    String,
    Text,
    Timestamp,
    Long,
    Int,
    Short,
    Byte,
    Boolean,
    Double,
    Float,
    Blob,
}

impl FieldType {
    /// All field types, indexed by discriminant.
    pub const ALL: [Self; 12] = [
        Self::Password,
        Self::String,
        Self::Text,
        Self::Timestamp,
        Self::Long,
        Self::Int,
        Self::Short,
        Self::Byte,
        Self::Boolean,
        Self::Double,
        Self::Float,
        Self::Blob,
    ];

    /// Looks up a type by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the DSL name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::String => "string",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Long => "long",
            Self::Int => "int",
            Self::Short => "short",
            Self::Byte => "byte",
            Self::Boolean => "boolean",
            Self::Double => "double",
            Self::Float => "float",
            Self::Blob => "blob",
        }
    }

    /// Returns the position of the type in [`FieldType::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true if a `length` may be declared for this type.
    #[must_use]
    pub const fn supports_length(self) -> bool {
        matches!(self, Self::String | Self::Password)
    }

    /// Size in bytes of the member the code generator emits for this type.
    ///
    /// Text-like types are stored as an owned string handle.
    #[must_use]
    pub const fn storage_size(self) -> usize {
        match self {
            Self::Password | Self::String | Self::Text | Self::Blob => 24,
            Self::Timestamp | Self::Long | Self::Double => 8,
            Self::Int | Self::Float => 4,
            Self::Short => 2,
            Self::Byte | Self::Boolean => 1,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the generated update statement writes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// `col = col + ?`
    Add,
    /// `col = col - ?`
    Subtract,
    /// `col = ?`
    #[default]
    Set,
}

impl Operator {
    /// All operators, indexed by discriminant.
    pub const ALL: [Self; 3] = [Self::Add, Self::Subtract, Self::Set];

    /// Looks up an operator by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the DSL name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Union of [`ConstraintType`] bits attached to a field or constraint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ConstraintMask: u32 {
        const UNIQUE = 1 << 0;
        const PRIMARY_KEY = 1 << 1;
        const AUTOINCREMENT = 1 << 2;
        const NOT_NULL = 1 << 3;
        const INDEX = 1 << 4;
        const FOREIGN_KEY = 1 << 5;
    }
}

impl fmt::Display for ConstraintMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for ty in ConstraintType::ALL {
            if self.contains(ty.mask()) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(ty.as_str())?;
                first = false;
            }
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

/// A single constraint kind as written in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintType {
    Unique,
    PrimaryKey,
    Autoincrement,
    NotNull,
    Index,
    ForeignKey,
}

impl ConstraintType {
    /// All constraint types in bit order.
    pub const ALL: [Self; 6] = [
        Self::Unique,
        Self::PrimaryKey,
        Self::Autoincrement,
        Self::NotNull,
        Self::Index,
        Self::ForeignKey,
    ];

    /// Looks up a constraint type by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the DSL name of the constraint type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::PrimaryKey => "primarykey",
            Self::Autoincrement => "autoincrement",
            Self::NotNull => "notnull",
            Self::Index => "index",
            Self::ForeignKey => "foreignkey",
        }
    }

    /// Returns the bit of this constraint type.
    #[must_use]
    pub const fn mask(self) -> ConstraintMask {
        match self {
            Self::Unique => ConstraintMask::UNIQUE,
            Self::PrimaryKey => ConstraintMask::PRIMARY_KEY,
            Self::Autoincrement => ConstraintMask::AUTOINCREMENT,
            Self::NotNull => ConstraintMask::NOT_NULL,
            Self::Index => ConstraintMask::INDEX,
            Self::ForeignKey => ConstraintMask::FOREIGN_KEY,
        }
    }
}

impl From<ConstraintType> for ConstraintMask {
    fn from(ty: ConstraintType) -> Self {
        ty.mask()
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
