//! Column-level schema types.

use serde::{Deserialize, Serialize};

use super::types::{ConstraintMask, FieldType, Operator};

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name, unique within its table.
    pub name: String,
    /// Column type.
    pub field_type: FieldType,
    /// Operator used by generated update statements.
    pub update_operator: Operator,
    /// Union of every constraint that names this field.
    pub constraint_mask: ConstraintMask,
    /// Literal default value, if declared.
    pub default_value: Option<String>,
    /// Maximum length for `string` and `password` columns.
    pub length: Option<u32>,
}

impl Field {
    /// Creates a `string` field with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::default(),
            update_operator: Operator::default(),
            constraint_mask: ConstraintMask::empty(),
            default_value: None,
            length: None,
        }
    }

    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.constraint_mask.contains(ConstraintMask::PRIMARY_KEY)
    }

    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.constraint_mask.contains(ConstraintMask::UNIQUE)
    }

    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.constraint_mask.contains(ConstraintMask::NOT_NULL)
    }

    #[must_use]
    pub fn is_index(&self) -> bool {
        self.constraint_mask.contains(ConstraintMask::INDEX)
    }

    #[must_use]
    pub fn is_autoincrement(&self) -> bool {
        self.constraint_mask.contains(ConstraintMask::AUTOINCREMENT)
    }

    #[must_use]
    pub fn is_foreign_key(&self) -> bool {
        self.constraint_mask.contains(ConstraintMask::FOREIGN_KEY)
    }
}

/// Constraint bits shared by the listed fields.
///
/// Constraints are keyed by field name in a table, so repeated declarations
/// for the same field merge into one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub fields: Vec<String>,
    pub types: ConstraintMask,
}

/// Reference from an owning field to a column of another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Referenced table.
    pub table: String,
    /// Referenced column in `table`.
    pub field: String,
}

impl ForeignKey {
    #[must_use]
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_defaults() {
        let field = Field::new("email");
        assert_eq!(field.name, "email");
        assert_eq!(field.field_type, FieldType::String);
        assert_eq!(field.update_operator, Operator::Set);
        assert!(field.constraint_mask.is_empty());
        assert_eq!(field.default_value, None);
        assert_eq!(field.length, None);
    }

    #[test]
    fn test_field_predicates() {
        let mut field = Field::new("id");
        field.constraint_mask = ConstraintMask::PRIMARY_KEY | ConstraintMask::AUTOINCREMENT;
        assert!(field.is_primary_key());
        assert!(field.is_autoincrement());
        assert!(!field.is_not_null());
        assert!(!field.is_unique());
        assert!(!field.is_index());
        assert!(!field.is_foreign_key());
    }
}
