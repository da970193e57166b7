//! Table model and the builder the parser fills in.

use core::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::field::{Constraint, Field, ForeignKey};
use super::types::ConstraintMask;
use crate::error::ParseErrorKind;

/// Field names sharing one composite unique index.
pub type UniqueKey = BTreeSet<String>;

/// A validated table, ready for code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as declared.
    pub name: String,
    /// Namespace of the generated class; empty when not declared.
    pub namespace: String,
    /// Name of the generated class.
    pub classname: String,
    /// Fields in canonical order.
    pub fields: Vec<Field>,
    /// Single-field constraints keyed by field name.
    pub constraints: BTreeMap<String, Constraint>,
    /// Foreign keys keyed by owning field name.
    pub foreign_keys: BTreeMap<String, ForeignKey>,
    /// Composite unique indices.
    pub unique_keys: Vec<UniqueKey>,
    /// Number of fields that are part of the primary key.
    pub primary_keys: usize,
}

impl Table {
    /// Returns the default class name for a table, e.g. `user_group` ->
    /// `UserGroupModel`.
    #[must_use]
    pub fn default_classname(table: &str) -> String {
        format!("{}Model", table.to_case(Case::Pascal))
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the primary key fields in canonical order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_primary_key())
    }

    /// Returns the field names in canonical order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Orders fields by member size (largest first), then by name.
fn canonical_order(a: &Field, b: &Field) -> Ordering {
    b.field_type
        .storage_size()
        .cmp(&a.field_type.storage_size())
        .then_with(|| a.name.cmp(&b.name))
}

/// Accumulates the declarations of one `table { }` block.
///
/// The builder is owned by a single parse; [`TableBuilder::finish`] runs the
/// normalization pass and hands out the finished [`Table`].
#[derive(Debug, Clone)]
pub struct TableBuilder {
    name: String,
    namespace: String,
    classname: Option<String>,
    fields: BTreeMap<String, Field>,
    constraints: BTreeMap<String, Constraint>,
    foreign_keys: BTreeMap<String, ForeignKey>,
    unique_keys: Vec<UniqueKey>,
}

impl TableBuilder {
    /// Creates an empty builder for table `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: String::new(),
            classname: None,
            fields: BTreeMap::new(),
            constraints: BTreeMap::new(),
            foreign_keys: BTreeMap::new(),
            unique_keys: Vec::new(),
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the namespace of the generated class.
    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    /// Overrides the generated class name.
    pub fn set_classname(&mut self, classname: impl Into<String>) {
        self.classname = Some(classname.into());
    }

    /// Adds a field.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseErrorKind::DuplicateField`] if a field of the same
    /// name was already added.
    pub fn add_field(&mut self, field: Field) -> Result<(), ParseErrorKind> {
        if self.fields.contains_key(&field.name) {
            return Err(ParseErrorKind::DuplicateField { field: field.name });
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// ORs `types` into the single-field constraint of `field`, creating the
    /// constraint on first use.
    pub fn add_constraint(&mut self, field: &str, types: ConstraintMask) {
        if let Some(constraint) = self.constraints.get_mut(field) {
            constraint.types |= types;
        } else {
            self.constraints.insert(
                field.to_string(),
                Constraint {
                    fields: vec![field.to_string()],
                    types,
                },
            );
        }
    }

    /// Attaches a foreign key to `field`.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseErrorKind::DuplicateForeignKey`] if `field` already
    /// references another table.
    pub fn add_foreign_key(
        &mut self,
        field: &str,
        foreign_key: ForeignKey,
    ) -> Result<(), ParseErrorKind> {
        if self.foreign_keys.contains_key(field) {
            return Err(ParseErrorKind::DuplicateForeignKey {
                field: field.to_string(),
            });
        }
        self.foreign_keys.insert(field.to_string(), foreign_key);
        Ok(())
    }

    /// Adds a composite unique index.
    pub fn add_unique_key(&mut self, fields: UniqueKey) {
        self.unique_keys.push(fields);
    }

    /// Validates the collected declarations and builds the [`Table`].
    ///
    /// Transfers every constraint onto the fields it names, checks that all
    /// referenced fields exist, counts the primary key fields and sorts the
    /// fields into canonical order.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseErrorKind::UnresolvedFieldReference`] if a
    /// constraint, foreign key or unique key names an unknown field, and with
    /// [`ParseErrorKind::EmptyTable`] if no field was declared.
    pub fn finish(self) -> Result<Table, ParseErrorKind> {
        let Self {
            name,
            namespace,
            classname,
            mut fields,
            constraints,
            foreign_keys,
            unique_keys,
        } = self;

        for constraint in constraints.values() {
            for field_name in &constraint.fields {
                let field = fields.get_mut(field_name).ok_or_else(|| {
                    ParseErrorKind::UnresolvedFieldReference {
                        field: field_name.clone(),
                    }
                })?;
                debug!(table = %name, field = %field_name, types = %constraint.types, "transfer constraint to field");
                field.constraint_mask |= constraint.types;
            }
        }

        let referenced = foreign_keys
            .keys()
            .chain(unique_keys.iter().flatten());
        for field_name in referenced {
            if !fields.contains_key(field_name) {
                return Err(ParseErrorKind::UnresolvedFieldReference {
                    field: field_name.clone(),
                });
            }
        }

        if fields.is_empty() {
            return Err(ParseErrorKind::EmptyTable);
        }

        let primary_keys = fields.values().filter(|f| f.is_primary_key()).count();
        let mut fields: Vec<Field> = fields.into_values().collect();
        fields.sort_by(canonical_order);

        let classname = classname.unwrap_or_else(|| Table::default_classname(&name));
        Ok(Table {
            name,
            namespace,
            classname,
            fields,
            constraints,
            foreign_keys,
            unique_keys,
            primary_keys,
        })
    }
}
