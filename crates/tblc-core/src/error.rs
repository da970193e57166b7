//! Error types for lexing and parsing schema definitions.

use core::fmt;

use crate::lexer::Span;
use crate::schema::{ConstraintMask, FieldType};

/// Errors produced while splitting the source into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A `"` string runs to the end of input.
    #[error("unterminated string literal at {span}")]
    UnterminatedString {
        /// Location of the string, from the opening quote.
        span: Span,
    },

    /// A `/*` comment runs to the end of input.
    #[error("unterminated block comment at {span}")]
    UnterminatedComment {
        /// Location of the comment, from the opening `/*`.
        span: Span,
    },
}

impl LexError {
    /// Returns the location of the error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnterminatedString { span } | Self::UnterminatedComment { span } => *span,
        }
    }
}

/// What went wrong while parsing or normalizing a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The source could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// `table` is not followed by a name.
    #[error("expected table name after 'table'")]
    MissingTableName,

    /// `field` is not followed by a name.
    #[error("expected field name after 'field'")]
    MissingFieldName,

    /// A field is named after a reserved keyword.
    #[error("field '{field}' uses a reserved keyword")]
    ReservedKeyword {
        /// The offending field name.
        field: String,
    },

    /// A block opener `{` is missing.
    #[error("expected '{{', found '{found}'")]
    ExpectedBlockOpen {
        /// Text of the token found instead.
        found: String,
    },

    /// The input ended inside a block.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What the parser was waiting for.
        expected: &'static str,
    },

    /// `type` names no known field type.
    #[error("invalid field type for field '{field}': '{name}'")]
    UnknownType {
        /// The field being declared.
        field: String,
        /// The unknown type name.
        name: String,
    },

    /// `operator` names no known update operator.
    #[error("invalid operator for field '{field}': '{name}'")]
    UnknownOperator {
        /// The field being declared.
        field: String,
        /// The unknown operator name.
        name: String,
    },

    /// A field declares `default` twice.
    #[error("there is already a default value ('{existing}') defined for field '{field}'")]
    DuplicateDefault {
        /// The field being declared.
        field: String,
        /// The default value declared first.
        existing: String,
    },

    /// `length` on a type other than `string` or `password`.
    #[error("field '{field}' of type {field_type} doesn't support the length parameter")]
    UnsupportedLength {
        /// The field being declared.
        field: String,
        /// Type of the field.
        field_type: FieldType,
    },

    /// `length` is not a positive integer.
    #[error("invalid length for field '{field}': '{value}' is not a positive integer")]
    InvalidLength {
        /// The field being declared.
        field: String,
        /// The rejected length text.
        value: String,
    },

    /// A directive is missing its argument.
    #[error("missing value for {directive} of '{owner}'")]
    MissingValue {
        /// The directive lacking a value.
        directive: &'static str,
        /// The field, table or field group the directive belongs to.
        owner: String,
    },

    /// A token that is not valid at this position of a block.
    #[error("unknown token: '{token}'")]
    UnknownDirective {
        /// Text of the token.
        token: String,
    },

    /// Two fields of one table share a name.
    #[error("field '{field}' is declared more than once")]
    DuplicateField {
        /// The repeated field name.
        field: String,
    },

    /// Two tables of one source share a name.
    #[error("table '{table}' is declared more than once")]
    DuplicateTable {
        /// The repeated table name.
        table: String,
    },

    /// A field declares a second foreign key.
    #[error("field '{field}' already references a foreign key")]
    DuplicateForeignKey {
        /// The owning field.
        field: String,
    },

    /// A constraint entry starts with neither a name nor `(`.
    #[error("expected a field name or a parenthesized field list, found '{found}'")]
    ExpectedFieldList {
        /// Text of the token found instead.
        found: String,
    },

    /// A `(` field list is not closed.
    #[error("unterminated field list")]
    UnterminatedGroup,

    /// A constraint entry names no known constraint type.
    #[error("no constraint type mapping found for '{token}'")]
    UnknownConstraintType {
        /// Text of the token.
        token: String,
    },

    /// A foreign key is declared on more than one field.
    #[error("foreign key constraint expects exactly one field, {count} given")]
    ForeignKeyFieldCountMismatch {
        /// Number of fields in the group.
        count: usize,
    },

    /// `foreignkey` lacks its target table or field.
    #[error("foreign key of field '{field}' is missing the {expected}")]
    ForeignKeyMissingTarget {
        /// The owning field.
        field: String,
        /// Which part of the target is missing.
        expected: &'static str,
    },

    /// A field group carries a constraint other than `unique` or `primarykey`.
    #[error("constraint '{types}' is not supported on field group ({})", .fields.join(", "))]
    MultiFieldNonUniqueConstraint {
        /// The fields of the group.
        fields: Vec<String>,
        /// The rejected constraint bits.
        types: ConstraintMask,
    },

    /// A constraint, foreign key or unique key names an undeclared field.
    #[error("constraint referenced field wasn't found: '{field}'")]
    UnresolvedFieldReference {
        /// The undeclared field name.
        field: String,
    },

    /// The table declares no fields.
    #[error("table declares no fields")]
    EmptyTable,
}

/// A parse error with the table it occurred in and the offending location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of failure.
    pub kind: ParseErrorKind,
    /// Name of the table being parsed; empty outside of a table block.
    pub table: String,
    /// Location of the offending token.
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, table: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            table: table.into(),
            span,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let span = err.span();
        Self::new(ParseErrorKind::Lex(err), String::new(), span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.table.is_empty() {
            write!(f, "{} at position {}", self.kind, self.span)
        } else {
            write!(
                f,
                "table '{}': {} at position {}",
                self.table, self.kind, self.span
            )
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_table() {
        let err = ParseError::new(
            ParseErrorKind::ReservedKeyword {
                field: "new".into(),
            },
            "user",
            Span::new(18, 21),
        );
        assert_eq!(
            err.to_string(),
            "table 'user': field 'new' uses a reserved keyword at position 18..21"
        );
    }

    #[test]
    fn test_display_without_table() {
        let err = ParseError::new(ParseErrorKind::MissingTableName, "", Span::point(5));
        assert_eq!(
            err.to_string(),
            "expected table name after 'table' at position 5..5"
        );
    }

    #[test]
    fn test_group_error_lists_fields() {
        let kind = ParseErrorKind::MultiFieldNonUniqueConstraint {
            fields: vec!["a".into(), "b".into()],
            types: ConstraintMask::NOT_NULL,
        };
        assert_eq!(
            kind.to_string(),
            "constraint 'notnull' is not supported on field group (a, b)"
        );
    }

    #[test]
    fn test_from_lex_error() {
        let err: ParseError = LexError::UnterminatedString {
            span: Span::new(3, 8),
        }
        .into();
        assert_eq!(err.span, Span::new(3, 8));
        assert!(matches!(err.kind, ParseErrorKind::Lex(_)));
        assert!(err.table.is_empty());
    }
}
