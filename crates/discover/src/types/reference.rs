//! Index reference parsing.
//!
//! An index identifier is either a plain index name or a nested reference of
//! the form `ParentType/field`, meaning: this record's documents live embedded
//! as an array under `field` inside the parent type's documents.

use std::fmt;

/// Separator between the parent type identifier and the nested field name.
pub const NESTED_SEPARATOR: char = '/';

/// A parsed index identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexReference {
    /// A plain index name.
    Simple(String),
    /// A reference into a parent type's documents.
    Nested {
        /// Registry identifier of the parent record type.
        parent_type: String,
        /// Field under which this record's documents are embedded.
        field: String,
    },
}

impl IndexReference {
    /// Parses a raw index identifier. A well-formed nested reference contains
    /// the separator exactly once; the split happens at the first occurrence.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(NESTED_SEPARATOR) {
            Some((parent_type, field)) => IndexReference::Nested {
                parent_type: parent_type.to_string(),
                field: field.to_string(),
            },
            None => IndexReference::Simple(raw.to_string()),
        }
    }

    /// Returns true for the nested form.
    pub fn is_nested(&self) -> bool {
        matches!(self, IndexReference::Nested { .. })
    }

    /// The nested field name, if this is a nested reference.
    pub fn nested_field(&self) -> Option<&str> {
        match self {
            IndexReference::Nested { field, .. } => Some(field),
            IndexReference::Simple(_) => None,
        }
    }
}

impl fmt::Display for IndexReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexReference::Simple(index) => write!(f, "{index}"),
            IndexReference::Nested { parent_type, field } => {
                write!(f, "{parent_type}{NESTED_SEPARATOR}{field}")
            }
        }
    }
}

/// Returns true if a raw index identifier denotes a nested reference.
pub fn index_is_nested(index: &str) -> bool {
    index.contains(NESTED_SEPARATOR)
}
