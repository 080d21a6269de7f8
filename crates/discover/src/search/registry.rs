//! Searchable type registry.
//!
//! Nested index references name their parent by a type identifier
//! (`Ticket/comments`). Resolving one requires a table of known record types;
//! the registry is that table, populated explicitly at startup. Types register
//! either as *searchable* (with a factory producing a default instance whose
//! metadata can be read) or as *opaque* (known to the application, but without
//! search integration) so resolution can tell an unknown name apart from a
//! known-but-unsearchable one.

use std::collections::HashMap;
use std::fmt;

use crate::core::record::Searchable;
use crate::error::ReferenceError;
use crate::types::IndexReference;

type SearchableFactory = Box<dyn Fn() -> Box<dyn Searchable> + Send + Sync>;

enum TypeEntry {
    Searchable(SearchableFactory),
    Opaque,
}

/// In-memory table of record types known to the search layer.
///
/// Shared between components as `Arc<RwLock<SearchableRegistry>>`.
#[derive(Default)]
pub struct SearchableRegistry {
    entries: HashMap<String, TypeEntry>,
}

impl SearchableRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the identifier names a registered type.
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Registers a searchable type under an identifier.
    pub fn register<T>(&mut self, identifier: impl Into<String>)
    where
        T: Searchable + Default + 'static,
    {
        self.register_with(identifier, || Box::new(T::default()));
    }

    /// Registers a searchable type with an explicit default-instance factory.
    pub fn register_with(
        &mut self,
        identifier: impl Into<String>,
        factory: impl Fn() -> Box<dyn Searchable> + Send + Sync + 'static,
    ) {
        self.entries
            .insert(identifier.into(), TypeEntry::Searchable(Box::new(factory)));
    }

    /// Registers a known type that does not implement the Searchable
    /// capability.
    pub fn register_opaque(&mut self, identifier: impl Into<String>) {
        self.entries.insert(identifier.into(), TypeEntry::Opaque);
    }

    /// Instantiates a default instance of a registered searchable type.
    pub fn instantiate(&self, identifier: &str) -> Result<Box<dyn Searchable>, ReferenceError> {
        match self.entries.get(identifier) {
            None => Err(ReferenceError::UnknownType {
                type_name: identifier.to_string(),
            }),
            Some(TypeEntry::Opaque) => Err(ReferenceError::NotSearchable {
                type_name: identifier.to_string(),
            }),
            Some(TypeEntry::Searchable(factory)) => Ok(factory()),
        }
    }

    /// Instantiates the parent type of a nested reference.
    pub fn parent_of(
        &self,
        reference: &IndexReference,
    ) -> Result<Box<dyn Searchable>, ReferenceError> {
        match reference {
            IndexReference::Simple(index) => Err(ReferenceError::NotNested {
                index: index.clone(),
            }),
            IndexReference::Nested { parent_type, .. } => self.instantiate(parent_type),
        }
    }

    /// Resolves a nested reference to `(parent search index, nested field)`.
    pub fn resolve_nested(
        &self,
        reference: &IndexReference,
    ) -> Result<(String, String), ReferenceError> {
        match reference {
            IndexReference::Simple(index) => Err(ReferenceError::NotNested {
                index: index.clone(),
            }),
            IndexReference::Nested { parent_type, field } => {
                let parent = self.instantiate(parent_type)?;
                Ok((parent.search_index(), field.clone()))
            }
        }
    }
}

impl fmt::Debug for SearchableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchableRegistry")
            .field("types", &self.entries.len())
            .finish()
    }
}
