//! Discover — Elasticsearch record synchronization and querying
//!
//! This crate keeps application records synchronized with an Elasticsearch
//! store and translates simplified query inputs into the store's Query DSL.
//! Records implement the [`Searchable`](core::Searchable) capability; all
//! store traffic goes through the [`SearchClient`](core::SearchClient)
//! capability, implemented for production by
//! [`ElasticsearchBackend`](backends::elasticsearch::ElasticsearchBackend).
//!
//! # Nested references
//!
//! A record may declare its index as a *nested reference* of the form
//! `ParentType/field`, meaning its documents are embedded as an array under
//! `field` inside the parent type's documents. Query building scopes match
//! clauses under that path and targets the parent's index; saving merges the
//! record's document into the parent's nested list.
//!
//! # Index migration
//!
//! Physical indices are versioned (`alias-1`, `alias-2`, ...) behind a stable
//! alias. [`IndexMigrator`](search::IndexMigrator) creates the next
//! generation, scroll-copies every document across, and repoints the alias
//! with a detach-then-attach swap.
//!
//! # Architecture
//!
//! - [`core`] - the [`Searchable`](core::Searchable) and
//!   [`SearchClient`](core::SearchClient) capability traits
//! - [`types`] - index references, documents, generation descriptors, scroll
//!   cursors
//! - [`search`] - the registry, query builder, document synchronizer, and
//!   index migrator
//! - [`backends`] - concrete `SearchClient` implementations
//! - [`error`] - error types for all operations
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use discover::backends::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
//! use discover::core::{FieldValue, Searchable};
//! use discover::search::{DocumentSynchronizer, QueryBuilder, SearchableRegistry};
//! use parking_lot::RwLock;
//! use serde_json::{Value, json};
//!
//! #[derive(Default)]
//! struct Ticket {
//!     id: u64,
//!     subject: String,
//! }
//!
//! impl Searchable for Ticket {
//!     fn search_index(&self) -> String {
//!         "tickets".to_string()
//!     }
//!
//!     fn search_type(&self) -> String {
//!         "ticket".to_string()
//!     }
//!
//!     fn default_search_field(&self) -> Option<String> {
//!         Some("subject".to_string())
//!     }
//!
//!     fn document_fields(&self) -> Vec<String> {
//!         vec!["id".to_string(), "subject".to_string()]
//!     }
//!
//!     fn key(&self) -> Value {
//!         json!(self.id)
//!     }
//!
//!     fn attribute(&self, field: &str) -> Option<FieldValue> {
//!         match field {
//!             "id" => Some(self.id.into()),
//!             "subject" => Some(self.subject.as_str().into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ElasticsearchBackend::new(ElasticsearchConfig::default())?);
//!
//! let mut registry = SearchableRegistry::new();
//! registry.register::<Ticket>("Ticket");
//! let registry = Arc::new(RwLock::new(registry));
//!
//! let ticket = Ticket {
//!     id: 7,
//!     subject: "printer on fire".to_string(),
//! };
//!
//! // Write path: mirror the record into the store.
//! let synchronizer = DocumentSynchronizer::new(client.clone(), registry.clone());
//! synchronizer.save(&ticket).await?;
//!
//! // Read path: a bare string queries the default search field.
//! let builder = QueryBuilder::new(client, registry);
//! let _hits = builder.search(&ticket, "printer").await?;
//! # Ok(())
//! # }
//! ```
//!
//! The model layer is expected to call
//! [`DocumentSynchronizer::save`](search::DocumentSynchronizer::save) from its
//! post-commit hook; this crate does not hook into any ORM itself.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod search;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{BackendError, DiscoverError, DiscoverResult, ReferenceError};
pub use types::{Document, IndexDescriptor, IndexReference};

// Re-export core traits and components
pub use self::core::{FieldValue, SearchClient, Searchable};
pub use search::{
    DocumentSynchronizer, IndexMigrator, MigrationSettings, QueryBuilder, QueryInput,
    SearchRequest, SearchableRegistry,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
