//! Document synchronization.
//!
//! Writes one record's document representation into the store. Records with a
//! simple index are upserted by id; records with a nested index are merged
//! into their parent's document via read-modify-write.
//!
//! The model layer is expected to forward its post-commit notification for a
//! saved record to [`DocumentSynchronizer::save`]; that callback wiring lives
//! outside this crate.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value, json};

use crate::core::client::SearchClient;
use crate::core::record::{Searchable, key_to_string};
use crate::error::{DiscoverResult, SyncError};
use crate::search::registry::SearchableRegistry;
use crate::types::{Document, IndexReference};

/// Synchronizes record documents into the store.
pub struct DocumentSynchronizer {
    client: Arc<dyn SearchClient>,
    registry: Arc<RwLock<SearchableRegistry>>,
}

impl DocumentSynchronizer {
    /// Creates a synchronizer over a store client and a type registry.
    pub fn new(client: Arc<dyn SearchClient>, registry: Arc<RwLock<SearchableRegistry>>) -> Self {
        Self { client, registry }
    }

    /// Saves one record snapshot.
    ///
    /// The document is recomputed from the record on every call. Store-side
    /// failures propagate uninterpreted; no retry happens here.
    ///
    /// The nested path is a non-transactional read-modify-write: a concurrent
    /// writer updating the same parent document between the read and the
    /// write can be overwritten. Callers needing stronger guarantees must
    /// serialize saves per parent themselves.
    pub async fn save(&self, record: &dyn Searchable) -> DiscoverResult<()> {
        let document = Document::from_record(record).with_identity(record);
        let reference = IndexReference::parse(&record.search_index());

        match &reference {
            IndexReference::Simple(index) => {
                let id = key_to_string(&record.key());
                self.client
                    .index_document(index, &record.search_type(), &id, document.into_value())
                    .await?;
                tracing::debug!("indexed document {}/{}", index, id);
                Ok(())
            }
            IndexReference::Nested { .. } => self.save_nested(record, &reference, document).await,
        }
    }

    /// Merges the record's document into its parent's nested list.
    async fn save_nested(
        &self,
        record: &dyn Searchable,
        reference: &IndexReference,
        document: Document,
    ) -> DiscoverResult<()> {
        let (parent_index, field) = self.registry.read().resolve_nested(reference)?;

        let parent = record.parent().ok_or_else(|| SyncError::MissingParent {
            search_type: record.search_type(),
            index: record.search_index(),
        })?;
        let parent_type = parent.search_type();
        let parent_id = key_to_string(&parent.key());

        let source = self
            .client
            .get_source(&parent_index, &parent_type, &parent_id)
            .await?;

        // An absent nested field reads as an empty list.
        let children = source
            .get(&field)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let key_name = record.key_name();
        let key = record.key();
        let replacement = document.into_value();

        let mut found = false;
        let mut merged = Vec::with_capacity(children.len() + 1);
        for child in children {
            if child.get(&key_name) == Some(&key) {
                merged.push(replacement.clone());
                found = true;
            } else {
                merged.push(child);
            }
        }
        if !found {
            merged.push(replacement);
        }

        let mut doc = Map::new();
        doc.insert(field.clone(), Value::Array(merged));

        self.client
            .update_document(&parent_index, &parent_type, &parent_id, json!({ "doc": doc }))
            .await?;
        tracing::debug!(
            "merged document into {}/{} under '{}'",
            parent_index,
            parent_id,
            field
        );
        Ok(())
    }
}
