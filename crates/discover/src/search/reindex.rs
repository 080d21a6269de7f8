//! Versioned index migration.
//!
//! A record's index is addressed through a stable alias; each migration
//! creates the next physical generation (`alias-version`), copies every
//! document across with a cursor scan, and repoints the alias.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::client::SearchClient;
use crate::core::record::Searchable;
use crate::error::{DiscoverResult, MigrationError};
use crate::types::IndexDescriptor;

fn default_shards() -> u32 {
    2
}

fn default_replicas() -> u32 {
    1
}

fn default_page_size() -> u32 {
    1000
}

fn default_scroll_ttl() -> String {
    "1m".to_string()
}

/// Settings for one migration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationSettings {
    /// Primary shards for the new generation (default: 2).
    #[serde(default = "default_shards")]
    pub shards: u32,

    /// Replica shards for the new generation (default: 1).
    #[serde(default = "default_replicas")]
    pub replicas: u32,

    /// Documents fetched per scan page (default: 1000).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Cursor lifetime between page fetches (default: "1m").
    #[serde(default = "default_scroll_ttl")]
    pub scroll_ttl: String,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            shards: default_shards(),
            replicas: default_replicas(),
            page_size: default_page_size(),
            scroll_ttl: default_scroll_ttl(),
        }
    }
}

impl MigrationSettings {
    /// Sets the shard count.
    pub fn with_shards(mut self, shards: u32) -> Self {
        self.shards = shards;
        self
    }

    /// Sets the replica count.
    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = replicas;
        self
    }

    /// Sets the scan page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Migrates a record's index to a new generation.
pub struct IndexMigrator {
    client: Arc<dyn SearchClient>,
}

impl IndexMigrator {
    /// Creates a migrator over a store client.
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }

    /// Migrates the record's alias to generation `target_version`.
    ///
    /// Creates `alias-target_version` with the given field mappings, copies
    /// every document from the previous generation (skipped when the target
    /// is the first generation), detaches the alias from the old index, and
    /// attaches it to the new one. Between detach and attach there is a brief
    /// window where the alias resolves to neither generation; readers must
    /// tolerate a transient "alias not found" during migration.
    ///
    /// A store failure aborts the migration where it stands: the new index
    /// may exist and be partially filled, but the alias is never moved to an
    /// incomplete generation. Old physical indices are not deleted here.
    ///
    /// Running two migrations for the same alias concurrently is undefined
    /// behavior; callers must prevent it (e.g. with an external lock).
    pub async fn migrate(
        &self,
        record: &dyn Searchable,
        target_version: u32,
        field_mappings: Value,
        settings: &MigrationSettings,
    ) -> DiscoverResult<()> {
        if target_version == 0 {
            return Err(MigrationError::InvalidTargetVersion { version: 0 }.into());
        }

        let alias = record.search_index();
        let doc_type = record.search_type();
        let descriptor = IndexDescriptor::new(alias.clone(), target_version);
        let new_index = descriptor.physical_name();

        let body = json!({
            "settings": {
                "index": {
                    "number_of_shards": settings.shards,
                    "number_of_replicas": settings.replicas,
                },
            },
            "mappings": {
                "properties": field_mappings,
            },
        });
        self.client.create_index(&new_index, body).await?;
        tracing::info!("created index '{}'", new_index);

        if let Some(previous) = descriptor.previous() {
            let old_index = previous.physical_name();
            let copied = self
                .copy_documents(&old_index, &new_index, &doc_type, settings)
                .await?;
            tracing::info!(
                "copied {} documents from '{}' into '{}'",
                copied,
                old_index,
                new_index
            );

            self.client.delete_alias(&old_index, &alias).await?;
        }

        self.client.put_alias(&new_index, &alias).await?;
        tracing::info!("alias '{}' now points at '{}'", alias, new_index);
        Ok(())
    }

    /// Copies every stored document from one generation into the next.
    async fn copy_documents(
        &self,
        old_index: &str,
        new_index: &str,
        doc_type: &str,
        settings: &MigrationSettings,
    ) -> DiscoverResult<u64> {
        // Internal document order gives a stable single pass over the index.
        let scan = json!({
            "query": { "match_all": {} },
            "sort": ["_doc"],
        });

        let mut page = self
            .client
            .open_scroll(old_index, scan, settings.page_size, &settings.scroll_ttl)
            .await?;

        let mut copied = 0u64;

        // The cursor token is not stable across pages; each fetch's returned
        // cursor drives the next, and an empty page is the only termination
        // signal.
        while !page.is_empty() {
            let documents: Vec<Value> = page.hits.iter().map(|hit| hit.source.clone()).collect();
            copied += documents.len() as u64;
            self.client
                .bulk_create(new_index, doc_type, documents)
                .await?;

            page = self
                .client
                .next_scroll(&page.cursor, &settings.scroll_ttl)
                .await?;
        }

        Ok(copied)
    }
}
