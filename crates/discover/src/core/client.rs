//! The SearchClient capability.
//!
//! Defines the client-side contract this crate relies on. The production
//! implementation lives in [`crate::backends::elasticsearch`]; tests supply
//! an in-memory fake. Everything the search layer does with the store goes
//! through this trait, so components receive a client handle at construction
//! and never reach for ambient global state.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendResult;
use crate::types::{ScrollCursor, ScrollPage, SearchResponse};

/// Operations the search layer needs from the remote store.
///
/// The `doc_type` parameter is part of the store contract; typeless engines
/// (Elasticsearch 7+) are free to ignore it.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Upserts one document by id.
    async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        document: Value,
    ) -> BackendResult<()>;

    /// Issues a partial update of one document. `body` is the engine's update
    /// envelope (e.g. `{"doc": {...}}`).
    async fn update_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        body: Value,
    ) -> BackendResult<()>;

    /// Fetches the stored source of one document.
    async fn get_source(&self, index: &str, doc_type: &str, id: &str) -> BackendResult<Value>;

    /// Executes a structured query and returns the matching hits.
    async fn search(&self, index: &str, doc_type: &str, body: Value) -> BackendResult<SearchResponse>;

    /// Opens a full-index scan, returning the first page together with its
    /// continuation cursor. The cursor is valid for `ttl` (an engine duration
    /// expression such as `"1m"`) and must be refreshed from each page.
    async fn open_scroll(
        &self,
        index: &str,
        body: Value,
        page_size: u32,
        ttl: &str,
    ) -> BackendResult<ScrollPage>;

    /// Fetches the next page of an open scan.
    async fn next_scroll(&self, cursor: &ScrollCursor, ttl: &str) -> BackendResult<ScrollPage>;

    /// Bulk-inserts documents with create (not overwrite) semantics. Any
    /// item-level failure is a failure of the whole call.
    async fn bulk_create(
        &self,
        index: &str,
        doc_type: &str,
        documents: Vec<Value>,
    ) -> BackendResult<()>;

    /// Creates a physical index. `body` carries the engine's settings and
    /// mappings envelope.
    async fn create_index(&self, index: &str, body: Value) -> BackendResult<()>;

    /// Points `alias` at `index`.
    async fn put_alias(&self, index: &str, alias: &str) -> BackendResult<()>;

    /// Detaches `alias` from `index`.
    async fn delete_alias(&self, index: &str, alias: &str) -> BackendResult<()>;
}
