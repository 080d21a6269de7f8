//! SearchClient implementation over the official Elasticsearch client.
//!
//! Elasticsearch 8 is typeless, so the `doc_type` parameters of the store
//! contract are accepted and ignored here.

use async_trait::async_trait;
use elasticsearch::http::request::JsonBody;
use elasticsearch::http::response::Response;
use elasticsearch::indices::{
    IndicesCreateParts, IndicesDeleteAliasParts, IndicesPutAliasParts,
};
use elasticsearch::{BulkParts, GetParts, IndexParts, ScrollParts, SearchParts, UpdateParts};
use serde_json::{Value, json};

use crate::core::client::SearchClient;
use crate::error::{BackendError, BackendResult};
use crate::types::{ScrollCursor, ScrollPage, SearchHit, SearchResponse};

use super::backend::{BACKEND_NAME, ElasticsearchBackend};

fn internal_error(message: String) -> BackendError {
    BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    }
}

/// Fails on non-success statuses, carrying the response body for context.
async fn require_success(response: Response, context: &str) -> BackendResult<Response> {
    let status = response.status_code();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::RequestFailed {
        backend_name: BACKEND_NAME.to_string(),
        status: status.as_u16(),
        body: format!("{}: {}", context, body),
    })
}

/// Extracts hits from a search or scroll response body.
fn parse_hits(body: &Value) -> Vec<SearchHit> {
    body.get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(|h| h.as_array())
        .map(|hits| {
            hits.iter()
                .map(|hit| {
                    let id = hit
                        .get("_id")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string();
                    let source = hit.get("_source").cloned().unwrap_or(Value::Null);
                    SearchHit { id, source }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Extracts a scroll page (cursor + hits) from a response body.
fn parse_scroll_page(body: &Value) -> BackendResult<ScrollPage> {
    let cursor = body
        .get("_scroll_id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| internal_error("Scroll response missing _scroll_id".to_string()))?;
    Ok(ScrollPage::new(
        ScrollCursor::new(cursor),
        parse_hits(body),
    ))
}

#[async_trait]
impl SearchClient for ElasticsearchBackend {
    async fn index_document(
        &self,
        index: &str,
        _doc_type: &str,
        id: &str,
        document: Value,
    ) -> BackendResult<()> {
        let response = self
            .client()
            .index(IndexParts::IndexId(index, id))
            .body(document)
            .send()
            .await
            .map_err(|e| internal_error(format!("Failed to index document: {}", e)))?;

        require_success(response, "Failed to index document").await?;
        Ok(())
    }

    async fn update_document(
        &self,
        index: &str,
        _doc_type: &str,
        id: &str,
        body: Value,
    ) -> BackendResult<()> {
        let response = self
            .client()
            .update(UpdateParts::IndexId(index, id))
            .body(body)
            .send()
            .await
            .map_err(|e| internal_error(format!("Failed to update document: {}", e)))?;

        require_success(response, "Failed to update document").await?;
        Ok(())
    }

    async fn get_source(&self, index: &str, _doc_type: &str, id: &str) -> BackendResult<Value> {
        let response = self
            .client()
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| internal_error(format!("Failed to get document: {}", e)))?;

        let response = require_success(response, "Failed to get document").await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| internal_error(format!("Failed to parse get response: {}", e)))?;

        body.get("_source")
            .cloned()
            .ok_or_else(|| internal_error(format!("Document {}/{} has no _source", index, id)))
    }

    async fn search(
        &self,
        index: &str,
        _doc_type: &str,
        body: Value,
    ) -> BackendResult<SearchResponse> {
        let response = self
            .client()
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| internal_error(format!("Search failed: {}", e)))?;

        let response = require_success(response, "Search failed").await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| internal_error(format!("Failed to parse search response: {}", e)))?;

        let total = body
            .get("hits")
            .and_then(|h| h.get("total"))
            .and_then(|t| t.get("value"))
            .and_then(|v| v.as_u64());

        Ok(SearchResponse {
            total,
            hits: parse_hits(&body),
        })
    }

    async fn open_scroll(
        &self,
        index: &str,
        body: Value,
        page_size: u32,
        ttl: &str,
    ) -> BackendResult<ScrollPage> {
        let response = self
            .client()
            .search(SearchParts::Index(&[index]))
            .scroll(ttl)
            .size(page_size as i64)
            .body(body)
            .send()
            .await
            .map_err(|e| internal_error(format!("Failed to open scroll: {}", e)))?;

        let response = require_success(response, "Failed to open scroll").await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| internal_error(format!("Failed to parse scroll response: {}", e)))?;

        parse_scroll_page(&body)
    }

    async fn next_scroll(&self, cursor: &ScrollCursor, ttl: &str) -> BackendResult<ScrollPage> {
        let response = self
            .client()
            .scroll(ScrollParts::None)
            .body(json!({
                "scroll": ttl,
                "scroll_id": cursor.as_str(),
            }))
            .send()
            .await
            .map_err(|e| internal_error(format!("Failed to continue scroll: {}", e)))?;

        let response = require_success(response, "Failed to continue scroll").await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| internal_error(format!("Failed to parse scroll response: {}", e)))?;

        parse_scroll_page(&body)
    }

    async fn bulk_create(
        &self,
        index: &str,
        _doc_type: &str,
        documents: Vec<Value>,
    ) -> BackendResult<()> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            body.push(json!({ "create": {} }).into());
            body.push(document.into());
        }

        let response = self
            .client()
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| internal_error(format!("Bulk insert failed: {}", e)))?;

        let response = require_success(response, "Bulk insert failed").await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| internal_error(format!("Failed to parse bulk response: {}", e)))?;

        // Bulk answers 200 even when individual items fail.
        if body.get("errors").and_then(|v| v.as_bool()).unwrap_or(false) {
            return Err(BackendError::RequestFailed {
                backend_name: BACKEND_NAME.to_string(),
                status: 200,
                body: format!("Bulk insert into '{}' reported item failures", index),
            });
        }

        Ok(())
    }

    async fn create_index(&self, index: &str, body: Value) -> BackendResult<()> {
        let response = self
            .client()
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| internal_error(format!("Failed to create index {}: {}", index, e)))?;

        require_success(response, "Failed to create index").await?;
        tracing::debug!("created Elasticsearch index '{}'", index);
        Ok(())
    }

    async fn put_alias(&self, index: &str, alias: &str) -> BackendResult<()> {
        let response = self
            .client()
            .indices()
            .put_alias(IndicesPutAliasParts::IndexName(&[index], alias))
            .send()
            .await
            .map_err(|e| internal_error(format!("Failed to put alias {}: {}", alias, e)))?;

        require_success(response, "Failed to put alias").await?;
        Ok(())
    }

    async fn delete_alias(&self, index: &str, alias: &str) -> BackendResult<()> {
        let response = self
            .client()
            .indices()
            .delete_alias(IndicesDeleteAliasParts::IndexName(&[index], &[alias]))
            .send()
            .await
            .map_err(|e| internal_error(format!("Failed to delete alias {}: {}", alias, e)))?;

        require_success(response, "Failed to delete alias").await?;
        Ok(())
    }
}
