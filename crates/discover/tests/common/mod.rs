//! Shared test harness: an in-memory SearchClient fake plus fixture records.
//!
//! The fake keeps documents, indices, aliases, and scroll state in plain maps
//! and records every operation it serves, so tests can assert both on the
//! resulting store state and on the call sequence.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::{Mutex, RwLock};
use serde_json::{Value, json};

use discover::core::{FieldValue, SearchClient, Searchable, key_to_string};
use discover::error::{BackendError, BackendResult};
use discover::search::SearchableRegistry;
use discover::types::{ScrollCursor, ScrollPage, SearchHit, SearchResponse};

// ============================================================================
// In-memory SearchClient
// ============================================================================

#[derive(Default)]
struct ClientState {
    documents: BTreeMap<String, BTreeMap<String, Value>>,
    indices: BTreeMap<String, Value>,
    aliases: BTreeMap<String, String>,
    scrolls: HashMap<String, VecDeque<Vec<SearchHit>>>,
    scroll_seq: u32,
    operations: Vec<String>,
    searches: Vec<(String, Value)>,
    fail_bulk: Option<String>,
}

/// An in-memory stand-in for the remote store.
#[derive(Default)]
pub struct InMemoryClient {
    state: Mutex<ClientState>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one stored document.
    pub fn seed_document(&self, index: &str, id: &str, document: Value) {
        self.state
            .lock()
            .documents
            .entry(index.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    /// Seeds an alias target.
    pub fn seed_alias(&self, alias: &str, index: &str) {
        self.state
            .lock()
            .aliases
            .insert(alias.to_string(), index.to_string());
    }

    /// Makes every subsequent bulk call fail.
    pub fn fail_bulk(&self, message: &str) {
        self.state.lock().fail_bulk = Some(message.to_string());
    }

    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.state
            .lock()
            .documents
            .get(index)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    /// All documents in an index, in id order.
    pub fn documents_in(&self, index: &str) -> Vec<Value> {
        self.state
            .lock()
            .documents
            .get(index)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn alias_target(&self, alias: &str) -> Option<String> {
        self.state.lock().aliases.get(alias).cloned()
    }

    pub fn index_exists(&self, index: &str) -> bool {
        self.state.lock().indices.contains_key(index)
    }

    /// The body an index was created with.
    pub fn index_body(&self, index: &str) -> Option<Value> {
        self.state.lock().indices.get(index).cloned()
    }

    /// Every operation served, in order.
    pub fn operations(&self) -> Vec<String> {
        self.state.lock().operations.clone()
    }

    /// Operations whose log line starts with `prefix`.
    pub fn operations_matching(&self, prefix: &str) -> Vec<String> {
        self.operations()
            .into_iter()
            .filter(|op| op.starts_with(prefix))
            .collect()
    }

    /// The most recent search body, if any.
    pub fn last_search(&self) -> Option<(String, Value)> {
        self.state.lock().searches.last().cloned()
    }

    fn sorted_hits(state: &ClientState, index: &str) -> Vec<SearchHit> {
        state
            .documents
            .get(index)
            .map(|docs| {
                docs.iter()
                    .map(|(id, source)| SearchHit::new(id.clone(), source.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn next_token(state: &mut ClientState) -> String {
        state.scroll_seq += 1;
        format!("scroll-{}", state.scroll_seq)
    }

    fn not_found(index: &str, id: &str) -> BackendError {
        BackendError::RequestFailed {
            backend_name: "in-memory".to_string(),
            status: 404,
            body: format!("{}/{} not found", index, id),
        }
    }
}

#[async_trait]
impl SearchClient for InMemoryClient {
    async fn index_document(
        &self,
        index: &str,
        _doc_type: &str,
        id: &str,
        document: Value,
    ) -> BackendResult<()> {
        let mut state = self.state.lock();
        state.operations.push(format!("index {}/{}", index, id));
        state
            .documents
            .entry(index.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn update_document(
        &self,
        index: &str,
        _doc_type: &str,
        id: &str,
        body: Value,
    ) -> BackendResult<()> {
        let mut state = self.state.lock();
        state.operations.push(format!("update {}/{}", index, id));

        let patch = body.get("doc").cloned().unwrap_or_else(|| json!({}));
        let stored = state
            .documents
            .get_mut(index)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| Self::not_found(index, id))?;

        if let (Some(target), Some(fields)) = (stored.as_object_mut(), patch.as_object()) {
            for (field, value) in fields {
                target.insert(field.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn get_source(&self, index: &str, _doc_type: &str, id: &str) -> BackendResult<Value> {
        let mut state = self.state.lock();
        state.operations.push(format!("get {}/{}", index, id));
        state
            .documents
            .get(index)
            .and_then(|docs| docs.get(id))
            .cloned()
            .ok_or_else(|| Self::not_found(index, id))
    }

    async fn search(
        &self,
        index: &str,
        _doc_type: &str,
        body: Value,
    ) -> BackendResult<SearchResponse> {
        let mut state = self.state.lock();
        state.operations.push(format!("search {}", index));
        state.searches.push((index.to_string(), body));

        let hits = Self::sorted_hits(&state, index);
        Ok(SearchResponse {
            total: Some(hits.len() as u64),
            hits,
        })
    }

    async fn open_scroll(
        &self,
        index: &str,
        _body: Value,
        page_size: u32,
        _ttl: &str,
    ) -> BackendResult<ScrollPage> {
        let mut state = self.state.lock();
        state.operations.push(format!("open_scroll {}", index));

        let hits = Self::sorted_hits(&state, index);
        let mut pages: VecDeque<Vec<SearchHit>> = hits
            .chunks(page_size.max(1) as usize)
            .map(|chunk| chunk.to_vec())
            .collect();

        let first = pages.pop_front().unwrap_or_default();
        let token = Self::next_token(&mut state);
        state.scrolls.insert(token.clone(), pages);
        Ok(ScrollPage::new(ScrollCursor::new(token), first))
    }

    async fn next_scroll(&self, cursor: &ScrollCursor, _ttl: &str) -> BackendResult<ScrollPage> {
        let mut state = self.state.lock();
        state
            .operations
            .push(format!("next_scroll {}", cursor.as_str()));

        // Tokens rotate every page; a stale one is an error, like the real
        // engine after the cursor expires.
        let mut pages = state
            .scrolls
            .remove(cursor.as_str())
            .ok_or_else(|| BackendError::RequestFailed {
                backend_name: "in-memory".to_string(),
                status: 404,
                body: format!("unknown scroll cursor '{}'", cursor.as_str()),
            })?;

        let page = pages.pop_front().unwrap_or_default();
        let token = Self::next_token(&mut state);
        state.scrolls.insert(token.clone(), pages);
        Ok(ScrollPage::new(ScrollCursor::new(token), page))
    }

    async fn bulk_create(
        &self,
        index: &str,
        _doc_type: &str,
        documents: Vec<Value>,
    ) -> BackendResult<()> {
        let mut state = self.state.lock();
        state
            .operations
            .push(format!("bulk {} x{}", index, documents.len()));

        if let Some(message) = state.fail_bulk.clone() {
            return Err(BackendError::RequestFailed {
                backend_name: "in-memory".to_string(),
                status: 500,
                body: message,
            });
        }

        let target = state.documents.entry(index.to_string()).or_default();
        for document in documents {
            let id = document
                .get("id")
                .map(key_to_string)
                .unwrap_or_else(|| format!("anon-{}", target.len()));
            if target.contains_key(&id) {
                return Err(BackendError::RequestFailed {
                    backend_name: "in-memory".to_string(),
                    status: 409,
                    body: format!("document {}/{} already exists", index, id),
                });
            }
            target.insert(id, document);
        }
        Ok(())
    }

    async fn create_index(&self, index: &str, body: Value) -> BackendResult<()> {
        let mut state = self.state.lock();
        state.operations.push(format!("create_index {}", index));
        state.indices.insert(index.to_string(), body);
        Ok(())
    }

    async fn put_alias(&self, index: &str, alias: &str) -> BackendResult<()> {
        let mut state = self.state.lock();
        state
            .operations
            .push(format!("put_alias {} {}", index, alias));
        state.aliases.insert(alias.to_string(), index.to_string());
        Ok(())
    }

    async fn delete_alias(&self, index: &str, alias: &str) -> BackendResult<()> {
        let mut state = self.state.lock();
        state
            .operations
            .push(format!("delete_alias {} {}", index, alias));
        if state.aliases.get(alias).map(String::as_str) == Some(index) {
            state.aliases.remove(alias);
        }
        Ok(())
    }
}

// ============================================================================
// Fixture records
// ============================================================================

/// Top-level record with its own index.
#[derive(Debug, Clone, Default)]
pub struct Ticket {
    pub id: u64,
    pub subject: String,
    pub status: String,
    pub opened_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn new(id: u64, subject: &str) -> Self {
        Self {
            id,
            subject: subject.to_string(),
            status: "open".to_string(),
            opened_at: None,
        }
    }
}

impl Searchable for Ticket {
    fn search_index(&self) -> String {
        "tickets".to_string()
    }

    fn search_type(&self) -> String {
        "ticket".to_string()
    }

    fn default_search_field(&self) -> Option<String> {
        Some("subject".to_string())
    }

    fn document_fields(&self) -> Vec<String> {
        vec![
            "id".to_string(),
            "subject".to_string(),
            "status".to_string(),
            "opened_at".to_string(),
        ]
    }

    fn key(&self) -> Value {
        json!(self.id)
    }

    fn attribute(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "subject" => Some(self.subject.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "opened_at" => self.opened_at.map(FieldValue::from),
            _ => None,
        }
    }
}

/// Record embedded in its parent ticket's documents.
#[derive(Debug, Clone, Default)]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub ticket: Option<Ticket>,
}

impl Comment {
    pub fn new(id: u64, body: &str, ticket: Ticket) -> Self {
        Self {
            id,
            body: body.to_string(),
            ticket: Some(ticket),
        }
    }
}

impl Searchable for Comment {
    fn search_index(&self) -> String {
        "Ticket/comments".to_string()
    }

    fn search_type(&self) -> String {
        "comment".to_string()
    }

    fn default_search_field(&self) -> Option<String> {
        Some("body".to_string())
    }

    fn document_fields(&self) -> Vec<String> {
        vec!["id".to_string(), "body".to_string()]
    }

    fn key(&self) -> Value {
        json!(self.id)
    }

    fn attribute(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "body" => Some(self.body.as_str().into()),
            _ => None,
        }
    }

    fn parent(&self) -> Option<Box<dyn Searchable>> {
        self.ticket
            .clone()
            .map(|ticket| Box::new(ticket) as Box<dyn Searchable>)
    }
}

/// Record with caller-chosen metadata, for failure-path tests.
#[derive(Debug, Clone, Default)]
pub struct Custom {
    pub index: String,
    pub doc_type: String,
    pub id: u64,
}

impl Custom {
    pub fn new(index: &str, doc_type: &str, id: u64) -> Self {
        Self {
            index: index.to_string(),
            doc_type: doc_type.to_string(),
            id,
        }
    }
}

impl Searchable for Custom {
    fn search_index(&self) -> String {
        self.index.clone()
    }

    fn search_type(&self) -> String {
        self.doc_type.clone()
    }

    fn document_fields(&self) -> Vec<String> {
        vec!["id".to_string()]
    }

    fn key(&self) -> Value {
        json!(self.id)
    }

    fn attribute(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            _ => None,
        }
    }
}

/// Registry with the fixture types: `Ticket` searchable, `Attachment` opaque.
pub fn registry() -> Arc<RwLock<SearchableRegistry>> {
    let mut registry = SearchableRegistry::new();
    registry.register::<Ticket>("Ticket");
    registry.register_opaque("Attachment");
    Arc::new(RwLock::new(registry))
}

/// Fixed timestamp for deterministic document assertions.
pub fn opened_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
}
