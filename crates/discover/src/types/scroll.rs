//! Scroll cursors and result pages.

use std::fmt;

use serde_json::Value;

/// Opaque server-issued token for an in-progress full-index scan.
///
/// A cursor is valid only for the lifetime the scan was opened with, and the
/// token is not guaranteed to be stable across pages: each page's returned
/// cursor must be used for the next fetch, and termination is signalled by an
/// empty page, never by comparing tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollCursor(String);

impl ScrollCursor {
    /// Wraps a raw cursor token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ScrollCursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for ScrollCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One matching document returned by a search or scan.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The document id.
    pub id: String,
    /// The stored `_source` payload.
    pub source: Value,
}

impl SearchHit {
    /// Creates a hit.
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

/// One page of an in-progress scan, with its continuation cursor.
#[derive(Debug, Clone)]
pub struct ScrollPage {
    /// Cursor for fetching the next page.
    pub cursor: ScrollCursor,
    /// Hits in this page. Empty means the scan is exhausted.
    pub hits: Vec<SearchHit>,
}

impl ScrollPage {
    /// Creates a page.
    pub fn new(cursor: ScrollCursor, hits: Vec<SearchHit>) -> Self {
        Self { cursor, hits }
    }

    /// Returns true when the scan is exhausted.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// The hits answered for a structured query.
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    /// Server-reported total number of matches, when available.
    pub total: Option<u64>,
    /// The matching documents.
    pub hits: Vec<SearchHit>,
}
