//! The Searchable record capability.
//!
//! Records are owned by the application's model layer; this crate only reads
//! them through the [`Searchable`] trait. The trait deliberately exposes the
//! minimum surface the search layer needs: index/type metadata, a stable
//! identity, and per-field attribute access.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A single field value exposed by a record for indexing.
///
/// Most values pass through as JSON. Points in time get their own variant so
/// the document builder can serialize them in the store's textual form (see
/// [`crate::types::TIMESTAMP_FORMAT`]).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// An arbitrary JSON payload.
    Json(Value),
    /// A point in time.
    Timestamp(DateTime<Utc>),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Json(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Json(Value::String(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Json(Value::Bool(value))
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// Capability implemented by any entity type that participates in search
/// integration.
///
/// An implementation describes where its documents live (`search_index`,
/// `search_type`), which fields are indexed (`document_fields`), and how the
/// record identifies itself (`key_name`, `key`). A record whose index is a
/// nested reference (`Parent/field`) must also expose its parent record
/// through [`Searchable::parent`].
pub trait Searchable: Send + Sync {
    /// The index (or nested reference) this record's documents live in.
    fn search_index(&self) -> String;

    /// The document type name for this record.
    fn search_type(&self) -> String;

    /// The field queried when a caller searches with a bare string.
    fn default_search_field(&self) -> Option<String> {
        None
    }

    /// Names of the fields to be indexed. A record with no document fields
    /// produces an empty document rather than an error.
    fn document_fields(&self) -> Vec<String>;

    /// Name of the identity field inside stored documents.
    fn key_name(&self) -> String {
        "id".to_string()
    }

    /// The record's identity value.
    fn key(&self) -> Value;

    /// Reads one attribute by field name. `None` means the record has no such
    /// attribute; the document builder stores an explicit null in that case.
    fn attribute(&self, field: &str) -> Option<FieldValue>;

    /// The parent record, for records whose index is a nested reference.
    fn parent(&self) -> Option<Box<dyn Searchable>> {
        None
    }
}

/// Derives a document type name from an index name by naive singularization.
///
/// Handles the two common English plural forms (`categories` -> `category`,
/// `tickets` -> `ticket`); anything else is returned unchanged. Implementors
/// with irregular names should spell out `search_type` themselves.
pub fn search_type_from_index(index: &str) -> String {
    if let Some(stem) = index.strip_suffix("ies") {
        return format!("{stem}y");
    }
    index.strip_suffix('s').unwrap_or(index).to_string()
}

/// Renders a record identity as the document id string used by the store.
pub fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
