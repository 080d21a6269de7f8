//! Document payloads written to the search store.

use serde_json::{Map, Value};

use crate::core::record::{FieldValue, Searchable};

/// Textual form for timestamp fields in stored documents.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The flattened field map persisted in the store for one record snapshot.
///
/// A document is recomputed from the record on every save and discarded after
/// use; it is never cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Builds the document from the record's declared document fields.
    ///
    /// Fields the record cannot produce a value for are stored as explicit
    /// nulls, so the stored document always carries every declared field.
    pub fn from_record(record: &dyn Searchable) -> Self {
        let mut fields = Map::new();
        for name in record.document_fields() {
            let value = record
                .attribute(&name)
                .map(render_field)
                .unwrap_or(Value::Null);
            fields.insert(name, value);
        }
        Self { fields }
    }

    /// Ensures the document carries the record's identity key. A child
    /// document without its key could never be matched on a later save.
    pub fn with_identity(mut self, record: &dyn Searchable) -> Self {
        let key_name = record.key_name();
        if !self.fields.contains_key(&key_name) {
            self.fields.insert(key_name, record.key());
        }
        self
    }

    /// Returns the value of one field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Number of fields in the document.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the document carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the document into the JSON object sent to the store.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

fn render_field(value: FieldValue) -> Value {
    match value {
        FieldValue::Json(value) => value,
        FieldValue::Timestamp(ts) => Value::String(ts.format(TIMESTAMP_FORMAT).to_string()),
    }
}
