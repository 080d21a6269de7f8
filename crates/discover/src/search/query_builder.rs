//! Query DSL builder.
//!
//! Translates simplified query inputs — a bare string, a flat field map, or a
//! pre-built clause list — into the store's structured query body, resolving
//! nested index references along the way.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value, json};

use crate::core::client::SearchClient;
use crate::core::record::Searchable;
use crate::error::{DiscoverResult, ReferenceError};
use crate::search::registry::SearchableRegistry;
use crate::types::{IndexReference, SearchResponse};

/// A simplified query accepted by [`QueryBuilder::build`].
#[derive(Debug, Clone)]
pub enum QueryInput {
    /// Bare text, matched against the record's default search field.
    Text(String),
    /// Field-to-value pairs, each becoming a match clause.
    Fields(Map<String, Value>),
    /// A pre-structured clause list, passed through verbatim. Callers who
    /// supply one are assumed to have built the full clause set themselves.
    Clauses(Vec<Value>),
}

impl From<&str> for QueryInput {
    fn from(text: &str) -> Self {
        QueryInput::Text(text.to_string())
    }
}

impl From<String> for QueryInput {
    fn from(text: String) -> Self {
        QueryInput::Text(text)
    }
}

impl From<Map<String, Value>> for QueryInput {
    fn from(fields: Map<String, Value>) -> Self {
        QueryInput::Fields(fields)
    }
}

impl From<Vec<Value>> for QueryInput {
    fn from(clauses: Vec<Value>) -> Self {
        QueryInput::Clauses(clauses)
    }
}

/// A complete structured query ready to be sent to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// The index to search.
    pub index: String,
    /// The document type to search.
    pub doc_type: String,
    /// The query body.
    pub body: Value,
}

/// Builds structured queries from simplified inputs.
pub struct QueryBuilder {
    client: Arc<dyn SearchClient>,
    registry: Arc<RwLock<SearchableRegistry>>,
}

impl QueryBuilder {
    /// Creates a builder over a store client and a type registry.
    pub fn new(client: Arc<dyn SearchClient>, registry: Arc<RwLock<SearchableRegistry>>) -> Self {
        Self { client, registry }
    }

    /// Builds the structured query for a record.
    ///
    /// For a record with a nested index, the match clauses are scoped under
    /// the nested field's path and wrapped in a `nested` query, and the outer
    /// request targets the parent's index and type.
    pub fn build(
        &self,
        record: &dyn Searchable,
        query: impl Into<QueryInput>,
    ) -> Result<SearchRequest, ReferenceError> {
        let reference = IndexReference::parse(&record.search_index());
        let clauses = self.structure_matches(record, &reference, query.into())?;

        let (index, doc_type, must) = if reference.is_nested() {
            let registry = self.registry.read();
            let parent = registry.parent_of(&reference)?;
            let (index, field) = registry.resolve_nested(&reference)?;
            let wrapper = json!({
                "nested": {
                    "path": field,
                    "query": {
                        "bool": {
                            "must": clauses,
                        },
                    },
                },
            });
            (index, parent.search_type(), wrapper)
        } else {
            (
                record.search_index(),
                record.search_type(),
                Value::Array(clauses),
            )
        };

        Ok(SearchRequest {
            index,
            doc_type,
            body: json!({
                "query": {
                    "bool": {
                        "must": must,
                    },
                },
            }),
        })
    }

    /// Normalizes the query into a list of match clauses.
    fn structure_matches(
        &self,
        record: &dyn Searchable,
        reference: &IndexReference,
        query: QueryInput,
    ) -> Result<Vec<Value>, ReferenceError> {
        // A clause list is the caller's own complete query.
        if let QueryInput::Clauses(clauses) = query {
            return Ok(clauses);
        }

        // Fields of a nested record live under the subdocument's path.
        let prefix = if reference.is_nested() {
            let (_, field) = self.registry.read().resolve_nested(reference)?;
            format!("{field}.")
        } else {
            String::new()
        };

        let clauses = match query {
            QueryInput::Text(text) => {
                // No validation of field presence here; a record without a
                // default search field yields an empty field name.
                let field = record.default_search_field().unwrap_or_default();
                vec![match_clause(format!("{prefix}{field}"), Value::String(text))]
            }
            QueryInput::Fields(fields) => fields
                .into_iter()
                .map(|(property, constraint)| {
                    let property = if property.contains('.') {
                        property
                    } else {
                        format!("{prefix}{property}")
                    };
                    match_clause(property, constraint)
                })
                .collect(),
            QueryInput::Clauses(_) => unreachable!("handled above"),
        };

        Ok(clauses)
    }

    /// Builds and executes the query, returning the store's hits.
    ///
    /// A bare string with a configured default search field is equivalent to
    /// the one-pair mapping form.
    pub async fn search(
        &self,
        record: &dyn Searchable,
        query: impl Into<QueryInput>,
    ) -> DiscoverResult<SearchResponse> {
        let query = match query.into() {
            QueryInput::Text(text) => match record.default_search_field() {
                Some(field) => {
                    let mut fields = Map::new();
                    fields.insert(field, Value::String(text));
                    QueryInput::Fields(fields)
                }
                None => QueryInput::Text(text),
            },
            other => other,
        };

        let request = self.build(record, query)?;
        let response = self
            .client
            .search(&request.index, &request.doc_type, request.body)
            .await?;
        Ok(response)
    }
}

fn match_clause(property: String, constraint: Value) -> Value {
    let mut inner = Map::new();
    inner.insert(property, constraint);
    json!({ "match": inner })
}
