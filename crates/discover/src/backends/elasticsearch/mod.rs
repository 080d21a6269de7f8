//! Elasticsearch backend.
//!
//! Implements the [`SearchClient`](crate::core::SearchClient) capability over
//! the official `elasticsearch` client. Connection configuration lives here;
//! everything above this module speaks only the capability trait.
//!
//! # Example
//!
//! ```ignore
//! use discover::backends::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
//!
//! let config = ElasticsearchConfig {
//!     nodes: vec!["http://localhost:9200".to_string()],
//!     ..Default::default()
//! };
//! let backend = ElasticsearchBackend::new(config)?;
//! ```

mod backend;
mod client;

pub use backend::{ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig};
