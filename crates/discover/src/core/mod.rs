//! Core capability traits.
//!
//! - [`record`] - the [`Searchable`] capability implemented by domain records
//! - [`client`] - the [`SearchClient`] capability implemented by store backends

pub mod client;
pub mod record;

pub use client::SearchClient;
pub use record::{FieldValue, Searchable, key_to_string, search_type_from_index};
