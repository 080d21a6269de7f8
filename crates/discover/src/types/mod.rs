//! Core data types.
//!
//! - [`reference`] - parsed index identifiers, simple or nested
//! - [`document`] - the field map persisted for one record snapshot
//! - [`descriptor`] - versioned index generations behind a stable alias
//! - [`scroll`] - cursors and pages for full-index scans

pub mod descriptor;
pub mod document;
pub mod reference;
pub mod scroll;

pub use descriptor::IndexDescriptor;
pub use document::{Document, TIMESTAMP_FORMAT};
pub use reference::{IndexReference, NESTED_SEPARATOR, index_is_nested};
pub use scroll::{ScrollCursor, ScrollPage, SearchHit, SearchResponse};
