//! Backend implementations of the [`SearchClient`](crate::core::SearchClient)
//! capability.

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
