//! Retrieval ports: text embedding and vector document search.

pub mod embedder;
pub mod store;
