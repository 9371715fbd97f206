//! Vector database infrastructure for the knowledge collection.
//!
//! Provides LanceDB store management, the knowledge document store, and
//! fastembed-based local embedding generation. Arrow schemas define the
//! table structure.

pub mod embedder;
pub mod knowledge;
pub mod lance;
pub mod schema;
