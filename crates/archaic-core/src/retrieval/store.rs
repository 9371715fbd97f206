//! Document store trait for knowledge retrieval.
//!
//! Defines the interface for nearest-neighbor search over the knowledge
//! collection. Implementations (e.g., LanceDB) live in archaic-infra.

use archaic_types::document::ScoredDocument;
use archaic_types::error::RetrievalError;

/// Trait for vector-indexed document retrieval.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait DocumentStore: Send + Sync {
    /// Return the `k` documents nearest to the query embedding, ordered by
    /// ascending distance. An empty result is a valid state, not an error.
    fn query(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ScoredDocument>, RetrievalError>> + Send;
}
