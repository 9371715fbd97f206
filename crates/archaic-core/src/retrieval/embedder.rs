//! Embedder trait for text-to-vector conversion.
//!
//! Defines the interface for embedding a query into a fixed-length vector
//! for similarity search. Implementations (e.g., fastembed local models)
//! live in archaic-infra.

use archaic_types::error::EmbeddingError;

/// Trait for converting text into an embedding vector.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector of `dimension()` floats.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// The model name used for embeddings (e.g., "all-MiniLM-L6-v2").
    fn model_name(&self) -> &str;

    /// The dimensionality of the output vectors.
    fn dimension(&self) -> usize;
}
