//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `archaic-core` using fastembed's
//! AllMiniLML6V2 model (384 dimensions, the same all-MiniLM-L6-v2 family
//! used to populate the knowledge collection) with ONNX runtime inference.

use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use archaic_core::retrieval::embedder::Embedder;
use archaic_types::error::EmbeddingError;

/// Local embedding generator running all-MiniLM-L6-v2 via ONNX.
///
/// `TextEmbedding::embed` requires `&mut self`, so the model sits behind a
/// `Mutex`; embedding calls on concurrent turns serialize there. Inference
/// is CPU-bound and runs on the blocking thread pool.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

/// Model name reported by [`Embedder::model_name`].
const MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// all-MiniLM-L6-v2 output dimension.
const DIMENSION: usize = 384;

impl FastEmbedder {
    /// Load the embedding model.
    ///
    /// Downloads the ONNX weights on first use (cached afterwards); fails
    /// with `ModelLoad` when the model cannot be initialized.
    pub fn new() -> Result<Self, EmbeddingError> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false),
        )
        .map_err(|e| EmbeddingError::ModelLoad(e.to_string()))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

impl Embedder for FastEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let model = Arc::clone(&self.model);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| EmbeddingError::Inference("embedder mutex poisoned".to_string()))?;

            let mut vectors = model
                .embed(vec![text], None)
                .map_err(|e| EmbeddingError::Inference(e.to_string()))?;

            vectors
                .pop()
                .ok_or_else(|| EmbeddingError::Inference("model returned no vector".to_string()))
        })
        .await
        .map_err(|e| EmbeddingError::Inference(format!("embedding task failed: {e}")))?
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::schema::EMBEDDING_DIMENSION;

    #[test]
    fn test_dimension_matches_knowledge_schema() {
        assert_eq!(DIMENSION, EMBEDDING_DIMENSION as usize);
    }
}
