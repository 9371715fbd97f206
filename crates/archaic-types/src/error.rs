use thiserror::Error;

use crate::llm::LlmError;

/// Errors from embedding text into vectors.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model failed to load: {0}")]
    ModelLoad(String),

    #[error("embedding inference failed: {0}")]
    Inference(String),
}

/// Errors from querying the knowledge collection.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("knowledge collection '{0}' not found")]
    CollectionMissing(String),

    #[error("vector store error: {0}")]
    Store(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from a chat turn through the RAG pipeline.
///
/// `EmptyMessage` is user-correctable (HTTP 400); the rest are downstream
/// failures surfaced as-is (HTTP 500). There is no `UnknownSession` variant:
/// absent sessions are silently created.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("message field is required")]
    EmptyMessage,

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_error_display() {
        let err = RetrievalError::CollectionMissing("architect_knowledge".to_string());
        assert_eq!(
            err.to_string(),
            "knowledge collection 'architect_knowledge' not found"
        );
    }

    #[test]
    fn test_pipeline_error_wraps_embedding() {
        let err: PipelineError = EmbeddingError::Inference("bad input".to_string()).into();
        assert!(err.to_string().contains("bad input"));
        assert!(matches!(err, PipelineError::Embedding(_)));
    }

    #[test]
    fn test_pipeline_error_wraps_completion() {
        let err: PipelineError = LlmError::AuthenticationFailed.into();
        assert!(matches!(err, PipelineError::Completion(_)));
    }

    #[test]
    fn test_empty_message_display() {
        assert_eq!(
            PipelineError::EmptyMessage.to_string(),
            "message field is required"
        );
    }
}
