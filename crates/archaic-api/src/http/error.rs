//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use archaic_types::error::PipelineError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat pipeline errors.
    Pipeline(PipelineError),
    /// Generic internal error.
    Internal(String),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Pipeline(PipelineError::EmptyMessage) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "message field is required".to_string(),
            ),
            AppError::Pipeline(PipelineError::Embedding(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "EMBEDDING_ERROR",
                e.to_string(),
            ),
            AppError::Pipeline(PipelineError::Retrieval(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "RETRIEVAL_ERROR",
                e.to_string(),
            ),
            AppError::Pipeline(PipelineError::Completion(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMPLETION_ERROR",
                e.to_string(),
            ),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archaic_types::llm::LlmError;

    #[test]
    fn test_empty_message_maps_to_400() {
        let response = AppError::Pipeline(PipelineError::EmptyMessage).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_completion_error_maps_to_500() {
        let err = AppError::Pipeline(PipelineError::Completion(LlmError::Provider {
            message: "upstream failure".to_string(),
        }));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_retrieval_error_maps_to_500() {
        let err = AppError::Pipeline(PipelineError::Retrieval(
            archaic_types::error::RetrievalError::CollectionMissing("architect_knowledge".to_string()),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
