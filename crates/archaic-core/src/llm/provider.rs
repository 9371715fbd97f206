//! LlmProvider trait definition.
//!
//! The core abstraction over the hosted completion service. Uses RPITIT
//! (native async fn in traits, Rust 2024 edition). Implementations live
//! in archaic-infra (e.g., `GroqProvider`).

use archaic_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion service backends.
///
/// The pipeline treats the provider as `complete(messages, params) -> text`:
/// one request, one generated message, no streaming, no retries.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
