//! The retrieval-then-generation pipeline.
//!
//! One operation: [`RagPipeline::handle_turn`]. Each turn embeds the message,
//! queries the knowledge collection, assembles a prompt from retrieved context
//! plus recent session history, invokes the completion service, records the
//! exchange, and returns the answer with its session id.
//!
//! The session is mutated only after every fallible call has succeeded, so a
//! partial failure never corrupts history. No retries, no rollback: a single
//! downstream failure surfaces immediately to the caller.

use std::sync::Arc;

use tracing::{debug, warn};

use archaic_types::chat::{ChatRequest, ChatResponse, Exchange};
use archaic_types::config::PipelineConfig;
use archaic_types::error::PipelineError;
use archaic_types::llm::CompletionRequest;

use crate::llm::provider::LlmProvider;
use crate::prompt;
use crate::retrieval::embedder::Embedder;
use crate::retrieval::store::DocumentStore;
use crate::session::store::SessionStore;

/// Orchestrates one chat turn over the three external collaborators.
///
/// Generic over the collaborator traits to maintain clean architecture
/// (archaic-core never depends on archaic-infra). The embedder, document
/// store, and provider are built once at startup and shared read-only;
/// the session store is the only mutable state.
pub struct RagPipeline<E: Embedder, D: DocumentStore, L: LlmProvider> {
    config: PipelineConfig,
    sessions: Arc<SessionStore>,
    embedder: E,
    documents: D,
    llm: L,
}

impl<E: Embedder, D: DocumentStore, L: LlmProvider> RagPipeline<E, D, L> {
    pub fn new(
        config: PipelineConfig,
        sessions: Arc<SessionStore>,
        embedder: E,
        documents: D,
        llm: L,
    ) -> Self {
        Self {
            config,
            sessions,
            embedder,
            documents,
            llm,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Process one chat turn end to end.
    ///
    /// An empty (or whitespace-only) message fails before any session is
    /// created or any external call is made.
    pub async fn handle_turn(
        &self,
        request: ChatRequest,
    ) -> Result<ChatResponse, PipelineError> {
        if request.message.trim().is_empty() {
            return Err(PipelineError::EmptyMessage);
        }

        let session_id = self.sessions.get_or_create(request.session_id.as_deref());

        let embedding = self.embedder.embed(&request.message).await?;

        let documents = match self.documents.query(&embedding, self.config.retrieval_k).await {
            Ok(documents) => documents,
            Err(err) if self.config.degraded_retrieval => {
                warn!(session_id = %session_id, error = %err, "retrieval failed, degrading to context-free generation");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        let context = prompt::join_context(&documents);
        let history = self.sessions.recent(&session_id, self.config.history_window);

        debug!(
            session_id = %session_id,
            retrieved = documents.len(),
            history = history.len(),
            "assembling completion request"
        );

        let completion_request = CompletionRequest {
            model: self.config.model.clone(),
            messages: prompt::build_messages(
                &self.config.system_prompt,
                &history,
                &context,
                &request.message,
            ),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            top_p: Some(self.config.top_p),
            stream: false,
        };

        let completion = self.llm.complete(&completion_request).await?;

        // The only mutation of the turn; everything fallible is behind us.
        self.sessions.append(
            &session_id,
            Exchange::new(request.message, completion.content.clone()),
        );

        Ok(ChatResponse {
            response: completion.content,
            session_id,
        })
    }
}
