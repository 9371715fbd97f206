//! Chat endpoint.
//!
//! POST /chat
//!
//! Runs one retrieval-augmented chat turn: embed the message, query the
//! knowledge collection, assemble the prompt with session history, call the
//! completion service, record the exchange. The whole turn is wrapped in a
//! GenAI span following the OTel semantic conventions.

use axum::extract::State;
use axum::Json;
use tracing::Instrument;

use archaic_observe::genai_attrs;
use archaic_types::chat::{ChatRequest, ChatResponse};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /chat — one retrieval-augmented chat turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let config = state.pipeline.config();

    let span = tracing::info_span!(
        "chat",
        { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_CHAT,
        { genai_attrs::GEN_AI_PROVIDER_NAME } = genai_attrs::PROVIDER_GROQ,
        { genai_attrs::GEN_AI_REQUEST_MODEL } = config.model.as_str(),
        { genai_attrs::GEN_AI_REQUEST_TEMPERATURE } = config.temperature,
        { genai_attrs::GEN_AI_REQUEST_MAX_TOKENS } = config.max_tokens,
    );

    let response = state.pipeline.handle_turn(body).instrument(span).await?;

    Ok(Json(response))
}
