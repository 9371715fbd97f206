//! Service info endpoint.

use axum::Json;

/// GET / — service identification for smoke tests and load balancers.
pub async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "AI Architect Chatbot API is running"
    }))
}
