//! Chat turn types: the HTTP request/response shapes and the exchange
//! records held in session history.

use serde::{Deserialize, Serialize};

/// One completed conversation turn: the user's message paired with the
/// generated reply. Immutable once created; appended to its session's
/// history in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub user_text: String,
    pub bot_text: String,
}

impl Exchange {
    pub fn new(user_text: impl Into<String>, bot_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            bot_text: bot_text.into(),
        }
    }
}

/// Inbound chat turn request.
///
/// `session_id` is optional: when absent, the pipeline mints a fresh
/// identifier and returns it in the response so the caller can continue
/// the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Outbound chat turn response.
///
/// `session_id` is always present (echoed or newly assigned).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_without_session_id() {
        let json = r#"{"message":"What is a cantilever?"}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.message, "What is a cantilever?");
        assert!(request.session_id.is_none());
    }

    #[test]
    fn test_chat_request_with_null_session_id() {
        let json = r#"{"message":"hello","session_id":null}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert!(request.session_id.is_none());
    }

    #[test]
    fn test_chat_response_serializes_both_fields() {
        let response = ChatResponse {
            response: "A cantilever is...".to_string(),
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["response"], "A cantilever is...");
        assert_eq!(json["session_id"], "abc");
    }

    #[test]
    fn test_exchange_roundtrip() {
        let exchange = Exchange::new("q", "a");
        let json = serde_json::to_string(&exchange).unwrap();
        let parsed: Exchange = serde_json::from_str(&json).unwrap();
        assert_eq!(exchange, parsed);
    }
}
