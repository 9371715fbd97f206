//! Prompt assembly for the completion service.
//!
//! Builds the ordered message list sent on each turn: one system message,
//! the recent exchanges expanded to user/assistant pairs, and a final user
//! message combining the retrieved context block with the question.

use archaic_types::chat::Exchange;
use archaic_types::document::ScoredDocument;
use archaic_types::llm::ChatMessage;

/// Join retrieved document texts into a single context block, separated by
/// blank lines. Zero documents yield an empty string (valid, not an error).
pub fn join_context(documents: &[ScoredDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Assemble the full message list for one turn.
///
/// Order: system prompt, then each prior exchange as a user message followed
/// by an assistant message (chronological), then the final user message with
/// the literal `Context:\n{context}\nQuestion: {message}` template.
pub fn build_messages(
    system_prompt: &str,
    history: &[Exchange],
    context: &str,
    message: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2 + history.len() * 2);
    messages.push(ChatMessage::system(system_prompt));

    for exchange in history {
        messages.push(ChatMessage::user(exchange.user_text.clone()));
        messages.push(ChatMessage::assistant(exchange.bot_text.clone()));
    }

    messages.push(ChatMessage::user(format!(
        "Context:\n{context}\nQuestion: {message}"
    )));

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use archaic_types::llm::MessageRole;

    fn doc(text: &str) -> ScoredDocument {
        ScoredDocument {
            text: text.to_string(),
            source: None,
            distance: 0.0,
        }
    }

    #[test]
    fn test_join_context_blank_line_separated() {
        let docs = vec![doc("first"), doc("second"), doc("third")];
        assert_eq!(join_context(&docs), "first\n\nsecond\n\nthird");
    }

    #[test]
    fn test_join_context_empty_is_empty_string() {
        assert_eq!(join_context(&[]), "");
    }

    #[test]
    fn test_build_messages_no_history() {
        let messages = build_messages("sys", &[], "some context", "what is a truss?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "sys");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(
            messages[1].content,
            "Context:\nsome context\nQuestion: what is a truss?"
        );
    }

    #[test]
    fn test_build_messages_expands_history_in_order() {
        let history = vec![Exchange::new("q1", "a1"), Exchange::new("q2", "a2")];
        let messages = build_messages("sys", &history, "", "q3");

        assert_eq!(messages.len(), 6);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "q1");
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[2].content, "a1");
        assert_eq!(messages[3].content, "q2");
        assert_eq!(messages[4].content, "a2");
        assert_eq!(messages[5].content, "Context:\n\nQuestion: q3");
    }

    #[test]
    fn test_empty_context_still_uses_template() {
        let messages = build_messages("sys", &[], "", "hello");
        assert_eq!(messages[1].content, "Context:\n\nQuestion: hello");
    }
}
