//! Configuration types for the Archaic backend.
//!
//! The three near-identical scripts this service replaces differed only in
//! embedding model, history window, retrieval count, and system prompt text.
//! Those knobs are collapsed into [`PipelineConfig`]; session growth bounds
//! live in [`SessionLimits`]. All fields have serde defaults so a partial
//! `config.toml` parses cleanly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default system prompt governing answer policy and formatting.
///
/// The assistant answers strictly from retrieved context when it suffices,
/// falls back to general knowledge only for architecture, civil engineering,
/// construction, and basic greetings, and politely declines everything else.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a knowledgeable assistant for architecture, engineering, and construction (AEC) topics.

Rules:
1. If the provided context contains enough information to answer the question, use only that context.
2. If the context is missing or insufficient, answer from your own knowledge, but only on architecture, civil engineering, construction, and basic greetings.
3. Politely decline questions outside these domains.
4. Never invent facts that are absent from the provided context.

Formatting:
- Separate paragraphs with blank lines.
- Wrap small headings in double asterisks (**like this**).
- Wrap large headings in single asterisks (*like this*).

Be clear, concise, and professional in all responses.";

/// Top-level service configuration, loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchaicConfig {
    /// Filesystem path of the LanceDB vector store.
    /// Defaults to `{data_dir}/vector_store` when unset.
    #[serde(default)]
    pub vector_store_path: Option<PathBuf>,

    /// Name of the pre-existing knowledge collection (table) to query.
    /// Populating it is out of scope for this service.
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub sessions: SessionLimits,
}

fn default_collection() -> String {
    "architect_knowledge".to_string()
}

impl Default for ArchaicConfig {
    fn default() -> Self {
        Self {
            vector_store_path: None,
            collection: default_collection(),
            pipeline: PipelineConfig::default(),
            sessions: SessionLimits::default(),
        }
    }
}

/// Generation and retrieval parameters for the RAG pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Completion model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Number of prior exchanges included in each prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Number of documents fetched per query.
    #[serde(default = "default_retrieval_k")]
    pub retrieval_k: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// When true, a retrieval failure degrades to context-free generation
    /// instead of aborting the turn.
    #[serde(default)]
    pub degraded_retrieval: bool,

    /// Governing instruction text for the completion service.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_model() -> String {
    "mistral-saba-24b".to_string()
}

fn default_history_window() -> usize {
    8
}

fn default_retrieval_k() -> usize {
    3
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_top_p() -> f32 {
    1.0
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            history_window: default_history_window(),
            retrieval_k: default_retrieval_k(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            degraded_retrieval: false,
            system_prompt: default_system_prompt(),
        }
    }
}

/// Growth bounds for the in-process session table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLimits {
    /// Maximum live sessions; creating one past this evicts the
    /// least-recently-active session.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Maximum exchanges retained per session; the oldest is dropped
    /// when exceeded.
    #[serde(default = "default_max_exchanges")]
    pub max_exchanges: usize,
}

fn default_max_sessions() -> usize {
    1024
}

fn default_max_exchanges() -> usize {
    64
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            max_exchanges: default_max_exchanges(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.model, "mistral-saba-24b");
        assert_eq!(config.history_window, 8);
        assert_eq!(config.retrieval_k, 3);
        assert!((config.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 1024);
        assert!((config.top_p - 1.0).abs() < f32::EPSILON);
        assert!(!config.degraded_retrieval);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml = r#"
            collection = "custom_knowledge"

            [pipeline]
            history_window = 4
            retrieval_k = 2
        "#;
        let config: ArchaicConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.collection, "custom_knowledge");
        assert_eq!(config.pipeline.history_window, 4);
        assert_eq!(config.pipeline.retrieval_k, 2);
        // Everything unspecified falls back to defaults
        assert_eq!(config.pipeline.model, "mistral-saba-24b");
        assert_eq!(config.sessions.max_sessions, 1024);
        assert!(config.vector_store_path.is_none());
    }

    #[test]
    fn test_empty_toml_is_fully_defaulted() {
        let config: ArchaicConfig = toml::from_str("").unwrap();
        assert_eq!(config.collection, "architect_knowledge");
        assert_eq!(config.sessions.max_exchanges, 64);
    }

    #[test]
    fn test_session_limits_defaults() {
        let limits = SessionLimits::default();
        assert_eq!(limits.max_sessions, 1024);
        assert_eq!(limits.max_exchanges, 64);
    }
}
