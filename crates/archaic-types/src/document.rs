//! Retrieved document types.

use serde::{Deserialize, Serialize};

/// A document returned from the knowledge collection for a query embedding.
///
/// Ephemeral, per-request: scored documents are joined into a context block
/// for the prompt and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// The document text included in the context block.
    pub text: String,
    /// Optional provenance label (filename, URL, section).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Cosine distance from the query embedding; lower is more similar.
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_document_skips_absent_source() {
        let doc = ScoredDocument {
            text: "beam".to_string(),
            source: None,
            distance: 0.1,
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("source"));
    }
}
