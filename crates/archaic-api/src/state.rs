//! Application state wiring the pipeline together.
//!
//! The pipeline is generic over embedder/store/provider traits, but AppState
//! pins it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;

use archaic_core::pipeline::RagPipeline;
use archaic_core::session::store::SessionStore;
use archaic_infra::config::{load_config, resolve_data_dir, resolve_vector_store_path};
use archaic_infra::llm::groq::GroqProvider;
use archaic_infra::vector::embedder::FastEmbedder;
use archaic_infra::vector::knowledge::LanceKnowledgeStore;
use archaic_infra::vector::lance::LanceVectorStore;

/// Concrete pipeline type pinned to the infra implementations.
pub type ConcretePipeline = RagPipeline<FastEmbedder, LanceKnowledgeStore, GroqProvider>;

/// Shared application state used by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ConcretePipeline>,
}

impl AppState {
    /// Initialize the application state: load config, open the knowledge
    /// collection, load the embedding model, wire the pipeline.
    pub async fn init(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(resolve_data_dir);
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let api_key = std::env::var("GROQ_API_KEY")
            .map(SecretString::from)
            .context("GROQ_API_KEY environment variable is not set")?;
        let llm = GroqProvider::new(&api_key);

        let embedder = FastEmbedder::new().context("failed to load embedding model")?;

        let vector_path = resolve_vector_store_path(&config, &data_dir);
        let vector_store = LanceVectorStore::new(vector_path)
            .await
            .context("failed to open vector store")?;
        let documents = LanceKnowledgeStore::open(&vector_store, &config.collection)
            .await
            .with_context(|| format!("failed to open collection '{}'", config.collection))?;

        let sessions = Arc::new(SessionStore::new(config.sessions.clone()));
        let pipeline = RagPipeline::new(config.pipeline, sessions, embedder, documents, llm);

        Ok(Self {
            pipeline: Arc::new(pipeline),
        })
    }
}
