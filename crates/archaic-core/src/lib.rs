//! Business logic for the Archaic RAG backend.
//!
//! This crate defines the "ports" (collaborator traits) that the
//! infrastructure layer implements -- `Embedder`, `DocumentStore`,
//! `LlmProvider` -- plus the two pieces the service actually owns:
//! the session store and the retrieval-then-generation pipeline.
//! It depends only on `archaic-types` -- never on `archaic-infra` or
//! any database/IO crate.

pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod retrieval;
pub mod session;
