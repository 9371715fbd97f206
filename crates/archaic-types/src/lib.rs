//! Shared domain types for Archaic.
//!
//! This crate contains the domain types used across the Archaic RAG backend:
//! chat requests/responses, exchanges, retrieved documents, LLM message shapes,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod document;
pub mod error;
pub mod llm;
