//! Infrastructure layer for Archaic.
//!
//! Contains implementations of the collaborator traits defined in
//! `archaic-core`: a fastembed local embedder, a LanceDB-backed document
//! store over the knowledge collection, and a Groq completion provider,
//! plus the config file loader.

pub mod config;
pub mod llm;
pub mod vector;
