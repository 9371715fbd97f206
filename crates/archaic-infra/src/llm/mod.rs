//! LLM provider implementations.

pub mod groq;
