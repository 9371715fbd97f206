//! HTTP/REST API layer for Archaic.
//!
//! Axum-based API with CORS support and request tracing. Successful chat
//! responses are plain JSON bodies; errors use the envelope format.

pub mod error;
pub mod handlers;
pub mod router;
