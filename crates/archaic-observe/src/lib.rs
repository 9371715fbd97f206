//! Observability for Archaic: tracing subscriber setup and OpenTelemetry
//! GenAI semantic convention constants.

pub mod genai_attrs;
pub mod tracing_setup;
