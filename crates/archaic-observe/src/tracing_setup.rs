//! Tracing initialization for the archaic server.
//!
//! Structured logs are always on. When the server is started with `--otel`,
//! tracing spans are additionally bridged into OpenTelemetry with a stdout
//! span exporter, so the per-turn chat span (which carries the
//! [`crate::genai_attrs`] attributes) comes out as convention-compliant
//! GenAI telemetry without any extra instrumentation.
//!
//! `RUST_LOG` overrides the filter; without it the service's own crates log
//! at debug and dependencies at info.

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,archaic_core=debug,archaic_infra=debug,archaic_api=debug";

/// Tracer instrumentation scope name for exported spans.
const TRACER_NAME: &str = "archaic";

/// Holds the OTel tracer provider so [`shutdown_tracing`] can flush it.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global tracing subscriber.
///
/// The fmt layer emits one line per event plus a span-close line per chat
/// turn, which doubles as a cheap per-turn latency log. With `enable_otel`
/// the same spans are also exported through OpenTelemetry; the stdout
/// exporter is intended for local development and a single-binary deploy.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(enable_otel: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(env_filter()).with(
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE),
    );

    if enable_otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer(TRACER_NAME);

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .init();
    } else {
        registry.init();
    }

    Ok(())
}

/// Flush pending spans and shut down the OTel tracer provider.
///
/// No-op when `--otel` was not given. Called once before process exit.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
