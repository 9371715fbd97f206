//! Archaic REST API entry point.
//!
//! Binary name: `archaic`
//!
//! Parses CLI arguments, loads configuration, wires the RAG pipeline, then
//! starts the HTTP server.

mod http;
mod state;

use clap::Parser;

use state::AppState;

/// Retrieval-augmented chat backend for architecture, engineering, and
/// construction knowledge.
#[derive(Debug, Parser)]
#[command(name = "archaic", version, about)]
struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Data directory holding config.toml and the vector store.
    /// Defaults to `$ARCHAIC_DATA_DIR` or `~/.archaic`.
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,

    /// Export traces via OpenTelemetry in addition to structured logs.
    #[arg(long)]
    otel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    archaic_observe::tracing_setup::init_tracing(cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let state = AppState::init(cli.data_dir).await?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Archaic API listening on http://{addr}");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    archaic_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
