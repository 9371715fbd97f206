//! Configuration loader for Archaic.
//!
//! Reads `config.toml` from the data directory (`~/.archaic/` in production)
//! and deserializes it into [`ArchaicConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use archaic_types::config::ArchaicConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ArchaicConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> ArchaicConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ArchaicConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ArchaicConfig::default();
        }
    };

    match toml::from_str::<ArchaicConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ArchaicConfig::default()
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `ARCHAIC_DATA_DIR` environment variable
/// 2. Platform-specific data directory (e.g., `~/.archaic` on macOS/Linux)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ARCHAIC_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".archaic");
    }

    // Last resort: current directory
    PathBuf::from(".archaic")
}

/// Resolve the vector store path.
///
/// Uses the configured `vector_store_path` when present, otherwise
/// `{data_dir}/vector_store`.
pub fn resolve_vector_store_path(config: &ArchaicConfig, data_dir: &Path) -> PathBuf {
    config
        .vector_store_path
        .clone()
        .unwrap_or_else(|| data_dir.join("vector_store"))
}
