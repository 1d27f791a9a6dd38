pub mod config;
pub mod error;

pub use config::{ApiConfig, Config, Language, StorageConfig, UiConfig, Units};
pub use error::{AppError, ConfigError, FetchError, StorageError};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Logs go to stderr so the rendered panel on stdout stays readable.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("zipwx core initialized");
    Ok(())
}
