//! Logging system setup and configuration.
//!
//! Initializes tracing-subscriber with either human-readable or JSON output.

use crate::config::LoggingSettings;
use crate::error::HostError;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level` when set. `json_format`
/// forces JSON output regardless of `config.json_format`.
///
/// Fails when a global subscriber is already installed.
pub fn setup_logging(config: &LoggingSettings, json_format: bool) -> Result<(), HostError> {
    let log_level = config.level.as_str();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if json_format || config.json_format {
        registry
            .with(fmt::layer()
                .json()
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(true)
                .with_thread_names(true)
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer()
                .with_ansi(true)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(true)
                .with_thread_names(true)
            )
            .try_init()
    };
    result.map_err(|e| HostError::Logging(e.to_string()))?;

    info!("🔧 Logging initialized with level: {}", log_level);
    Ok(())
}

/// Logs the startup banner.
pub fn display_banner() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("UNK");
    info!("╔══════════════════════════════════════════╗");
    info!("║           🛢️  LUCKY BARREL HOST           ║");
    info!("║                 v{:<8}                ║", version);
    info!("╚══════════════════════════════════════════╝");
}
