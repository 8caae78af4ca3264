//! Tracing subscriber initialization

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ServerConfig, TelemetryAppConfig};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl From<&ServerConfig> for LogFormat {
    fn from(server: &ServerConfig) -> Self {
        if server.json_logs() {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Build the event filter, preferring `RUST_LOG` over the configured directive
pub fn build_filter(config: &TelemetryAppConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| TelemetryError::Filter(format!("{}: {e}", config.log_filter))),
    }
}

/// Initialize the global subscriber
///
/// Fails if a subscriber is already installed.
pub fn init_telemetry(
    config: &TelemetryAppConfig,
    format: LogFormat,
) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(?format, "Logging initialized");
    Ok(())
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Configured filter directive does not parse
    #[error("Invalid log filter: {0}")]
    Filter(String),
}
