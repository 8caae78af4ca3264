//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Logging configuration
///
/// `RUST_LOG` takes precedence over `log_filter` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// Default `EnvFilter` directive
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info,tower_http=debug,sqlx=warn".to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}
