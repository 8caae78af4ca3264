//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `messenger`: WhatsApp gateway settings
//! - `telemetry`: log filtering

mod database;
mod messenger;
mod server;
mod telemetry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub use database::DatabaseConfig;
pub use messenger::WhatsAppConfig;
pub use server::ServerConfig;
pub use telemetry::TelemetryAppConfig;

/// Environment variable prefix, e.g. `WADESK_SERVER__PORT`
pub const ENV_PREFIX: &str = "WADESK";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed warnings
    #[default]
    Development,
    /// Production environment - strict validation
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// WhatsApp gateway configuration
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and `WADESK_*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, still honouring environment overrides
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.path", "wadesk.db")?
            .set_default("whatsapp.base_url", "http://localhost:8080")?
            // Load from file
            .add_source(file)
            // Override with environment variables (e.g., WADESK_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Effective environment (defaults to development)
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Problems worth surfacing at startup
    ///
    /// In production these are fatal, in development they are logged.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.whatsapp.access_token_str().is_none_or(str::is_empty) {
            warnings.push("whatsapp.access_token is not set; sessions cannot connect".to_string());
        }
        if self.server.cors_enabled && self.server.allowed_origins.is_empty() {
            warnings.push("CORS allows any origin".to_string());
        }
        warnings
    }
}
