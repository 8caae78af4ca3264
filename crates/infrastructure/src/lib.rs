//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the SQLite session
//! store, the in-process client registry and the WhatsApp gateway adapter.
//! Also owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, DatabaseConfig, Environment, ServerConfig, TelemetryAppConfig, WhatsAppConfig,
};
pub use persistence::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, SqliteSessionStore};
pub use telemetry::{LogFormat, TelemetryError, init_telemetry};
