//! Persistence module
//!
//! SQLite-based storage for linked WhatsApp sessions.

pub mod async_connection;
mod database_health;
pub mod error;
pub mod session_store;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use error::map_sqlx_error;
pub use session_store::SqliteSessionStore;
