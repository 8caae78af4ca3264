//! Session database settings

use serde::{Deserialize, Serialize};

/// Path that selects an in-memory SQLite database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Where linked sessions are stored
///
/// Missing keys fall back to [`DatabaseConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, or `:memory:`
    pub path: String,
    /// Pool size for file databases
    pub max_connections: u32,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "wadesk.db".to_string(),
            max_connections: 5,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Sessions live only as long as the process
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }
}
