//! Application state shared across handlers

use std::sync::Arc;

use application::{HealthService, NumberValidationService, SessionService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Contact number validation through the default session
    pub number_validation: Arc<NumberValidationService>,
    /// Session management and connection lifecycle
    pub session_service: Arc<SessionService>,
    /// Readiness checks
    pub health_service: Arc<HealthService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.config.environment())
            .finish_non_exhaustive()
    }
}
