//! Application services - Use case implementations

mod health_service;
mod number_validation_service;
mod session_resolver;
mod session_service;

pub use health_service::{HealthConfig, HealthReport, HealthService, ServiceHealth};
pub use number_validation_service::NumberValidationService;
pub use session_resolver::StoreDefaultSessionResolver;
pub use session_service::{SessionService, StartAllReport};
