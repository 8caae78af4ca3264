//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod client_connector_port;
mod client_registry_port;
mod database_health_port;
mod default_session_resolver;
mod messaging_client_port;
mod session_store;

#[cfg(test)]
pub use client_connector_port::MockClientConnectorPort;
pub use client_connector_port::ClientConnectorPort;
#[cfg(test)]
pub use client_registry_port::MockClientRegistryPort;
pub use client_registry_port::ClientRegistryPort;
#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::DatabaseHealthPort;
#[cfg(test)]
pub use default_session_resolver::MockDefaultSessionResolver;
pub use default_session_resolver::DefaultSessionResolver;
#[cfg(test)]
pub use messaging_client_port::MockMessagingClientPort;
pub use messaging_client_port::MessagingClientPort;
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::SessionStore;
