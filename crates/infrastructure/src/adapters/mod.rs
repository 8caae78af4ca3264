//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod client_registry;
mod whatsapp_adapter;

pub use client_registry::InMemoryClientRegistry;
pub use whatsapp_adapter::{WhatsAppClientAdapter, WhatsAppClientConnector};
