//! WhatsApp integration
//!
//! HTTP client for the WhatsApp gateway that backs each linked session.

pub mod client;

pub use client::{
    ContactStatus, ContactValidity, WhatsAppClient, WhatsAppClientConfig, WhatsAppError,
};
