//! HTTP request handlers

pub mod contacts;
pub mod health;
pub mod sessions;
