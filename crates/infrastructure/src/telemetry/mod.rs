//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber with text or JSON output.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryError, build_filter, init_telemetry};
