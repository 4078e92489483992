//! # Form Telemetry
//!
//! Structured logging for the field state workspace.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use form_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Field transitions are now logged
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `field-state` | Service name in the startup line |
//! | `FORM_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `FORM_CONSOLE_OUTPUT` | `true` | Emit to stdout |
//! | `FORM_JSON_LOGS` | `false` | JSON instead of pretty output |

mod config;
mod logging;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_LOG_LEVEL, DEFAULT_SERVICE_NAME};
pub use tracing_setup::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global logging subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_telemetry(config: TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(&config)
}

/// Convenience macro for creating a span scoped to one field.
///
/// # Example
///
/// ```rust,ignore
/// let _span = field_span!("validate", path = field.identifier()).entered();
/// ```
#[macro_export]
macro_rules! field_span {
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}
