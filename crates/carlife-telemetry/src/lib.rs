//! # CarLife Telemetry
//!
//! Logging bootstrap for registry deployments and test suites.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carlife_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Spans and events from every crate are now written out
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CARLIFE_LOG_LEVEL` | `RUST_LOG`, then `info` | Log filter |
//! | `CARLIFE_JSON_LOGS` | `false` (`true` in containers) | JSON lines output |
//! | `CARLIFE_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `CARLIFE_SERVICE_NAME` | `carlife-registry` | Service name on the root span |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Telemetry already initialized")]
    AlreadyInitialized,

    /// The log filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Install the global subscriber.
///
/// Returns a guard holding the service's root span; keep it alive for the
/// lifetime of the application.
///
/// # Errors
///
/// `InvalidFilter` for an unparseable `log_level`, `AlreadyInitialized` if a
/// subscriber was installed before.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::install(&config)?;

    let root = tracing::info_span!("service", name = %config.service_name);
    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        log_level = %config.log_level,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { root, config })
}

/// Install a subscriber suitable for `cargo test`, ignoring repeat calls.
pub fn init_test_tracing() {
    let _ = logging::install_test();
}

/// Guard that keeps the service root span alive.
pub struct TelemetryGuard {
    root: tracing::Span,
    config: TelemetryConfig,
}

impl TelemetryGuard {
    /// Root span of the service; enter it to tag events with the service name.
    #[must_use]
    pub fn root_span(&self) -> &tracing::Span {
        &self.root
    }

    /// Configuration the subscriber was installed with.
    #[must_use]
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.config.service_name, "Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span tagged with a record id.
///
/// # Example
///
/// ```rust,ignore
/// use carlife_telemetry::record_span;
///
/// let _span = record_span!("reindex", token_id = 7).entered();
/// ```
#[macro_export]
macro_rules! record_span {
    ($name:expr, token_id = $id:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name, token_id = %$id $(, $($field)*)?)
    };
}
