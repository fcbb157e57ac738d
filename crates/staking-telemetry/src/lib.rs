//! # Staking Telemetry
//!
//! Structured logging for the liquid staking core.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use staking_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LS_SERVICE_NAME` | `ftm-liquid-staking` | Service name attached to records |
//! | `LS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `LS_JSON_LOGS` | `false` | JSON records instead of human-readable lines |
//! | `LS_CONSOLE_OUTPUT` | `true` | Emit records to stdout |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, init_test_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Failed to initialize logging: {0}")]
    Init(String),

    /// The log filter could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
