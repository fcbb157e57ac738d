//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every record
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full directive
    pub log_level: String,

    /// Whether to emit JSON formatted records
    pub json_logs: bool,

    /// Whether to write records to stdout at all
    pub console_output: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ftm-liquid-staking".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            console_output: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LS_SERVICE_NAME`: Service name (default: ftm-liquid-staking)
    /// - `LS_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `LS_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `LS_CONSOLE_OUTPUT`: Enable console output (default: true)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("LS_SERVICE_NAME")
                .unwrap_or_else(|_| "ftm-liquid-staking".to_string()),

            log_level: env::var("LS_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("LS_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),

            console_output: env::var("LS_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Same configuration with a different level.
    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }
}
