//! # Logging & Tracing Infrastructure
//!
//! Configures the `tracing-subscriber` stack for the backend.
//!
//! ## Overview
//!
//! Hosts call [`init_logging`] once at startup. Filtering follows the usual
//! env-filter syntax, so per-module levels like
//! `core_auth=debug,core_runtime=info` work out of the box; the `RUST_LOG`
//! environment variable overrides the configured filter when set.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_filter("core_auth=debug");
//! init_logging(config).expect("logging initialized once");
//!
//! tracing::info!("backend starting");
//! ```

use crate::error::{Error, Result};
use tracing_subscriber::{filter::EnvFilter, fmt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    Pretty,
    /// Structured JSON format for machine parsing.
    Json,
    /// Compact single-line format for production.
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Filter directives, e.g. `"core_auth=debug"`. Defaults to `info`.
    pub filter: Option<String>,
    /// Display the target module in log lines.
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the filter directives.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable target display.
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Initialize the logging system.
///
/// Call once during application startup; a second call fails because the
/// global subscriber is already set.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    // RUST_LOG wins over the configured directives when present.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(env) => env,
        Err(_) => build_filter(&config)?,
    };

    let builder = fmt::fmt()
        .with_env_filter(filter)
        .with_target(config.display_target);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().finish().try_init(),
        LogFormat::Json => builder.json().finish().try_init(),
        LogFormat::Compact => builder.compact().finish().try_init(),
    };

    result.map_err(|e| Error::Internal(format!("failed to install subscriber: {e}")))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = config.filter.as_deref().unwrap_or("info");
    EnvFilter::try_new(directives)
        .map_err(|e| Error::Config(format!("invalid log filter '{directives}': {e}")))
}
