//! Demonstrates logging setup for a backend host.
//!
//! Run with `cargo run -p core-runtime --example logging_demo`.

use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};

fn main() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_filter("info,core_auth=debug");
    init_logging(config).expect("logging initialized");

    tracing::info!("backend starting");
    tracing::debug!(target: "core_auth", "per-module debug output is enabled");
    tracing::warn!(profile = "alice", "example warning with structured fields");
}
