//! Integration tests for the logging system

use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};

#[test]
fn config_builder_accumulates_settings() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_filter("core_auth=debug")
        .with_target(false);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.filter.as_deref(), Some("core_auth=debug"));
    assert!(!config.display_target);
}

#[test]
fn init_is_single_shot() {
    // The global subscriber can only be installed once per process; this
    // test runs in its own integration-test binary for that reason.
    let config = LoggingConfig::default().with_format(LogFormat::Compact);
    init_logging(config.clone()).expect("first init succeeds");
    assert!(init_logging(config).is_err());
}
