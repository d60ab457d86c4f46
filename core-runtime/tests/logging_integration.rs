//! Integration tests for logging system

use core_runtime::logging::{redact_if_sensitive, LogFormat, LogLevel, LoggingConfig};

#[test]
fn test_logging_configuration() {
    // Logging can only be initialized once per process, so only the builder is exercised here
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Debug)
        .with_filter("provider_onedrive=debug")
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.filter.as_deref(), Some("provider_onedrive=debug"));
    assert!(config.display_thread_info);
}

#[test]
fn test_pii_redaction_tokens() {
    assert_eq!(redact_if_sensitive("access_token", "EwB4A8l6BAAU"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("Authorization", "Bearer EwB4A8l6BAAU"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("client_secret", "s3cr3t"), "[REDACTED]");
}

#[test]
fn test_pii_redaction_emails() {
    let redacted = redact_if_sensitive("recipient", "bob@contoso.com");

    assert!(redacted.starts_with('b'));
    assert!(redacted.contains("[REDACTED]"));
    assert!(!redacted.contains("contoso.com"));
}

#[test]
fn test_pii_redaction_non_ascii_emails() {
    let redacted = redact_if_sensitive("recipient", "Ørjan@contoso.no");

    assert!(redacted.starts_with('Ø'));
    assert!(!redacted.contains("contoso"));
}

#[test]
fn test_pii_redaction_normal_values() {
    assert_eq!(redact_if_sensitive("item_id", "01BYE5RZ"), "01BYE5RZ");
    assert_eq!(redact_if_sensitive("name", "report.txt"), "report.txt");
}

#[test]
fn test_levels_are_ordered() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Warn < LogLevel::Error);
}
