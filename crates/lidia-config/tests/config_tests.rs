// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading and validation.

use lidia_config::{load_and_validate_str, ConfigError, LidiaConfig};

#[test]
fn defaults_without_any_file() {
    let config = load_and_validate_str("").expect("empty config should fall back to defaults");
    assert_eq!(config.agent.name, "lidia");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 5000);
    assert_eq!(
        config.groq.api_url,
        "https://api.groq.com/openai/v1/chat/completions"
    );
    assert_eq!(config.groq.model, "llama-3.3-70b-versatile");
    assert_eq!(config.groq.max_tokens, 800);
    assert_eq!(config.groq.timeout_secs, 30);
    assert!(config.groq.api_key.is_none());
    assert!(config.whatsapp.admin_numero.is_none());
    assert!(config.cleanup.enabled);
    assert_eq!(config.cleanup.interval_hours, 1);
    assert_eq!(config.cleanup.max_age_hours, 24);
}

#[test]
fn toml_overrides_defaults() {
    let toml = r#"
[server]
port = 8080

[groq]
api_key = "gsk_test"
model = "llama-3.1-8b-instant"

[whatsapp]
admin_numero = "556293977594"

[cleanup]
interval_hours = 6
max_age_hours = 48
"#;
    let config = load_and_validate_str(toml).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.groq.api_key.as_deref(), Some("gsk_test"));
    assert_eq!(config.groq.model, "llama-3.1-8b-instant");
    assert_eq!(config.whatsapp.admin_numero.as_deref(), Some("556293977594"));
    assert_eq!(config.cleanup.interval_hours, 6);
    assert_eq!(config.cleanup.max_age_hours, 48);
    // Untouched sections keep their defaults.
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.groq.max_tokens, 800);
}

#[test]
fn unknown_key_is_rejected_with_suggestion() {
    let toml = r#"
[groq]
api_kye = "gsk_test"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "api_kye" && suggestion.as_deref() == Some("api_key")
        )
    });
    assert!(found, "expected unknown-key diagnostic with suggestion, got {errors:?}");
}

#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_and_validate_str(toml).is_err());
}

#[test]
fn invalid_interval_fails_validation() {
    let toml = r#"
[cleanup]
interval_hours = 0
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("interval_hours"))));
}

#[test]
fn plain_toml_deserialization_honors_deny_unknown_fields() {
    let toml = r#"
[agent]
naem = "oops"
"#;
    assert!(toml::from_str::<LidiaConfig>(toml).is_err());
}
