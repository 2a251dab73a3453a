// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as sampling parameter ranges and cleanup intervals.

use crate::diagnostic::ConfigError;
use crate::model::LidiaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LidiaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.groq.api_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "groq.api_url must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.groq.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "groq.temperature must be within 0.0..=2.0, got {}",
                config.groq.temperature
            ),
        });
    }

    if !(0.0..=1.0).contains(&config.groq.top_p) {
        errors.push(ConfigError::Validation {
            message: format!("groq.top_p must be within 0.0..=1.0, got {}", config.groq.top_p),
        });
    }

    if config.groq.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "groq.timeout_secs must be at least 1".to_string(),
        });
    }

    if !(1..=24).contains(&config.cleanup.interval_hours) {
        errors.push(ConfigError::Validation {
            message: format!(
                "cleanup.interval_hours must be within 1..=24, got {}",
                config.cleanup.interval_hours
            ),
        });
    }

    if config.cleanup.max_age_hours == 0 {
        errors.push(ConfigError::Validation {
            message: "cleanup.max_age_hours must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
