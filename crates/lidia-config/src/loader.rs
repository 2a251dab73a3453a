// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lidia.toml` > `~/.config/lidia/lidia.toml` >
//! `/etc/lidia/lidia.toml` with environment variable overrides via the
//! `LIDIA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LidiaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lidia/lidia.toml` (system-wide)
/// 3. `~/.config/lidia/lidia.toml` (user XDG config)
/// 4. `./lidia.toml` (local directory)
/// 5. `LIDIA_*` environment variables
pub fn load_config() -> Result<LidiaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LidiaConfig::default()))
        .merge(Toml::file("/etc/lidia/lidia.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lidia/lidia.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lidia.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<LidiaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LidiaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LidiaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LidiaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `LIDIA_GROQ_API_KEY` must map to
/// `groq.api_key`, not `groq.api.key`.
fn env_provider() -> Env {
    Env::prefixed("LIDIA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: LIDIA_GROQ_API_KEY -> "groq_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("groq_", "groq.", 1)
            .replacen("whatsapp_", "whatsapp.", 1)
            .replacen("cleanup_", "cleanup.", 1);
        mapped.into()
    })
}
