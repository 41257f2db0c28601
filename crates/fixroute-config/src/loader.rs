// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./fixroute.toml` > `~/.config/fixroute/fixroute.toml` > `/etc/fixroute/fixroute.toml`
//! with environment variable overrides via `FIXROUTE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use tracing::debug;

use crate::model::FixrouteConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/fixroute/fixroute.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "fixroute.toml";

/// Per-user configuration file under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("fixroute/fixroute.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fixroute/fixroute.toml` (system-wide)
/// 3. `~/.config/fixroute/fixroute.toml` (user XDG config)
/// 4. `./fixroute.toml` (local directory)
/// 5. `FIXROUTE_*` environment variables
pub fn load_config() -> Result<FixrouteConfig, figment::Error> {
    let user_path = user_config_path();
    debug!(
        system = SYSTEM_CONFIG_PATH,
        user = %user_path.display(),
        local = LOCAL_CONFIG_FILE,
        "merging configuration sources"
    );
    Figment::new()
        .merge(Serialized::defaults(FixrouteConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_path))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<FixrouteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixrouteConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FixrouteConfig, figment::Error> {
    debug!(path = %path.display(), "merging explicit configuration file");
    Figment::new()
        .merge(Serialized::defaults(FixrouteConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Sections that `FIXROUTE_<SECTION>_<KEY>` variables can address.
const ENV_SECTIONS: &[&str] = &["agent", "provider", "keywords", "prompt", "history"];

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `FIXROUTE_PROVIDER_MAX_TOKENS` must map to
/// `provider.max_tokens`, not `provider.max.tokens`.
fn env_provider() -> Env {
    Env::prefixed("FIXROUTE_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a prefix-stripped variable name such as `PROVIDER_BASE_URL` to its
/// dotted config path `provider.base_url`.
///
/// Env hands keys over in their original case, so the name is lowercased
/// before the section prefix is matched.
fn map_env_key(key: &str) -> String {
    let lower = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(field) = lower
            .strip_prefix(*section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{field}");
        }
    }
    lower
}
