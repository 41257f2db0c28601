// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty model names, positive limits, and usable keyword lists.

use crate::diagnostic::ConfigError;
use crate::model::FixrouteConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FixrouteConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let provider = &config.provider;

    if let Some(model) = &provider.model
        && model.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "provider.model must not be empty".to_string(),
        });
    }

    if let Some(base_url) = &provider.base_url {
        let url = base_url.trim();
        if url.is_empty() {
            errors.push(ConfigError::Validation {
                message: "provider.base_url must not be empty".to_string(),
            });
        } else if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("provider.base_url `{url}` must start with http:// or https://"),
            });
        }
    }

    if provider.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "provider.max_tokens must be at least 1".to_string(),
        });
    }

    if provider.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "provider.timeout_secs must be at least 1".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&provider.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "provider.temperature must be between 0.0 and 2.0, got {}",
                provider.temperature
            ),
        });
    }

    if config.history.capacity == 0 {
        errors.push(ConfigError::Validation {
            message: "history.capacity must be at least 1".to_string(),
        });
    }

    for (section, list) in [
        ("keywords.quote", &config.keywords.quote),
        ("keywords.bond", &config.keywords.bond),
    ] {
        for (i, keyword) in list.iter().enumerate() {
            if keyword.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("{section}[{i}] must not be empty"),
                });
            }
        }
    }

    for (i, example) in config.prompt.examples.iter().enumerate() {
        if example.message.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("prompt.examples[{i}].message must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
