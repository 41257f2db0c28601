// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the fixroute classifier.

use thiserror::Error;

/// The primary error type used across provider adapters and the classifier.
#[derive(Debug, Error)]
pub enum FixrouteError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// LLM provider errors (HTTP failure, malformed response, unreachable backend).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The configured model could not be pulled, found, or loaded.
    #[error("model `{model}` unavailable: {message}")]
    ModelUnavailable { model: String, message: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FixrouteError {
    /// Short, stable name of the failure class, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FixrouteError::Config(_) => "config",
            FixrouteError::Provider { .. } => "provider",
            FixrouteError::ModelUnavailable { .. } => "model_unavailable",
            FixrouteError::Timeout { .. } => "timeout",
            FixrouteError::Internal(_) => "internal",
        }
    }

    /// Builds a [`FixrouteError::Provider`] from a message and an underlying error.
    pub fn provider<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FixrouteError::Provider {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
