// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama provider adapter for the fixroute classifier.
//!
//! Talks to a local Ollama daemon: the model is pulled once at startup and
//! each prompt is sent as a single-turn, non-streaming chat.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use fixroute_config::model::ProviderConfig;
use fixroute_core::{
    answer_after_marker, FixrouteError, HealthStatus, PluginAdapter, ProviderAdapter,
};
use tracing::{debug, info};

use crate::client::OllamaClient;
use crate::types::{ChatMessage, ChatOptions, ChatRequest};

/// Ollama provider implementing [`ProviderAdapter`].
pub struct OllamaProvider {
    client: OllamaClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OllamaProvider {
    /// Creates a provider from the `[provider]` section.
    ///
    /// No request is made; call [`ProviderAdapter::initialize`] to pull the model.
    pub fn new(config: &ProviderConfig) -> Result<Self, FixrouteError> {
        let client = OllamaClient::new(
            config.resolved_base_url(),
            Duration::from_secs(config.timeout_secs),
        )?;
        let model = config.resolved_model();

        info!(
            model = model.as_str(),
            base_url = client.base_url(),
            "Ollama provider created"
        );

        Ok(Self {
            client,
            model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn chat_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
            stream: false,
            options: ChatOptions {
                num_predict: self.max_tokens,
                temperature: self.temperature,
            },
        }
    }
}

/// Compares model references the way the daemon resolves them: a name
/// without a tag means `:latest`.
fn same_model(listed: &str, configured: &str) -> bool {
    fn with_tag(name: &str) -> std::borrow::Cow<'_, str> {
        if name.contains(':') {
            name.into()
        } else {
            format!("{name}:latest").into()
        }
    }
    with_tag(listed) == with_tag(configured)
}

#[async_trait]
impl PluginAdapter for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    /// Healthy when the daemon answers and the model is present locally.
    async fn health_check(&self) -> Result<HealthStatus, FixrouteError> {
        match self.client.tags().await {
            Ok(tags) => {
                if tags.models.iter().any(|m| same_model(&m.name, &self.model)) {
                    Ok(HealthStatus::Healthy)
                } else {
                    Ok(HealthStatus::Degraded(format!(
                        "model {} is not pulled",
                        self.model
                    )))
                }
            }
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl ProviderAdapter for OllamaProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn initialize(&self) -> Result<(), FixrouteError> {
        info!(model = self.model.as_str(), "pulling model");
        let response = self
            .client
            .pull(&self.model)
            .await
            .map_err(|e| match e {
                FixrouteError::Provider { message, .. } => FixrouteError::ModelUnavailable {
                    model: self.model.clone(),
                    message,
                },
                other => other,
            })?;

        if response.status != "success" {
            return Err(FixrouteError::ModelUnavailable {
                model: self.model.clone(),
                message: format!("pull finished with status `{}`", response.status),
            });
        }

        info!(model = self.model.as_str(), "model ready");
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String, FixrouteError> {
        let response = self.client.chat(&self.chat_request(prompt)).await?;
        let message = response.message.ok_or_else(|| FixrouteError::Provider {
            message: "Ollama response had no message".into(),
            source: None,
        })?;

        let answer = answer_after_marker(&message.content);
        debug!(
            model = response.model.as_deref().unwrap_or(self.model.as_str()),
            output = message.content.as_str(),
            answer,
            "generation complete"
        );
        Ok(answer.to_string())
    }
}
