// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter for the fixroute classifier.
//!
//! Targets local inference servers that expose `/v1/models` and
//! `/v1/chat/completions`.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use fixroute_config::model::ProviderConfig;
use fixroute_core::{FixrouteError, HealthStatus, PluginAdapter, ProviderAdapter};
use tracing::{debug, info};

use crate::client::OpenAiCompatClient;
use crate::types::{ChatCompletionRequest, ChatMessage};

/// OpenAI-compatible provider implementing [`ProviderAdapter`].
///
/// API key resolution order: `provider.api_key` -> `OPENAI_API_KEY` -> none.
pub struct OpenAiCompatProvider {
    client: OpenAiCompatClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiCompatProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, FixrouteError> {
        let client = OpenAiCompatClient::new(
            config.resolved_base_url(),
            config.resolved_api_key(),
            Duration::from_secs(config.timeout_secs),
        )?;
        let model = config.resolved_model();

        info!(
            model = model.as_str(),
            base_url = client.base_url(),
            "OpenAI-compatible provider created"
        );

        Ok(Self {
            client,
            model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn completion_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: Some(prompt.to_string()),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: false,
        }
    }

    async fn model_listed(&self) -> Result<bool, FixrouteError> {
        let models = self.client.list_models().await?;
        Ok(models.data.iter().any(|m| m.id == self.model))
    }
}

#[async_trait]
impl PluginAdapter for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, FixrouteError> {
        match self.model_listed().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Degraded(format!(
                "server does not serve {}",
                self.model
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn initialize(&self) -> Result<(), FixrouteError> {
        let listed = self.model_listed().await.map_err(|e| match e {
            FixrouteError::Provider { message, .. } => FixrouteError::ModelUnavailable {
                model: self.model.clone(),
                message,
            },
            other => other,
        })?;

        if !listed {
            return Err(FixrouteError::ModelUnavailable {
                model: self.model.clone(),
                message: format!("not listed by {}/models", self.client.base_url()),
            });
        }

        info!(model = self.model.as_str(), "model served");
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String, FixrouteError> {
        let response = self
            .client
            .chat_completion(&self.completion_request(prompt))
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| FixrouteError::Provider {
                message: "chat completion had no content".into(),
                source: None,
            })?;

        debug!(output = content.as_str(), "generation complete");
        Ok(content)
    }
}
