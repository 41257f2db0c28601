// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hugging Face provider adapter for the fixroute classifier.
//!
//! Runs a hosted text-generation pipeline: the model is looked up on the
//! Hub at startup and each prompt is a greedy, length-capped generation.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use fixroute_config::model::ProviderConfig;
use fixroute_core::{
    answer_after_marker, FixrouteError, HealthStatus, PluginAdapter, ProviderAdapter,
};
use tracing::{debug, info, warn};

use crate::client::HuggingFaceClient;
use crate::types::{GenerationParameters, GenerationRequest, InferenceOptions};

/// Hugging Face provider implementing [`ProviderAdapter`].
///
/// Token resolution order: `provider.api_key` -> `HF_TOKEN` -> anonymous.
pub struct HuggingFaceProvider {
    client: HuggingFaceClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl HuggingFaceProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, FixrouteError> {
        let token = config.resolved_api_key();
        if token.is_none() {
            warn!("no Hugging Face token configured, requests are anonymous and rate limited");
        }

        let client = HuggingFaceClient::new(
            config.resolved_base_url(),
            config.hub_url.clone(),
            token,
            Duration::from_secs(config.timeout_secs),
        )?;
        let model = config.resolved_model();

        info!(
            model = model.as_str(),
            inference_url = client.inference_url(),
            "Hugging Face provider created"
        );

        Ok(Self {
            client,
            model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn generation_request(&self, prompt: &str) -> GenerationRequest {
        GenerationRequest {
            inputs: prompt.to_string(),
            parameters: GenerationParameters {
                max_new_tokens: self.max_tokens,
                do_sample: self.temperature > 0.0,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        }
    }
}

/// Removes an echoed copy of `prompt` from the start of `generated`.
///
/// Some pipelines ignore `return_full_text` and send the prompt back.
pub fn strip_prompt_echo<'a>(generated: &'a str, prompt: &str) -> &'a str {
    generated.strip_prefix(prompt).unwrap_or(generated)
}

#[async_trait]
impl PluginAdapter for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, FixrouteError> {
        match self.client.model_info(&self.model).await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl ProviderAdapter for HuggingFaceProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn initialize(&self) -> Result<(), FixrouteError> {
        let info = self.client.model_info(&self.model).await?;
        match info.pipeline_tag.as_deref() {
            Some("text-generation") | None => {}
            Some(other) => warn!(
                model = self.model.as_str(),
                pipeline = other,
                "model is not tagged for text generation"
            ),
        }
        info!(
            model = info.name().unwrap_or(self.model.as_str()),
            authenticated = self.client.has_token(),
            "model found on Hub"
        );
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String, FixrouteError> {
        let outputs = self
            .client
            .generate(&self.model, &self.generation_request(prompt))
            .await?;

        let first = outputs.into_iter().next().ok_or_else(|| FixrouteError::Provider {
            message: "inference response contained no generations".into(),
            source: None,
        })?;

        let continuation = strip_prompt_echo(&first.generated_text, prompt);
        let text = answer_after_marker(continuation).to_string();
        debug!(output = text.as_str(), "generation complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixroute_config::Backend;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "HuggingFaceTB/SmolLM-360M-Instruct";

    fn config_for(server: &MockServer) -> ProviderConfig {
        ProviderConfig {
            backend: Backend::HuggingFace,
            base_url: Some(server.uri()),
            hub_url: server.uri(),
            api_key: Some("hf_test".into()),
            timeout_secs: 5,
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn echo_is_stripped_only_as_prefix() {
        assert_eq!(strip_prompt_echo("Q? QuoteRequest", "Q?"), " QuoteRequest");
        assert_eq!(strip_prompt_echo("QuoteRequest", "Q?"), "QuoteRequest");
        assert_eq!(strip_prompt_echo("BondRequest Q?", "Q?"), "BondRequest Q?");
    }

    #[test]
    fn sampling_follows_temperature() {
        let mut config = ProviderConfig {
            backend: Backend::HuggingFace,
            api_key: Some("hf_test".into()),
            ..ProviderConfig::default()
        };
        let greedy = HuggingFaceProvider::new(&config).unwrap();
        assert!(!greedy.generation_request("x").parameters.do_sample);

        config.temperature = 0.7;
        let sampled = HuggingFaceProvider::new(&config).unwrap();
        assert!(sampled.generation_request("x").parameters.do_sample);
        assert_eq!(sampled.model(), MODEL);
    }

    #[tokio::test]
    async fn initialize_rejects_unknown_model() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/models/nobody/nothing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "Repository not found"
            })))
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.model = Some("nobody/nothing".into());
        let provider = HuggingFaceProvider::new(&config).unwrap();

        match provider.initialize().await.unwrap_err() {
            FixrouteError::ModelUnavailable { model, .. } => assert_eq!(model, "nobody/nothing"),
            other => panic!("expected ModelUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn initialize_accepts_listed_model() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/models/{MODEL}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "modelId": MODEL,
                "pipeline_tag": "text-generation"
            })))
            .mount(&server)
            .await;

        let provider = HuggingFaceProvider::new(&config_for(&server)).unwrap();
        provider.initialize().await.unwrap();
        assert!(matches!(
            provider.health_check().await.unwrap(),
            HealthStatus::Healthy
        ));
    }

    #[tokio::test]
    async fn generate_sends_greedy_capped_request_and_strips_echo() {
        let server = MockServer::start().await;
        let prompt = "Input: 5 year paper available?\nAnswer with one word only:";
        Mock::given(method("POST"))
            .and(path(format!("/models/{MODEL}")))
            .and(body_partial_json(serde_json::json!({
                "inputs": prompt,
                "parameters": {
                    "max_new_tokens": 5,
                    "do_sample": false,
                    "return_full_text": false
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"generated_text": format!("{prompt} QuoteRequest")}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let provider = HuggingFaceProvider::new(&config_for(&server)).unwrap();
        assert_eq!(provider.generate(prompt).await.unwrap(), "QuoteRequest");
    }

    #[tokio::test]
    async fn empty_generation_list_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/models/{MODEL}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let provider = HuggingFaceProvider::new(&config_for(&server)).unwrap();
        let err = provider.generate("x").await.unwrap_err();
        assert!(err.to_string().contains("no generations"));
    }
}
