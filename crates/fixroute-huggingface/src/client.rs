// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Hugging Face Hub and Inference APIs.

use std::time::Duration;

use fixroute_core::FixrouteError;
use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, GeneratedText, GenerationRequest, ModelInfo};

/// HTTP client for Hugging Face.
///
/// The Hub (`hub_url`) answers model metadata lookups; the inference
/// endpoint (`inference_url`) runs the text-generation pipeline.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: reqwest::Client,
    inference_url: String,
    hub_url: String,
    token: Option<String>,
    timeout: Duration,
    max_retries: u32,
}

impl HuggingFaceClient {
    pub fn new(
        inference_url: impl Into<String>,
        hub_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FixrouteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FixrouteError::provider("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            inference_url: inference_url.into().trim_end_matches('/').to_string(),
            hub_url: hub_url.into().trim_end_matches('/').to_string(),
            token,
            timeout,
            max_retries: 1,
        })
    }

    pub fn inference_url(&self) -> &str {
        &self.inference_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Looks `model` up on the Hub.
    ///
    /// 404 (unknown repo) and 401/403 (gated or private without a valid
    /// token) become [`FixrouteError::ModelUnavailable`].
    pub async fn model_info(&self, model: &str) -> Result<ModelInfo, FixrouteError> {
        let url = format!("{}/api/models/{model}", self.hub_url);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = read_body(response).await?;
        debug!(status = %status, model, "hub lookup response received");

        match status {
            s if s.is_success() => serde_json::from_str(&body).map_err(|e| {
                FixrouteError::provider(format!("failed to parse Hub model info: {e}"), e)
            }),
            StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(FixrouteError::ModelUnavailable {
                    model: model.to_string(),
                    message: api_message(status, &body),
                })
            }
            _ => Err(FixrouteError::Provider {
                message: api_message(status, &body),
                source: None,
            }),
        }
    }

    /// Runs text generation on `model`.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedText>, FixrouteError> {
        let url = format!("{}/models/{model}", self.inference_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying inference request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .authorized(self.client.post(&url))
                .json(request)
                .send()
                .await
                .map_err(|e| self.request_error(e))?;

            let status = response.status();
            let body = read_body(response).await?;
            debug!(status = %status, attempt, model, "inference response received");

            if status.is_success() {
                return serde_json::from_str(&body).map_err(|e| {
                    FixrouteError::provider(format!("failed to parse inference response: {e}"), e)
                });
            }

            let error = match status {
                StatusCode::NOT_FOUND => FixrouteError::ModelUnavailable {
                    model: model.to_string(),
                    message: api_message(status, &body),
                },
                _ => FixrouteError::Provider {
                    message: api_message(status, &body),
                    source: None,
                },
            };

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(error);
                continue;
            }

            return Err(error);
        }

        Err(last_error.unwrap_or_else(|| FixrouteError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn request_error(&self, e: reqwest::Error) -> FixrouteError {
        if e.is_timeout() {
            FixrouteError::Timeout {
                duration: self.timeout,
            }
        } else {
            FixrouteError::provider(format!("HTTP request to Hugging Face failed: {e}"), e)
        }
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, FixrouteError> {
    response
        .text()
        .await
        .map_err(|e| FixrouteError::provider("failed to read response body", e))
}

fn api_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!("Hugging Face API error ({status}): {}", api_err.error),
        Err(_) => format!("Hugging Face returned {status}: {body}"),
    }
}

fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
