// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible servers (llama.cpp, vLLM, mistralrs).

use std::time::Duration;

use fixroute_core::FixrouteError;
use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ModelList};

#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    max_retries: u32,
}

impl OpenAiCompatClient {
    /// Creates a client for `base_url`, which includes the `/v1` prefix.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FixrouteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FixrouteError::provider("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            timeout,
            max_retries: 1,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /models`.
    pub async fn list_models(&self) -> Result<ModelList, FixrouteError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = read_body(response).await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| FixrouteError::provider(format!("failed to parse model list: {e}"), e))
    }

    /// `POST /chat/completions` without streaming.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, FixrouteError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying chat completion after transient error");
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
            debug!(status = %status, attempt, "chat completion response received");

            if status.is_success() {
                return serde_json::from_str(&body).map_err(|e| {
                    FixrouteError::provider(format!("failed to parse chat completion: {e}"), e)
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(api_error(status, &body));
                continue;
            }

            return Err(api_error(status, &body));
        }

        Err(last_error.unwrap_or_else(|| FixrouteError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    fn request_error(&self, e: reqwest::Error) -> FixrouteError {
        if e.is_timeout() {
            FixrouteError::Timeout {
                duration: self.timeout,
            }
        } else {
            FixrouteError::provider(format!("HTTP request to {} failed: {e}", self.base_url), e)
        }
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, FixrouteError> {
    response
        .text()
        .await
        .map_err(|e| FixrouteError::provider("failed to read response body", e))
}

fn api_error(status: StatusCode, body: &str) -> FixrouteError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!("server error ({status}): {}", api_err.error.message),
        Err(_) => format!("server returned {status}: {body}"),
    };
    FixrouteError::Provider {
        message,
        source: None,
    }
}

fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
