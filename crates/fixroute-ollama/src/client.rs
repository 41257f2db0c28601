// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama daemon.
//!
//! Provides [`OllamaClient`] which handles request construction, response
//! decoding, and one retry on transient errors.

use std::time::Duration;

use fixroute_core::FixrouteError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::types::{
    ApiErrorResponse, ChatRequest, ChatResponse, PullRequest, PullResponse, TagsResponse,
};

/// Pulling weights can take minutes on first run.
const PULL_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// HTTP client for the Ollama REST API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    pull_timeout: Duration,
    max_retries: u32,
}

impl OllamaClient {
    /// Creates a client for the daemon at `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FixrouteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FixrouteError::provider("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            pull_timeout: PULL_TIMEOUT,
            max_retries: 1,
        })
    }

    /// Overrides the deadline for `POST /api/pull`.
    pub fn with_pull_timeout(mut self, timeout: Duration) -> Self {
        self.pull_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/pull` without streaming; returns once the pull finished.
    pub async fn pull(&self, model: &str) -> Result<PullResponse, FixrouteError> {
        let request = PullRequest {
            model: model.to_string(),
            stream: false,
        };
        self.post_json("/api/pull", &request, self.pull_timeout).await
    }

    /// `POST /api/chat` without streaming.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, FixrouteError> {
        self.post_json("/api/chat", request, self.timeout).await
    }

    /// `GET /api/tags`: models available locally.
    pub async fn tags(&self) -> Result<TagsResponse, FixrouteError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.request_error(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FixrouteError::provider("failed to read response body", e))?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        decode(&body)
    }

    /// Posts `body` as JSON and decodes the response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    async fn post_json<B, R>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<R, FixrouteError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, path, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .timeout(timeout)
                .json(body)
                .send()
                .await
                .map_err(|e| self.request_error(e, timeout))?;

            let status = response.status();
            debug!(status = %status, attempt, path, "ollama response received");

            let text = response
                .text()
                .await
                .map_err(|e| FixrouteError::provider("failed to read response body", e))?;

            if status.is_success() {
                return decode(&text);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %text, "transient error, will retry");
                last_error = Some(api_error(status, &text));
                continue;
            }

            return Err(api_error(status, &text));
        }

        Err(last_error.unwrap_or_else(|| FixrouteError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }

    fn request_error(&self, e: reqwest::Error, timeout: Duration) -> FixrouteError {
        if e.is_timeout() {
            FixrouteError::Timeout { duration: timeout }
        } else {
            FixrouteError::provider(format!("HTTP request to {} failed: {e}", self.base_url), e)
        }
    }
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, FixrouteError> {
    serde_json::from_str(body)
        .map_err(|e| FixrouteError::provider(format!("failed to parse Ollama response: {e}"), e))
}

fn api_error(status: StatusCode, body: &str) -> FixrouteError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!("Ollama API error ({status}): {}", api_err.error),
        Err(_) => format!("Ollama returned {status}: {body}"),
    };
    FixrouteError::Provider {
        message,
        source: None,
    }
}

/// Returns true for HTTP status codes that warrant a retry.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
