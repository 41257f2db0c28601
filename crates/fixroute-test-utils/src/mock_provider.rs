// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without a model backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use fixroute_core::traits::adapter::PluginAdapter;
use fixroute_core::traits::provider::ProviderAdapter;
use fixroute_core::types::HealthStatus;
use fixroute_core::FixrouteError;

/// Text returned when the reply queue is empty.
pub const DEFAULT_MOCK_RESPONSE: &str = "mock response";

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

/// A mock LLM provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// [`DEFAULT_MOCK_RESPONSE`] is returned, or an error if the provider was
/// built with [`MockProvider::always_failing`]. Every prompt is recorded.
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    calls: AtomicUsize,
    always_fail: Option<String>,
    fail_initialize: bool,
    initialized: AtomicBool,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            calls: AtomicUsize::new(0),
            always_fail: None,
            fail_initialize: false,
            initialized: AtomicBool::new(false),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let provider = Self::new();
        let queue = responses.into_iter().map(Reply::Text).collect();
        Self {
            replies: Arc::new(Mutex::new(queue)),
            ..provider
        }
    }

    /// Create a provider whose every `generate` call fails with `message`.
    pub fn always_failing(message: impl Into<String>) -> Self {
        Self {
            always_fail: Some(message.into()),
            ..Self::new()
        }
    }

    /// Create a provider whose `initialize` fails, as if the model could not be pulled.
    pub fn unavailable() -> Self {
        Self {
            fail_initialize: true,
            ..Self::new()
        }
    }

    /// Add a response to the end of the queue.
    pub async fn push_response(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(Reply::Text(text.into()));
    }

    /// Add a provider failure to the end of the queue.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.replies.lock().await.push_back(Reply::Fail(message.into()));
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Whether `initialize` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Prompts received by `generate`, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    async fn next_reply(&self) -> Reply {
        if let Some(message) = &self.always_fail {
            return Reply::Fail(message.clone());
        }
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Reply::Text(DEFAULT_MOCK_RESPONSE.to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, FixrouteError> {
        if self.fail_initialize {
            Ok(HealthStatus::Unhealthy("model unavailable".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn model(&self) -> &str {
        "mock-model"
    }

    async fn initialize(&self) -> Result<(), FixrouteError> {
        if self.fail_initialize {
            return Err(FixrouteError::ModelUnavailable {
                model: self.model().to_string(),
                message: "mock model cannot be loaded".into(),
            });
        }
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String, FixrouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.to_string());

        match self.next_reply().await {
            Reply::Text(text) => Ok(text),
            Reply::Fail(message) => Err(FixrouteError::Provider {
                message,
                source: None,
            }),
        }
    }
}
