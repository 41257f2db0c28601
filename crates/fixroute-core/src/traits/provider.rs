// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for language model backends (Ollama, Hugging Face, OpenAI-compatible).

use async_trait::async_trait;

use crate::error::FixrouteError;
use crate::traits::adapter::PluginAdapter;

/// A language model backend that turns a prompt into a short completion.
///
/// Implementations are constructed once at startup and injected into the
/// classifier. Generation must be length-capped so a single call cannot run
/// away.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// The model identifier this provider talks to.
    fn model(&self) -> &str;

    /// Makes the model available (pull, lookup, or probe).
    ///
    /// Called once before the first [`generate`](Self::generate). A failure
    /// here means no model is usable.
    async fn initialize(&self) -> Result<(), FixrouteError>;

    /// Generates a completion for `prompt`, returning only the new text.
    async fn generate(&self, prompt: &str) -> Result<String, FixrouteError>;
}
