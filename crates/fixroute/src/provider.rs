// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend construction from the `[provider]` section.

use std::sync::Arc;

use fixroute_config::Backend;
use fixroute_config::model::ProviderConfig;
use fixroute_core::{FixrouteError, PluginAdapter, ProviderAdapter};
use tracing::{error, info};

/// Constructs the configured backend. No network request is made.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn ProviderAdapter>, FixrouteError> {
    match config.backend {
        #[cfg(feature = "ollama")]
        Backend::Ollama => Ok(Arc::new(fixroute_ollama::OllamaProvider::new(config)?)),
        #[cfg(feature = "huggingface")]
        Backend::HuggingFace => Ok(Arc::new(
            fixroute_huggingface::HuggingFaceProvider::new(config)?,
        )),
        #[cfg(feature = "openai")]
        Backend::OpenAi => Ok(Arc::new(fixroute_openai::OpenAiCompatProvider::new(config)?)),
        #[allow(unreachable_patterns)]
        other => Err(FixrouteError::Config(format!(
            "backend `{other}` is not compiled into this binary (enable the `{other}` feature)"
        ))),
    }
}

/// Constructs and initializes the backend.
///
/// Initialization failure is fatal for the caller: no model means no
/// classification.
pub async fn connect(config: &ProviderConfig) -> Result<Arc<dyn ProviderAdapter>, FixrouteError> {
    initialize(build_provider(config)?).await
}

/// Initializes an already built backend, logging the failure reason.
pub async fn initialize(
    provider: Arc<dyn ProviderAdapter>,
) -> Result<Arc<dyn ProviderAdapter>, FixrouteError> {
    info!(
        backend = provider.name(),
        model = provider.model(),
        "initializing model backend"
    );
    if let Err(e) = provider.initialize().await {
        error!(
            error = %e,
            kind = e.kind(),
            backend = provider.name(),
            "model backend initialization failed"
        );
        return Err(e);
    }
    Ok(provider)
}
