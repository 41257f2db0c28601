// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Hugging Face Hub and Inference APIs.

use serde::{Deserialize, Serialize};

/// Body of `POST /models/{model}` for text generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
    pub options: InferenceOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    /// Greedy decoding when false.
    pub do_sample: bool,
    /// Ask the server to return only the continuation.
    pub return_full_text: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceOptions {
    /// Block until a cold model is loaded instead of answering 503.
    pub wait_for_model: bool,
}

/// One element of the text-generation response array.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Subset of `GET /api/models/{model}` used to confirm the model exists.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "modelId")]
    pub model_id: Option<String>,
    #[serde(default)]
    pub pipeline_tag: Option<String>,
}

impl ModelInfo {
    /// The repository name; older Hub responses only carry `modelId`.
    pub fn name(&self) -> Option<&str> {
        self.id.as_deref().or(self.model_id.as_deref())
    }
}

/// Error body returned by both APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
