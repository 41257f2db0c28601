// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the fixroute classifier.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use fixroute_core::Label;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level fixroute configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FixrouteConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Language model backend selection and generation limits.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Keyword lists for the deterministic pre-filter.
    #[serde(default)]
    pub keywords: KeywordConfig,

    /// Classification prompt settings.
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Conversation history settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the shell banner and logs.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "fixroute".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which language model backend serves the fallback stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    /// Local Ollama daemon.
    #[default]
    Ollama,
    /// Hosted Hugging Face inference pipeline.
    #[serde(rename = "huggingface")]
    #[strum(serialize = "huggingface")]
    HuggingFace,
    /// Local OpenAI-compatible server (llama.cpp, mistralrs-server, vLLM).
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi,
}

impl Backend {
    /// Model used when `provider.model` is not set.
    pub fn default_model(self) -> &'static str {
        match self {
            Backend::Ollama => "smollm:latest",
            Backend::HuggingFace => "HuggingFaceTB/SmolLM-360M-Instruct",
            Backend::OpenAi => "HuggingFaceTB/SmolLM-1.7B-Instruct",
        }
    }

    /// Base URL used when `provider.base_url` is not set.
    pub fn default_base_url(self) -> &'static str {
        match self {
            Backend::Ollama => "http://localhost:11434",
            Backend::HuggingFace => "https://api-inference.huggingface.co",
            Backend::OpenAi => "http://localhost:8080/v1",
        }
    }

    /// Environment variable consulted when `provider.api_key` is unset.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Backend::Ollama => None,
            Backend::HuggingFace => Some("HF_TOKEN"),
            Backend::OpenAi => Some("OPENAI_API_KEY"),
        }
    }
}

/// Language model backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Backend to construct at startup.
    #[serde(default)]
    pub backend: Backend,

    /// Model identifier. `None` uses the backend default.
    #[serde(default)]
    pub model: Option<String>,

    /// API base URL. `None` uses the backend default.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token. `None` falls back to `HF_TOKEN` / `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Hugging Face Hub URL used to verify the model exists.
    #[serde(default = "default_hub_url")]
    pub hub_url: String,

    /// Maximum tokens to generate. One label word needs only a few.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature. 0 means greedy decoding.
    #[serde(default)]
    pub temperature: f32,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// The configured model, or the backend default.
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.backend.default_model().to_string())
    }

    /// The configured base URL without a trailing slash, or the backend default.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(self.backend.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// The bearer token: `api_key` if non-empty, else the backend's env var.
    pub fn resolved_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key
            && !key.is_empty()
        {
            return Some(key.clone());
        }
        let var = self.backend.api_key_env()?;
        std::env::var(var).ok().filter(|v| !v.is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            model: None,
            base_url: None,
            api_key: None,
            hub_url: default_hub_url(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_hub_url() -> String {
    "https://huggingface.co".to_string()
}

fn default_max_tokens() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    60
}

/// Pre-filter keyword lists. Pricing keywords are checked first.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordConfig {
    /// Keywords signalling pricing intent (QuoteRequest).
    #[serde(default = "default_quote_keywords")]
    pub quote: Vec<String>,

    /// Keywords signalling informational intent (BondRequest).
    #[serde(default = "default_bond_keywords")]
    pub bond: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            quote: default_quote_keywords(),
            bond: default_bond_keywords(),
        }
    }
}

fn default_quote_keywords() -> Vec<String> {
    ["price", "bid", "offer", "quote", "rate"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_bond_keywords() -> Vec<String> {
    ["about", "information", "details", "track record", "rating"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Shape of the classification prompt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PromptStyle {
    /// Full task description with worked examples.
    #[default]
    Detailed,
    /// Short rules-only prompt for small models with tight context.
    Compact,
}

/// Classification prompt configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PromptConfig {
    #[serde(default)]
    pub style: PromptStyle,

    /// Extra worked examples appended after the built-in ones.
    #[serde(default)]
    pub examples: Vec<PromptExample>,
}

/// A worked example shown to the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PromptExample {
    pub message: String,
    pub label: Label,
}

/// Conversation history configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Number of trailing messages kept in the shell conversation.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

fn default_history_capacity() -> usize {
    fixroute_core::DEFAULT_HISTORY_CAPACITY
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn defaults_match_reference_keywords() {
        let config = FixrouteConfig::default();
        assert_eq!(
            config.keywords.quote,
            vec!["price", "bid", "offer", "quote", "rate"]
        );
        assert_eq!(
            config.keywords.bond,
            vec!["about", "information", "details", "track record", "rating"]
        );
        assert_eq!(config.history.capacity, 10);
        assert_eq!(config.provider.max_tokens, 5);
    }

    #[test]
    fn backend_parses_and_displays() {
        assert_eq!(Backend::from_str("ollama").unwrap(), Backend::Ollama);
        assert_eq!(Backend::from_str("HuggingFace").unwrap(), Backend::HuggingFace);
        assert_eq!(Backend::from_str("openai").unwrap(), Backend::OpenAi);
        assert_eq!(Backend::HuggingFace.to_string(), "huggingface");
        assert!(Backend::from_str("tensorflow").is_err());
    }

    #[test]
    fn configured_api_key_wins() {
        let config = ProviderConfig {
            backend: Backend::OpenAi,
            api_key: Some("sk-local".into()),
            ..ProviderConfig::default()
        };
        assert_eq!(config.resolved_api_key().as_deref(), Some("sk-local"));

        let ollama = ProviderConfig {
            api_key: Some(String::new()),
            ..ProviderConfig::default()
        };
        assert_eq!(ollama.resolved_api_key(), None);
    }

    #[test]
    fn resolved_values_fall_back_to_backend_defaults() {
        let mut provider = ProviderConfig::default();
        assert_eq!(provider.resolved_model(), "smollm:latest");
        assert_eq!(provider.resolved_base_url(), "http://localhost:11434");

        provider.backend = Backend::HuggingFace;
        assert_eq!(
            provider.resolved_model(),
            "HuggingFaceTB/SmolLM-360M-Instruct"
        );

        provider.model = Some("custom".into());
        provider.base_url = Some("http://gpu-box:8000/".into());
        assert_eq!(provider.resolved_model(), "custom");
        assert_eq!(provider.resolved_base_url(), "http://gpu-box:8000");
    }

    #[test]
    fn prompt_examples_deserialize_labels() {
        let toml_str = r#"
[prompt]
style = "compact"

[[prompt.examples]]
message = "Any offer in 3-6 month A rated paper"
label = "QuoteRequest"

[[prompt.examples]]
message = "good morning"
label = "GENERAL"
"#;
        let config: FixrouteConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.prompt.style, PromptStyle::Compact);
        assert_eq!(config.prompt.examples.len(), 2);
        assert_eq!(config.prompt.examples[0].label, Label::QuoteRequest);
        assert_eq!(config.prompt.examples[1].label, Label::General);
    }

    #[test]
    fn prompt_examples_deny_unknown_fields() {
        let toml_str = r#"
[[prompt.examples]]
message = "hi"
label = "GENERAL"
weight = 2
"#;
        assert!(toml::from_str::<FixrouteConfig>(toml_str).is_err());
    }
}
