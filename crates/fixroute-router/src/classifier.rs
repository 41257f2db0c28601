// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-stage message classification.
//!
//! Keyword pre-filter first; on a miss the provider is asked and its output
//! normalized. Provider failures stay typed inside [`Classifier::try_classify`]
//! and collapse to [`Label::General`] only at [`Classifier::classify`].

use std::sync::Arc;

use fixroute_config::FixrouteConfig;
use fixroute_core::{ConversationState, FixrouteError, Label, ProviderAdapter};
use tracing::{debug, error, info};

use crate::normalize::normalize_output;
use crate::prefilter::KeywordPrefilter;
use crate::prompt::PromptBuilder;

/// Which stage produced a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationSource {
    /// Resolved by the pre-filter without a model call.
    Keyword { keyword: String },
    /// Resolved by normalizing the provider's raw output.
    Model { raw: String },
}

/// A successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: Label,
    pub source: ClassificationSource,
}

/// Maps chat messages to exactly one [`Label`].
///
/// Holds no per-call state; every invocation is independent.
pub struct Classifier {
    prefilter: KeywordPrefilter,
    prompt: PromptBuilder,
    provider: Arc<dyn ProviderAdapter>,
}

impl Classifier {
    /// Creates a classifier with the default keyword lists and detailed prompt.
    pub fn new(provider: Arc<dyn ProviderAdapter>) -> Self {
        Self::with_parts(KeywordPrefilter::default(), PromptBuilder::default(), provider)
    }

    /// Creates a classifier from the `[keywords]` and `[prompt]` sections.
    pub fn from_config(config: &FixrouteConfig, provider: Arc<dyn ProviderAdapter>) -> Self {
        Self::with_parts(
            KeywordPrefilter::from_config(&config.keywords),
            PromptBuilder::from_config(&config.prompt),
            provider,
        )
    }

    pub fn with_parts(
        prefilter: KeywordPrefilter,
        prompt: PromptBuilder,
        provider: Arc<dyn ProviderAdapter>,
    ) -> Self {
        info!(
            provider = provider.name(),
            model = provider.model(),
            quote_keywords = prefilter.quote_keywords().len(),
            bond_keywords = prefilter.bond_keywords().len(),
            prompt_style = %prompt.style(),
            "classifier initialized"
        );
        Self {
            prefilter,
            prompt,
            provider,
        }
    }

    /// Classifies `message`, reporting which stage decided or why the model failed.
    pub async fn try_classify(&self, message: &str) -> Result<Classification, FixrouteError> {
        if let Some(hit) = self.prefilter.check(message) {
            debug!(label = %hit.label, keyword = hit.keyword, "pre-filter match");
            return Ok(Classification {
                label: hit.label,
                source: ClassificationSource::Keyword {
                    keyword: hit.keyword.to_string(),
                },
            });
        }

        let prompt = self.prompt.build(message);
        let raw = self.provider.generate(&prompt).await?;
        let label = normalize_output(&raw);
        debug!(label = %label, raw = raw.as_str(), "model output normalized");

        Ok(Classification {
            label,
            source: ClassificationSource::Model { raw },
        })
    }

    /// Classifies `message`. Never fails: provider errors are logged and
    /// yield [`Label::General`].
    pub async fn classify(&self, message: &str) -> Label {
        info!(chars = message.chars().count(), "processing message");
        debug!(text = message, "message text");

        match self.try_classify(message).await {
            Ok(classification) => {
                let stage = match classification.source {
                    ClassificationSource::Keyword { .. } => "keyword",
                    ClassificationSource::Model { .. } => "model",
                };
                info!(label = %classification.label, stage, "message classified");
                classification.label
            }
            Err(e) => {
                error!(
                    error = %e,
                    kind = e.kind(),
                    provider = self.provider.name(),
                    "classification failed, defaulting to GENERAL"
                );
                Label::General
            }
        }
    }

    /// Classifies the newest message in `state` and writes its label.
    ///
    /// Returns `None` when the conversation is empty. The sequence itself is
    /// never modified, only the label of its last entry.
    pub async fn classify_last(&self, state: &mut ConversationState) -> Option<Label> {
        let text = state.last()?.text.clone();
        let label = self.classify(&text).await;
        if let Some(last) = state.last_mut() {
            last.label = Some(label);
        }
        Some(label)
    }

    pub fn provider(&self) -> &Arc<dyn ProviderAdapter> {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use fixroute_config::PromptStyle;
    use fixroute_core::Message;
    use fixroute_test_utils::MockProvider;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    use super::*;

    fn classifier_with(provider: &Arc<MockProvider>) -> Classifier {
        Classifier::new(provider.clone())
    }

    #[tokio::test]
    async fn offer_keyword_skips_model() {
        let provider = Arc::new(MockProvider::new());
        let c = classifier_with(&provider);

        let label = c
            .classify("8.3774% HDB Financial Apr 26 INE756I07ER5 Qtm: 1 Cr Offer please")
            .await;
        assert_eq!(label, Label::QuoteRequest);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn about_keyword_skips_model() {
        let provider = Arc::new(MockProvider::new());
        let c = classifier_with(&provider);

        let result = c
            .try_classify("can you please share a brief note about AP state bonds?")
            .await
            .unwrap();
        assert_eq!(result.label, Label::BondRequest);
        assert_eq!(
            result.source,
            ClassificationSource::Keyword {
                keyword: "about".into()
            }
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn unmatched_message_goes_to_model() {
        let provider = Arc::new(MockProvider::with_responses(vec!["I don't know".into()]));
        let c = classifier_with(&provider);

        let label = c.classify("Is the weather nice today?").await;
        assert_eq!(label, Label::General);
        assert_eq!(provider.calls(), 1);

        let prompts = provider.prompts().await;
        assert!(prompts[0].contains("Input: Is the weather nice today?"));
    }

    #[tokio::test]
    async fn model_output_is_normalized() {
        let provider = Arc::new(MockProvider::with_responses(vec![
            "The answer is QuoteRequest.".into(),
            "bondrequest".into(),
        ]));
        let c = classifier_with(&provider);

        let first = c.try_classify("5 year paper available?").await.unwrap();
        assert_eq!(first.label, Label::QuoteRequest);
        assert_eq!(
            first.source,
            ClassificationSource::Model {
                raw: "The answer is QuoteRequest.".into()
            }
        );

        let second = c
            .classify("Has the AP state bonds delayed/defaulted previously?")
            .await;
        assert_eq!(second, Label::BondRequest);
    }

    #[tokio::test]
    #[traced_test]
    async fn provider_failure_defaults_to_general() {
        let provider = Arc::new(MockProvider::new());
        provider.push_failure("connection refused").await;
        let c = classifier_with(&provider);

        let err = c.try_classify("Is the weather nice today?").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));

        provider.push_failure("connection refused").await;
        let label = c.classify("Is the weather nice today?").await;
        assert_eq!(label, Label::General);
        assert_eq!(provider.calls(), 2);
        assert!(logs_contain("classification failed, defaulting to GENERAL"));
    }

    #[tokio::test]
    async fn provider_failure_is_not_retried() {
        let provider = Arc::new(MockProvider::always_failing("backend down"));
        let c = classifier_with(&provider);

        assert_eq!(c.classify("hello there").await, Label::General);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn classify_last_labels_newest_message_only() {
        let provider = Arc::new(MockProvider::new());
        let c = classifier_with(&provider);

        let mut state = ConversationState::new();
        state.push(Message::user("Tell me about AP state bonds"));
        state.push(Message::user("Show bid for 8.3774% HDB Financial Apr 26"));

        let label = c.classify_last(&mut state).await;
        assert_eq!(label, Some(Label::QuoteRequest));
        assert_eq!(state.len(), 2);
        assert_eq!(state.last().unwrap().label, Some(Label::QuoteRequest));
        assert_eq!(state.iter().next().unwrap().label, None);
    }

    #[tokio::test]
    async fn classify_last_on_empty_conversation() {
        let provider = Arc::new(MockProvider::new());
        let c = classifier_with(&provider);
        let mut state = ConversationState::new();
        assert_eq!(c.classify_last(&mut state).await, None);
    }

    #[tokio::test]
    async fn from_config_uses_configured_keywords_and_prompt() {
        let mut config = FixrouteConfig::default();
        config.keywords.quote = vec!["yield".into()];
        config.keywords.bond = vec![];
        config.prompt.style = PromptStyle::Compact;

        let provider = Arc::new(MockProvider::with_responses(vec!["GENERAL".into()]));
        let c = Classifier::from_config(&config, provider.clone());

        assert_eq!(c.classify("what yield on this?").await, Label::QuoteRequest);
        assert_eq!(provider.calls(), 0);

        // "price" is no longer a keyword, so the model decides.
        assert_eq!(c.classify("price please").await, Label::General);
        assert_eq!(provider.calls(), 1);
        assert!(provider.prompts().await[0].starts_with("Classify as"));
    }

    proptest! {
        #[test]
        fn classify_is_total(message in ".{0,400}", reply in ".{0,40}", fail in any::<bool>()) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let label = rt.block_on(async {
                let provider = Arc::new(MockProvider::new());
                if fail {
                    provider.push_failure("boom").await;
                } else {
                    provider.push_response(reply).await;
                }
                Classifier::new(provider).classify(&message).await
            });
            prop_assert!(Label::ALL.contains(&label));
        }
    }
}
