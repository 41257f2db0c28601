// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification prompt construction.
//!
//! The worked examples bias small models toward answering with exactly one
//! of the three label tokens instead of an explanation.

use fixroute_config::model::{PromptConfig, PromptExample, PromptStyle};
use fixroute_core::{Label, OUTPUT_MARKER};

const DETAILED_INSTRUCTIONS: &str = "\
You are a supervisor managing chat messages with queries about Fixed Income instruments.
Your task is to classify each incoming question. The question is routed to a team based on your answer.

There are 3 possible question types:
- QuoteRequest - questions related to price, bid, offer for a given Fixed Income security.
- BondRequest - questions related to information about a Fixed Income security.
- GENERAL - general questions
Return in the output only one word (QuoteRequest, BondRequest or GENERAL).
";

const COMPACT_INSTRUCTIONS: &str = "\
Classify as QuoteRequest, BondRequest, or GENERAL:

Rules:
QuoteRequest = price/bid/offer questions
BondRequest = bond info questions
GENERAL = other questions
";

/// Worked examples shown in the detailed prompt.
pub const BUILTIN_EXAMPLES: &[(&str, Label)] = &[
    (
        "8.3774% HDB Financial Apr 26 INE756I07ER5 Qtm: 1 Cr Offer please",
        Label::QuoteRequest,
    ),
    (
        "Hi, INE443L08156 10% Belstar 01-Aug-2025 Available ?",
        Label::QuoteRequest,
    ),
    (
        "Shriram finance and Mas Financial - are long dated papers available?",
        Label::QuoteRequest,
    ),
    (
        "Any offer in 3-6 month A rated paper for 50 lacs",
        Label::QuoteRequest,
    ),
    ("5 year paper available?", Label::QuoteRequest),
    (
        "Hi, 12.90 Electronica Sept 29 3 L Multiple 13.85 Satya Micro Cap July 29 2 L Multiples Pls show bids",
        Label::QuoteRequest,
    ),
    (
        "can you please share a brief note about AP state bonds?",
        Label::BondRequest,
    ),
    (
        "How is the track record of profitability?",
        Label::BondRequest,
    ),
    (
        "Has the AP state bonds delayed/defaulted previously?",
        Label::BondRequest,
    ),
];

/// Builds the model prompt for messages the pre-filter did not resolve.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    style: PromptStyle,
    extra_examples: Vec<PromptExample>,
}

impl PromptBuilder {
    pub fn new(style: PromptStyle) -> Self {
        Self {
            style,
            extra_examples: Vec::new(),
        }
    }

    pub fn from_config(config: &PromptConfig) -> Self {
        Self {
            style: config.style,
            extra_examples: config.examples.clone(),
        }
    }

    /// Appends a worked example after the built-in ones.
    pub fn with_example(mut self, message: impl Into<String>, label: Label) -> Self {
        self.extra_examples.push(PromptExample {
            message: message.into(),
            label,
        });
        self
    }

    pub fn style(&self) -> PromptStyle {
        self.style
    }

    /// Renders the full prompt for `message`.
    pub fn build(&self, message: &str) -> String {
        let mut prompt = String::new();

        match self.style {
            PromptStyle::Detailed => {
                prompt.push_str(DETAILED_INSTRUCTIONS);
                prompt.push_str("\nExamples:\n");
                for (example, label) in BUILTIN_EXAMPLES {
                    push_example(&mut prompt, example, *label);
                }
                for example in &self.extra_examples {
                    push_example(&mut prompt, &example.message, example.label);
                }
                prompt.push_str(
                    "Using the above samples as examples, interpret the chat message and respond with just the correct option.\n",
                );
            }
            PromptStyle::Compact => {
                prompt.push_str(COMPACT_INSTRUCTIONS);
                if !self.extra_examples.is_empty() {
                    prompt.push('\n');
                    for example in &self.extra_examples {
                        push_example(&mut prompt, &example.message, example.label);
                    }
                }
            }
        }

        prompt.push_str("\nInput: ");
        prompt.push_str(message);
        prompt.push_str("\nAnswer with one word only:");
        prompt
    }
}

fn push_example(prompt: &mut String, message: &str, label: Label) {
    prompt.push_str("Chat Message: ");
    prompt.push_str(message);
    prompt.push('\n');
    prompt.push_str(OUTPUT_MARKER);
    prompt.push_str(&label.to_string());
    prompt.push_str("\n\n");
}
