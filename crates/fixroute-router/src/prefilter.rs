// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic keyword pre-filter.
//!
//! Quote requests use a narrow, predictable vocabulary, so a substring check
//! on the lowercased message resolves most traffic without a model call.

use fixroute_config::model::KeywordConfig;
use fixroute_core::Label;

/// A keyword hit from the pre-filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefilterMatch<'a> {
    pub label: Label,
    /// The configured keyword that matched.
    pub keyword: &'a str,
}

/// Keyword lists checked in priority order: pricing before informational.
#[derive(Debug, Clone)]
pub struct KeywordPrefilter {
    quote: Vec<String>,
    bond: Vec<String>,
}

impl KeywordPrefilter {
    /// Creates a pre-filter from pricing and informational keyword lists.
    ///
    /// Keywords are lowercased; blank entries are dropped since they would
    /// match every message.
    pub fn new<Q, B>(quote: Q, bond: B) -> Self
    where
        Q: IntoIterator,
        Q::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        Self {
            quote: normalize_keywords(quote),
            bond: normalize_keywords(bond),
        }
    }

    pub fn from_config(config: &KeywordConfig) -> Self {
        Self::new(&config.quote, &config.bond)
    }

    /// Returns the label for the first keyword found, pricing keywords first.
    pub fn check(&self, message: &str) -> Option<PrefilterMatch<'_>> {
        let lower = message.to_lowercase();

        if let Some(keyword) = self.quote.iter().find(|k| lower.contains(k.as_str())) {
            return Some(PrefilterMatch {
                label: Label::QuoteRequest,
                keyword,
            });
        }

        self.bond
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(|keyword| PrefilterMatch {
                label: Label::BondRequest,
                keyword,
            })
    }

    pub fn quote_keywords(&self) -> &[String] {
        &self.quote
    }

    pub fn bond_keywords(&self) -> &[String] {
        &self.bond
    }
}

impl Default for KeywordPrefilter {
    fn default() -> Self {
        Self::from_config(&KeywordConfig::default())
    }
}

fn normalize_keywords<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
