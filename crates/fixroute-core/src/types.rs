// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the classifier, the providers and the shell.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Routing category assigned to a chat message.
///
/// The set is closed: every classified message carries exactly one of these.
/// Display strings are the canonical names printed by the shell; parsing is
/// case-insensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Label {
    /// Price, bid or offer request for a specific security.
    #[strum(serialize = "QuoteRequest")]
    QuoteRequest,
    /// Request for descriptive information about a security.
    #[strum(serialize = "BondRequest")]
    BondRequest,
    /// Anything else.
    #[strum(serialize = "GENERAL")]
    #[serde(rename = "GENERAL", alias = "General")]
    General,
}

impl Label {
    /// All labels, in pre-filter priority order.
    pub const ALL: [Label; 3] = [Label::QuoteRequest, Label::BondRequest, Label::General];
}

/// Who sent a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
    Other(String),
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Assistant => write!(f, "assistant"),
            Sender::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A chat message as seen by the router.
///
/// The classifier only reads `text` and writes `label`; `answer` belongs to
/// downstream handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    #[serde(default)]
    pub label: Option<Label>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl Message {
    /// Creates an unclassified message from the given sender.
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            label: None,
            answer: None,
        }
    }

    /// Creates an unclassified user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn label_display_uses_canonical_names() {
        assert_eq!(Label::QuoteRequest.to_string(), "QuoteRequest");
        assert_eq!(Label::BondRequest.to_string(), "BondRequest");
        assert_eq!(Label::General.to_string(), "GENERAL");
    }

    #[test]
    fn label_parses_case_insensitively() {
        assert_eq!(Label::from_str("quoterequest").unwrap(), Label::QuoteRequest);
        assert_eq!(Label::from_str("BONDREQUEST").unwrap(), Label::BondRequest);
        assert_eq!(Label::from_str("General").unwrap(), Label::General);
        assert_eq!(Label::from_str("GENERAL").unwrap(), Label::General);
        assert!(Label::from_str("Unknown").is_err());
    }

    #[test]
    fn label_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Label::General).unwrap();
        assert_eq!(json, "\"GENERAL\"");
        let parsed: Label = serde_json::from_str("\"General\"").unwrap();
        assert_eq!(parsed, Label::General);
        let parsed: Label = serde_json::from_str("\"QuoteRequest\"").unwrap();
        assert_eq!(parsed, Label::QuoteRequest);
    }

    #[test]
    fn new_user_message_is_unclassified() {
        let msg = Message::user("5 year paper available?");
        assert_eq!(msg.sender, Sender::User);
        assert!(msg.label.is_none());
        assert!(msg.answer.is_none());
    }

    #[test]
    fn sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Other("desk".into()).to_string(), "desk");
    }
}
