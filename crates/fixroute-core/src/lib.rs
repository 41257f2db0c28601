// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the fixroute message classifier.
//!
//! This crate provides the error type, the closed [`Label`] set, the message
//! and bounded conversation types, and the provider traits every model
//! backend implements.

pub mod error;
pub mod history;
pub mod output;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FixrouteError;
pub use history::{ConversationState, DEFAULT_HISTORY_CAPACITY};
pub use output::{answer_after_marker, OUTPUT_MARKER};
pub use traits::{PluginAdapter, ProviderAdapter};
pub use types::{HealthStatus, Label, Message, Sender};
