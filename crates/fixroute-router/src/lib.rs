// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-income chat message routing.
//!
//! This crate provides:
//! - [`KeywordPrefilter`]: deterministic keyword classification (no model call)
//! - [`PromptBuilder`]: the few-shot classification prompt for the model fallback
//! - [`normalize_output`]: collapses free-form model output into a [`Label`]
//! - [`Classifier`]: the two-stage policy with a GENERAL fallback on any provider error
//!
//! [`Label`]: fixroute_core::Label

pub mod classifier;
pub mod normalize;
pub mod prefilter;
pub mod prompt;

pub use classifier::{Classification, ClassificationSource, Classifier};
pub use normalize::normalize_output;
pub use prefilter::{KeywordPrefilter, PrefilterMatch};
pub use prompt::PromptBuilder;
