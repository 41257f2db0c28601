// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fixroute classify` command implementation.

use fixroute_config::FixrouteConfig;
use fixroute_core::FixrouteError;
use fixroute_router::Classifier;

use crate::provider;
use crate::shell::format_classification;

/// Classifies one message and prints `Classification: <Label>`.
pub async fn run_classify(config: &FixrouteConfig, message: &str) -> Result<(), FixrouteError> {
    let provider = provider::connect(&config.provider).await?;
    let classifier = Classifier::from_config(config, provider);
    let label = classifier.classify(message).await;
    println!("{}", format_classification(label));
    Ok(())
}
