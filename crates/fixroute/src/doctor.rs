// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fixroute doctor` command implementation.
//!
//! Reports whether the configured backend is reachable and serves the
//! configured model, without pulling or generating anything.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use colored::Colorize;
use fixroute_config::FixrouteConfig;
use fixroute_core::{FixrouteError, HealthStatus, PluginAdapter, ProviderAdapter};

use crate::provider;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Runs the `fixroute doctor` command.
pub async fn run_doctor(config: &FixrouteConfig) -> Result<(), FixrouteError> {
    let use_color = std::io::stdout().is_terminal();
    let mut results = vec![CheckResult {
        name: "Configuration".into(),
        status: CheckStatus::Pass,
        message: format!(
            "valid (backend={}, model={})",
            config.provider.backend,
            config.provider.resolved_model()
        ),
        duration: Duration::ZERO,
    }];

    match provider::build_provider(&config.provider) {
        Ok(provider) => results.push(check_backend(provider.as_ref()).await),
        Err(e) => results.push(CheckResult {
            name: "Backend".into(),
            status: CheckStatus::Fail,
            message: e.to_string(),
            duration: Duration::ZERO,
        }),
    }

    println!();
    println!("  fixroute doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render_line(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    }
    println!();

    Ok(())
}

/// Maps the backend's health report onto a check result.
async fn check_backend(provider: &dyn ProviderAdapter) -> CheckResult {
    let start = Instant::now();
    let name = format!("Backend ({})", provider.name());
    let (status, message) = match provider.health_check().await {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, format!("{} ready", provider.model())),
        Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, reason),
        Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name,
        status,
        message,
        duration: start.elapsed(),
    }
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

#[cfg(test)]
mod tests {
    use fixroute_test_utils::MockProvider;

    use super::*;

    #[tokio::test]
    async fn healthy_backend_passes() {
        let provider = MockProvider::new();
        let result = check_backend(&provider).await;
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.name, "Backend (mock-provider)");
        assert!(result.message.contains("mock-model"));
    }

    #[test]
    fn plain_rendering_uses_tags() {
        let result = CheckResult {
            name: "Backend (ollama)".into(),
            status: CheckStatus::Warn,
            message: "model smollm:latest is not pulled".into(),
            duration: Duration::from_millis(12),
        };
        let line = render_line(&result, false);
        assert!(line.starts_with("    [WARN] Backend (ollama)"));
        assert!(line.ends_with("model smollm:latest is not pulled (12ms)"));
    }
}
