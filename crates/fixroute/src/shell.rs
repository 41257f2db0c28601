// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fixroute shell` command implementation.
//!
//! Reads one query per line, keeps the last `history.capacity` messages,
//! and prints the label of each query. One classification is in flight at
//! a time.

use colored::Colorize;
use fixroute_config::FixrouteConfig;
use fixroute_core::{ConversationState, FixrouteError, Label, Message};
use fixroute_router::Classifier;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use crate::provider;

const PROMPT: &str = "Enter your query: ";

/// Unexpected readline failures tolerated in a row before the shell gives up.
const MAX_CONSECUTIVE_READ_ERRORS: u32 = 3;

const EXAMPLE_QUERIES: &[&str] = &[
    "What's the price of HDB bonds?",
    "Tell me about AP state bonds",
    "Show bid for 8.3774% HDB Financial Apr 26",
];

/// What the shell does with one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Exit,
    Skip,
    Classified(Label),
}

/// Counts unexpected readline failures since the last line read.
#[derive(Debug, Default)]
struct ReadErrors {
    consecutive: u32,
}

impl ReadErrors {
    fn reset(&mut self) {
        self.consecutive = 0;
    }

    /// Records a failure; false once the limit is reached.
    fn record(&mut self) -> bool {
        self.consecutive += 1;
        self.consecutive < MAX_CONSECUTIVE_READ_ERRORS
    }
}

/// Returns true for the `exit` command, in any case and with surrounding blanks.
pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Handles one input line: exit, skip blanks, or append and classify.
pub async fn process_line(
    classifier: &Classifier,
    state: &mut ConversationState,
    line: &str,
) -> LineOutcome {
    if is_exit_command(line) {
        return LineOutcome::Exit;
    }
    let text = line.trim();
    if text.is_empty() {
        return LineOutcome::Skip;
    }

    if let Some(evicted) = state.push(Message::user(text)) {
        debug!(evicted = evicted.text.as_str(), "history full, oldest message dropped");
    }
    match classifier.classify_last(state).await {
        Some(label) => LineOutcome::Classified(label),
        None => LineOutcome::Skip,
    }
}

/// Renders the result line printed after each query.
pub fn format_classification(label: Label) -> String {
    let name = label.to_string();
    let colored = match label {
        Label::QuoteRequest => name.green(),
        Label::BondRequest => name.cyan(),
        Label::General => name.normal(),
    };
    format!("{} {}", "Classification:".bold(), colored.bold())
}

/// Runs the `fixroute shell` interactive REPL.
pub async fn run_shell(config: &FixrouteConfig) -> Result<(), FixrouteError> {
    println!("{}", "Fixed Income Query Classifier".bold().green());
    println!("{}", "-".repeat(50));
    println!("Initializing classifier...");

    let provider = provider::connect(&config.provider).await.inspect_err(|_| {
        eprintln!(
            "{}: could not make model `{}` available on the {} backend",
            "error".red(),
            config.provider.resolved_model(),
            config.provider.backend
        );
    })?;
    let classifier = Classifier::from_config(config, provider);
    let mut state = ConversationState::with_capacity(config.history.capacity);

    let mut rl = DefaultEditor::new()
        .map_err(|e| FixrouteError::Internal(format!("failed to initialize readline: {e}")))?;

    print_banner();

    let mut read_errors = ReadErrors::default();
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                read_errors.reset();
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.trim());
                }
                match process_line(&classifier, &mut state, &line).await {
                    LineOutcome::Exit => break,
                    LineOutcome::Skip => continue,
                    LineOutcome::Classified(label) => {
                        println!("{}\n", format_classification(label));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                if !read_errors.record() {
                    warn!(error = %e, "too many consecutive input errors, leaving shell");
                    break;
                }
            }
        }
    }

    println!("{}", "Goodbye!".dimmed());
    Ok(())
}

fn print_banner() {
    println!("Classifier ready.");
    println!(
        "\nCategories: {}, {}, {}",
        Label::QuoteRequest.to_string().green(),
        Label::BondRequest.to_string().cyan(),
        Label::General
    );
    println!("\nExample queries:");
    for query in EXAMPLE_QUERIES {
        println!("- '{query}'");
    }
    println!("\nType {} or press Ctrl+C to quit.\n", "exit".yellow());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fixroute_test_utils::MockProvider;

    use super::*;

    #[test]
    fn exit_is_case_insensitive_and_trimmed() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  EXIT \n"));
        assert!(is_exit_command("Exit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("quit"));
    }

    #[test]
    fn classification_line_names_the_label() {
        colored::control::set_override(false);
        assert_eq!(
            format_classification(Label::General),
            "Classification: GENERAL"
        );
        assert_eq!(
            format_classification(Label::QuoteRequest),
            "Classification: QuoteRequest"
        );
    }

    #[test]
    fn read_errors_stop_the_shell_only_when_consecutive() {
        let mut errors = ReadErrors::default();
        assert!(errors.record());
        assert!(errors.record());
        errors.reset();
        assert!(errors.record());
        assert!(errors.record());
        assert!(!errors.record());
    }

    #[tokio::test]
    async fn blank_lines_are_skipped_without_history() {
        let provider = Arc::new(MockProvider::new());
        let classifier = Classifier::new(provider.clone());
        let mut state = ConversationState::new();

        assert_eq!(process_line(&classifier, &mut state, "   ").await, LineOutcome::Skip);
        assert_eq!(process_line(&classifier, &mut state, "exit").await, LineOutcome::Exit);
        assert!(state.is_empty());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn queries_are_recorded_and_labeled() {
        let provider = Arc::new(MockProvider::with_responses(vec!["GENERAL".into()]));
        let classifier = Classifier::new(provider);
        let mut state = ConversationState::new();

        let outcome = process_line(&classifier, &mut state, " What's the price of HDB bonds? ").await;
        assert_eq!(outcome, LineOutcome::Classified(Label::QuoteRequest));

        let outcome = process_line(&classifier, &mut state, "Is the weather nice today?").await;
        assert_eq!(outcome, LineOutcome::Classified(Label::General));

        assert_eq!(state.len(), 2);
        let first = state.iter().next().unwrap();
        assert_eq!(first.text, "What's the price of HDB bonds?");
        assert_eq!(first.label, Some(Label::QuoteRequest));
    }

    #[tokio::test]
    async fn history_stays_bounded() {
        let provider = Arc::new(MockProvider::new());
        let classifier = Classifier::new(provider);
        let mut state = ConversationState::with_capacity(3);

        for i in 0..5 {
            process_line(&classifier, &mut state, &format!("price {i}")).await;
        }
        assert_eq!(state.len(), 3);
        assert_eq!(state.iter().next().unwrap().text, "price 2");
    }
}
