// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! fixroute - routes fixed income chat messages to a desk.
//!
//! This is the binary entry point: it loads configuration, constructs the
//! configured model backend once, and drives the classifier from the
//! interactive shell or a one-shot command.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod classify;
mod doctor;
mod provider;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use fixroute_config::{Backend, FixrouteConfig};

/// fixroute - classifies fixed income chat messages.
#[derive(Parser, Debug)]
#[command(name = "fixroute", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override `provider.backend`.
    #[arg(long, global = true)]
    backend: Option<Backend>,

    /// Override `provider.model`.
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive classification shell (default).
    Shell,
    /// Classify a single message and exit.
    Classify {
        /// Message text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Print the resolved configuration as TOML.
    Config,
    /// Check configuration and backend reachability.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(errors) => {
            fixroute_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(&config).await,
        Commands::Classify { message } => classify::run_classify(&config, &message.join(" ")).await,
        Commands::Config => print_config(&config),
        Commands::Doctor => doctor::run_doctor(&config).await,
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Loads configuration and applies command-line overrides.
///
/// Overrides are validated together with the file and environment values.
fn load_config(cli: &Cli) -> Result<FixrouteConfig, Vec<fixroute_config::ConfigError>> {
    let mut config = match &cli.config {
        Some(path) => fixroute_config::load_and_validate_path(path)?,
        None => fixroute_config::load_and_validate()?,
    };
    apply_overrides(&mut config, cli.backend, cli.model.clone());
    fixroute_config::validation::validate_config(&config)?;
    Ok(config)
}

fn apply_overrides(config: &mut FixrouteConfig, backend: Option<Backend>, model: Option<String>) {
    if let Some(backend) = backend
        && backend != config.provider.backend
    {
        config.provider.backend = backend;
        // Backend defaults differ; a URL meant for another backend is dropped.
        config.provider.base_url = None;
    }
    if let Some(model) = model {
        config.provider.model = Some(model);
    }
}

/// Prints the resolved configuration with secrets masked.
fn print_config(config: &FixrouteConfig) -> Result<(), fixroute_core::FixrouteError> {
    let mut shown = config.clone();
    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("********".into());
    }
    let rendered = toml::to_string_pretty(&shown).map_err(|e| {
        fixroute_core::FixrouteError::Internal(format!("failed to render configuration: {e}"))
    })?;
    print!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so classification output on stdout stays clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fixroute={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["fixroute"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn classify_joins_words() {
        let cli = Cli::try_parse_from(["fixroute", "classify", "Offer", "please"]).unwrap();
        match cli.command {
            Some(Commands::Classify { message }) => assert_eq!(message.join(" "), "Offer please"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["fixroute", "classify"]).is_err());
    }

    #[test]
    fn global_overrides_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fixroute",
            "config",
            "--backend",
            "openai",
            "--model",
            "smol",
        ])
        .unwrap();
        assert_eq!(cli.backend, Some(Backend::OpenAi));
        assert_eq!(cli.model.as_deref(), Some("smol"));
        assert!(Cli::try_parse_from(["fixroute", "--backend", "tensorflow"]).is_err());
    }

    #[test]
    fn switching_backend_drops_stale_base_url() {
        let mut config = FixrouteConfig::default();
        config.provider.base_url = Some("http://gpu-box:11434".into());

        apply_overrides(&mut config, Some(Backend::Ollama), None);
        assert_eq!(config.provider.base_url.as_deref(), Some("http://gpu-box:11434"));

        apply_overrides(&mut config, Some(Backend::OpenAi), Some("smol".into()));
        assert_eq!(config.provider.backend, Backend::OpenAi);
        assert_eq!(config.provider.base_url, None);
        assert_eq!(config.provider.resolved_model(), "smol");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = fixroute_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.agent.name, "fixroute");
    }
}
