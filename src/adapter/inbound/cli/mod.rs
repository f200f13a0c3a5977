//! Operator command-line interface.
//!
//! Each subcommand creates one session store, runs one or more store
//! actions, and maps the outcome to the process exit code.

pub mod bot;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod output;
pub mod status;

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use self::command::{Cli, Commands, ConfigCommand};
use self::diagnostic::ConfigDiagnostic;
use self::output::OutputConfig;
use crate::adapter::outbound::notifier::ConsoleStyle;
use crate::application::ActionOutcome;
use crate::error::{ConfigError, Error};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Run the parsed command line to completion.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let Some(mut settings) = load_config(&cli.config) else {
        return Ok(ExitCode::FAILURE);
    };
    if let Some(level) = &cli.log_level {
        settings.logging.level.clone_from(level);
    }
    if cli.json_logs {
        settings.logging.format = "json".into();
    }
    settings.init_logging();
    debug!(config = %cli.config.display(), "Configuration loaded");

    let style = if cli.json {
        ConsoleStyle::Json
    } else if cli.no_color {
        ConsoleStyle::Plain
    } else {
        ConsoleStyle::Color
    };
    let store = bootstrap::build_store(&settings, style)
        .context("failed to set up the bot server client")?;

    let outcome = match &cli.command {
        Commands::Config(ConfigCommand::Show) => config::show(&store).await,
        Commands::Config(ConfigCommand::Set(args)) => config::set(&store, args).await,
        Commands::Start => bot::start(&store).await,
        Commands::Stop => bot::stop(&store).await,
        Commands::Kill(args) => bot::kill(&store, args).await?,
        Commands::Status => status::status(&store).await,
        Commands::Watch(args) => {
            let period = args
                .interval
                .filter(|secs| *secs > 0)
                .map_or_else(|| settings.poll_interval(), Duration::from_secs);
            status::watch(&store, period).await
        }
    };

    Ok(exit_code(outcome))
}

fn exit_code(outcome: ActionOutcome) -> ExitCode {
    match outcome {
        ActionOutcome::Completed => ExitCode::SUCCESS,
        ActionOutcome::Failed => ExitCode::FAILURE,
    }
}

/// Load the config file, rendering failures as diagnostics.
///
/// A missing file is only an error when it was not the default path.
fn load_config(path: &Path) -> Option<Config> {
    let result = if path == Path::new("config.toml") {
        Config::load_or_default(path)
    } else {
        Config::load(path)
    };

    match result {
        Ok(config) => Some(config),
        Err(err) => {
            report_config_error(path, &err);
            None
        }
    }
}

fn report_config_error(path: &Path, err: &Error) {
    if let Error::Config(ConfigError::ReadFile(io)) = err {
        output::error(&format!("Cannot read {}: {io}", path.display()));
        return;
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match ConfigDiagnostic::from_error(path, &content, err, |key| std::env::var(key).ok()) {
        Some(diagnostic) if !output::is_json() => {
            eprintln!("{:?}", miette::Report::new(diagnostic));
        }
        _ => output::error(&err.to_string()),
    }
}
