//! Command-line interface definitions.
//!
//! Defines the CLI structure for the metron operator client using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::{BotConfigPatch, ExchangeKind, StrategyMode};

/// Operator client for a remote trading bot
#[derive(Parser, Debug)]
#[command(name = "metron")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the bot configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Start the bot
    Start,

    /// Stop the bot gracefully
    Stop,

    /// Trigger the kill switch
    Kill(KillArgs),

    /// Show bot status, PnL, and market state
    Status,

    /// Poll status until interrupted, printing every change
    Watch(WatchArgs),
}

/// Subcommands for `metron config`
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Fetch and print the server configuration
    Show,
    /// Change configuration fields and save them to the server
    Set(ConfigSetArgs),
}

/// Arguments for `metron config set`. Omitted fields keep the server value.
#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Venue class (crypto, stocks, forex, ...)
    #[arg(long)]
    pub exchange_type: Option<String>,

    /// Exchange name (e.g. Binance)
    #[arg(long)]
    pub exchange_name: Option<String>,

    /// Per-trade risk limit in percent
    #[arg(long)]
    pub risk_limit: Option<Decimal>,

    /// Maximum drawdown in percent
    #[arg(long)]
    pub max_drawdown: Option<Decimal>,

    /// Strategy mode (hybrid, ai, technical, ...)
    #[arg(long)]
    pub strategy_mode: Option<String>,
}

impl ConfigSetArgs {
    /// Convert the flags into a config patch.
    #[must_use]
    pub fn to_patch(&self) -> BotConfigPatch {
        BotConfigPatch {
            exchange_type: self.exchange_type.as_deref().map(ExchangeKind::from),
            exchange_name: self.exchange_name.clone(),
            risk_limit: self.risk_limit,
            max_drawdown: self.max_drawdown,
            strategy_mode: self.strategy_mode.as_deref().map(StrategyMode::from),
        }
    }
}

/// Arguments for `metron kill`.
#[derive(Args, Debug)]
pub struct KillArgs {
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for `metron watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between polls (defaults to [poll] interval_secs)
    #[arg(long)]
    pub interval: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_config_set_flags() {
        let cli = Cli::try_parse_from([
            "metron",
            "config",
            "set",
            "--risk-limit",
            "1.5",
            "--strategy-mode",
            "ai",
        ])
        .unwrap();

        let Commands::Config(ConfigCommand::Set(args)) = cli.command else {
            panic!("expected config set");
        };
        let patch = args.to_patch();
        assert_eq!(patch.risk_limit, Some(dec!(1.5)));
        assert_eq!(patch.strategy_mode, Some(StrategyMode::Ai));
        assert!(patch.exchange_name.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["metron", "status", "--json", "-c", "other.toml"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn kill_accepts_yes_flag() {
        let cli = Cli::try_parse_from(["metron", "kill", "--yes"]).unwrap();
        assert!(matches!(cli.command, Commands::Kill(KillArgs { yes: true })));
    }
}
