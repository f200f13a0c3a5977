//! Bot domain types shared by the store, the ports, and the CLI.

mod config;
mod status;

pub use config::{BotConfig, BotConfigPatch, ExchangeKind, StrategyMode};
pub use status::{BotRunStatus, StatusReport};
