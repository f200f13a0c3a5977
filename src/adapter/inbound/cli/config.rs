//! Handlers for `metron config show` and `metron config set`.

use serde_json::json;

use super::command::ConfigSetArgs;
use super::output;
use crate::application::{ActionOutcome, BotStore};
use crate::domain::BotConfig;

/// Fetch the server configuration and print it.
pub async fn show(store: &BotStore) -> ActionOutcome {
    let outcome = store.fetch_config().await;
    if outcome.is_completed() {
        print_config(&store.config());
    }
    outcome
}

/// Merge the given fields into the server configuration and save it.
///
/// The current server config is fetched first so fields that were not
/// passed keep their server-side value instead of local defaults.
pub async fn set(store: &BotStore, args: &ConfigSetArgs) -> ActionOutcome {
    let patch = args.to_patch();
    if patch.is_empty() {
        output::warning("Nothing to change; pass at least one field flag");
        return ActionOutcome::Failed;
    }

    if !store.fetch_config().await.is_completed() {
        return ActionOutcome::Failed;
    }
    store.set_config(patch);

    let outcome = store.save_config().await;
    if outcome.is_completed() {
        print_config(&store.config());
    }
    outcome
}

fn print_config(config: &BotConfig) {
    if output::is_json() {
        output::emit_json("config", json!(config));
        return;
    }
    output::section("Configuration");
    output::field("Exchange type", &config.exchange_type);
    output::field("Exchange", &config.exchange_name);
    output::field("Risk limit", format!("{}%", config.risk_limit.normalize()));
    output::field("Max drawdown", format!("{}%", config.max_drawdown.normalize()));
    output::field("Strategy", &config.strategy_mode);
}
