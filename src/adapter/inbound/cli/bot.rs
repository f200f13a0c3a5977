//! Handlers for `metron start`, `metron stop`, and `metron kill`.

use dialoguer::Confirm;

use super::command::KillArgs;
use super::output;
use crate::application::{ActionOutcome, BotStore};
use crate::error::Result;

pub async fn start(store: &BotStore) -> ActionOutcome {
    store.start_bot().await
}

pub async fn stop(store: &BotStore) -> ActionOutcome {
    store.stop_bot().await
}

/// Trigger the kill switch, asking first unless `--yes` was given.
pub async fn kill(store: &BotStore, args: &KillArgs) -> Result<ActionOutcome> {
    if !args.yes {
        if output::is_json() {
            output::error("Refusing to kill without confirmation; pass --yes");
            return Ok(ActionOutcome::Failed);
        }
        let confirmed = Confirm::new()
            .with_prompt("Activate the kill switch? The bot halts immediately")
            .default(false)
            .interact()?;
        if !confirmed {
            output::note("Kill switch not activated");
            return Ok(ActionOutcome::Failed);
        }
    }
    Ok(store.kill_bot().await)
}
