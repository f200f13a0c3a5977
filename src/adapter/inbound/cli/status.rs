//! Handlers for `metron status` and `metron watch`.

use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use super::output;
use crate::application::{ActionOutcome, BotState, BotStore};
use crate::domain::BotRunStatus;

/// Poll once and print the result.
///
/// The poll itself never notifies, so a failure is reported here.
pub async fn status(store: &BotStore) -> ActionOutcome {
    let outcome = store.poll_status().await;
    if outcome.is_completed() {
        print_status(&store.snapshot());
    } else {
        output::error("Could not fetch bot status");
    }
    outcome
}

/// Fields of the state that `watch` reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reading {
    status: BotRunStatus,
    pnl: Decimal,
    market_open: bool,
}

impl From<&BotState> for Reading {
    fn from(state: &BotState) -> Self {
        Self {
            status: state.status,
            pnl: state.pnl,
            market_open: state.market_open,
        }
    }
}

/// Poll every `period` until Ctrl-C, printing each change.
///
/// A streak of failed polls is reported once when it starts and once when
/// it ends; individual failures stay in the log.
pub async fn watch(store: &BotStore, period: Duration) -> ActionOutcome {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last: Option<Reading> = None;
    let mut failing = false;

    info!(interval_secs = period.as_secs(), "Watching bot status");
    output::note("Press Ctrl-C to stop");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let outcome = store.poll_status().await;
                match (outcome, failing) {
                    (ActionOutcome::Failed, false) => {
                        failing = true;
                        output::warning("Status polling is failing; retrying on the next tick");
                    }
                    (ActionOutcome::Completed, true) => {
                        failing = false;
                        output::note("Status polling recovered");
                    }
                    _ => {}
                }
                if outcome.is_completed() {
                    let state = store.snapshot();
                    let reading = Reading::from(&state);
                    if last.as_ref() != Some(&reading) {
                        print_status(&state);
                        last = Some(reading);
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    ActionOutcome::Completed
}

fn print_status(state: &BotState) {
    if output::is_json() {
        output::emit_json(
            "status",
            json!({
                "status": state.status,
                "pnl": state.pnl.to_string(),
                "market_open": state.market_open,
            }),
        );
        return;
    }

    output::section("Bot");
    let status = match state.status {
        BotRunStatus::Running => output::positive(state.status),
        BotRunStatus::Error => output::negative(state.status),
        other => output::highlight(other),
    };
    output::field("Status", status);

    let pnl = state.pnl.normalize();
    let pnl = if pnl.is_sign_negative() {
        output::negative(pnl)
    } else {
        output::positive(pnl)
    };
    output::field("PnL", pnl);
    output::field("Market", if state.market_open { "open" } else { "closed" });
}
