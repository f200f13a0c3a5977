//! Observable bot state for one operator session.
//!
//! [`BotStore`] holds the last-known configuration and run status of the
//! remote bot. Each action performs one round trip through the shared
//! [`ApiCaller`] and folds the response into the state. Observers receive
//! every change through a `tokio::sync::watch` channel.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use super::call::{ApiCaller, CallOptions};
use crate::domain::{BotConfig, BotConfigPatch, BotRunStatus, StatusReport};
use crate::port::{BotApi, Notifier};

/// Snapshot of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotState {
    pub config: BotConfig,
    pub status: BotRunStatus,
    pub pnl: Decimal,
    pub market_open: bool,
    /// A config fetch or save is in flight.
    pub loading_config: bool,
    /// A start, stop, or kill request is in flight.
    pub loading_bot: bool,
}

impl Default for BotState {
    fn default() -> Self {
        Self {
            config: BotConfig::default(),
            status: BotRunStatus::Stopped,
            pnl: Decimal::ZERO,
            market_open: true,
            loading_config: false,
            loading_bot: false,
        }
    }
}

/// Whether an action's request went through.
///
/// Failures have already been notified and logged by the time an action
/// returns; this only lets callers pick an exit code or similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    Failed,
}

impl ActionOutcome {
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    fn of<T, E>(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            Self::Completed
        } else {
            Self::Failed
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum LoadingFlag {
    Config,
    Bot,
}

impl LoadingFlag {
    fn slot(self, state: &mut BotState) -> &mut bool {
        match self {
            Self::Config => &mut state.loading_config,
            Self::Bot => &mut state.loading_bot,
        }
    }
}

/// Clears a loading flag when dropped, whether the action finished or its
/// future was dropped mid-flight.
struct Loading<'a> {
    state: &'a watch::Sender<BotState>,
    flag: LoadingFlag,
}

impl<'a> Loading<'a> {
    fn raise(state: &'a watch::Sender<BotState>, flag: LoadingFlag) -> Self {
        state.send_modify(|s| *flag.slot(s) = true);
        Self { state, flag }
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        let flag = self.flag;
        self.state.send_modify(|s| *flag.slot(s) = false);
    }
}

/// Puts the status back to `stopped` if a start request is dropped before it
/// settles.
struct PendingStart<'a> {
    state: &'a watch::Sender<BotState>,
    armed: bool,
}

impl<'a> PendingStart<'a> {
    fn begin(state: &'a watch::Sender<BotState>) -> Self {
        state.send_modify(|s| s.status = BotRunStatus::Initializing);
        Self { state, armed: true }
    }

    fn settle(mut self, status: BotRunStatus) {
        self.armed = false;
        self.state.send_modify(|s| s.status = status);
    }
}

impl Drop for PendingStart<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(|s| s.status = BotRunStatus::Stopped);
        }
    }
}

/// Session-scoped bot state container.
///
/// Construct one per operator session and share it by reference or `Arc`.
/// Concurrent actions are not coordinated: whichever response lands last
/// wins, and the loading flags are advisory only.
pub struct BotStore {
    api: Arc<dyn BotApi>,
    caller: ApiCaller,
    state: watch::Sender<BotState>,
}

impl BotStore {
    /// Create a store with default session state.
    pub fn new(api: Arc<dyn BotApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_state(api, notifier, BotState::default())
    }

    /// Create a store seeded with `initial` state.
    pub fn with_state(
        api: Arc<dyn BotApi>,
        notifier: Arc<dyn Notifier>,
        initial: BotState,
    ) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            api,
            caller: ApiCaller::new(notifier),
            state,
        }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> BotState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BotState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn config(&self) -> BotConfig {
        self.state.borrow().config.clone()
    }

    #[must_use]
    pub fn status(&self) -> BotRunStatus {
        self.state.borrow().status
    }

    #[must_use]
    pub fn pnl(&self) -> Decimal {
        self.state.borrow().pnl
    }

    #[must_use]
    pub fn is_market_open(&self) -> bool {
        self.state.borrow().market_open
    }

    #[must_use]
    pub fn is_loading_config(&self) -> bool {
        self.state.borrow().loading_config
    }

    #[must_use]
    pub fn is_loading_bot(&self) -> bool {
        self.state.borrow().loading_bot
    }

    /// Merge a partial configuration into the local config.
    pub fn set_config(&self, patch: BotConfigPatch) {
        self.state.send_modify(|s| s.config.apply(patch));
    }

    /// Replace the local config wholesale.
    pub fn replace_config(&self, config: BotConfig) {
        self.state.send_modify(|s| s.config = config);
    }

    pub fn set_status(&self, status: BotRunStatus) {
        self.state.send_modify(|s| s.status = status);
    }

    pub fn set_pnl(&self, pnl: Decimal) {
        self.state.send_modify(|s| s.pnl = pnl);
    }

    pub fn set_market_open(&self, open: bool) {
        self.state.send_modify(|s| s.market_open = open);
    }

    /// Load the server's configuration and replace the local one with it.
    pub async fn fetch_config(&self) -> ActionOutcome {
        let _loading = Loading::raise(&self.state, LoadingFlag::Config);

        let result = self
            .caller
            .execute(
                || self.api.fetch_config(),
                CallOptions::new().error_message("Failed to load config"),
            )
            .await;

        if let Ok(config) = &result {
            debug!(exchange = %config.exchange_name, "Config loaded");
            self.replace_config(config.clone());
        }
        ActionOutcome::of(&result)
    }

    /// Send the local configuration to the server. Local state is untouched.
    pub async fn save_config(&self) -> ActionOutcome {
        let _loading = Loading::raise(&self.state, LoadingFlag::Config);
        let config = self.config();

        let result = self
            .caller
            .execute(
                || self.api.save_config(&config),
                CallOptions::new()
                    .success_message("Config saved successfully!")
                    .error_message("Failed to save config"),
            )
            .await;

        ActionOutcome::of(&result)
    }

    /// Start the bot.
    ///
    /// Status reads `initializing` while the request is in flight, then
    /// `running` on success or back to `stopped` on failure. A start that is
    /// dropped mid-request also ends at `stopped`.
    pub async fn start_bot(&self) -> ActionOutcome {
        let _loading = Loading::raise(&self.state, LoadingFlag::Bot);
        let pending = PendingStart::begin(&self.state);

        let result = self
            .caller
            .execute(
                || self.api.start_bot(),
                CallOptions::new()
                    .success_message("Bot started successfully!")
                    .error_message("Failed to start bot"),
            )
            .await;

        let status = if result.is_ok() {
            BotRunStatus::Running
        } else {
            BotRunStatus::Stopped
        };
        pending.settle(status);
        info!(status = %status, "Start request settled");
        ActionOutcome::of(&result)
    }

    /// Stop the bot gracefully.
    pub async fn stop_bot(&self) -> ActionOutcome {
        let _loading = Loading::raise(&self.state, LoadingFlag::Bot);

        let result = self
            .caller
            .execute(
                || self.api.stop_bot(),
                CallOptions::new()
                    .success_message("Bot stopped")
                    .error_message("Failed to stop bot"),
            )
            .await;

        if result.is_ok() {
            self.set_status(BotRunStatus::Stopped);
        }
        ActionOutcome::of(&result)
    }

    /// Trigger the server's kill switch.
    pub async fn kill_bot(&self) -> ActionOutcome {
        let _loading = Loading::raise(&self.state, LoadingFlag::Bot);

        let result = self
            .caller
            .execute(
                || self.api.kill_bot(),
                CallOptions::new()
                    .success_message("Kill switch activated!")
                    .error_message("Kill switch failed")
                    .on_success(|| self.set_status(BotRunStatus::Stopped)),
            )
            .await;

        ActionOutcome::of(&result)
    }

    /// Refresh status, PnL, and market-open flag from the server.
    ///
    /// Meant to be called on a timer, so failures are logged but never
    /// notified. State is left unchanged on failure.
    pub async fn poll_status(&self) -> ActionOutcome {
        let result = self
            .caller
            .execute(|| self.api.fetch_status(), CallOptions::silent())
            .await;

        if let Ok(report) = &result {
            self.apply_report(report);
        }
        ActionOutcome::of(&result)
    }

    fn apply_report(&self, report: &StatusReport) {
        self.state.send_modify(|s| {
            s.status = report.status;
            s.pnl = report.pnl;
            s.market_open = report.market_open;
        });
    }
}
