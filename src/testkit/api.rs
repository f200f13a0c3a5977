//! Scripted [`BotApi`] for driving the store without a server.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::domain::{BotConfig, BotRunStatus, StatusReport};
use crate::error::ApiError;
use crate::port::{BotApi, Endpoint};

#[derive(Debug, Clone)]
enum Failure {
    Status(u16),
    Decode(String),
}

impl Failure {
    fn into_error(self, endpoint: Endpoint) -> ApiError {
        match self {
            Self::Status(status) => ApiError::Status { endpoint, status },
            Self::Decode(reason) => ApiError::Decode { endpoint, reason },
        }
    }
}

#[derive(Debug)]
struct Script {
    config: BotConfig,
    report: StatusReport,
    failures: HashMap<Endpoint, Failure>,
    calls: Vec<Endpoint>,
    saved: Vec<BotConfig>,
    held: bool,
}

/// In-memory [`BotApi`] whose responses are set up by the test.
///
/// Every endpoint succeeds unless told otherwise. Calls and saved configs
/// are recorded for later assertions.
#[derive(Debug)]
pub struct ScriptedApi {
    script: Mutex<Script>,
    release: Notify,
}

impl ScriptedApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script {
                config: BotConfig::default(),
                report: StatusReport {
                    status: BotRunStatus::Stopped,
                    pnl: rust_decimal::Decimal::ZERO,
                    market_open: true,
                },
                failures: HashMap::new(),
                calls: Vec::new(),
                saved: Vec::new(),
                held: false,
            }),
            release: Notify::new(),
        }
    }

    /// Config returned by `GET /api/config`.
    #[must_use]
    pub fn with_config(self, config: BotConfig) -> Self {
        self.script.lock().config = config;
        self
    }

    /// Report returned by `GET /api/status/`.
    #[must_use]
    pub fn with_report(self, report: StatusReport) -> Self {
        self.script.lock().report = report;
        self
    }

    /// Make `endpoint` answer with a non-success HTTP status.
    pub fn fail(&self, endpoint: Endpoint, status: u16) {
        self.script
            .lock()
            .failures
            .insert(endpoint, Failure::Status(status));
    }

    /// Make `endpoint` answer with a body that cannot be decoded.
    pub fn malformed(&self, endpoint: Endpoint, reason: &str) {
        self.script
            .lock()
            .failures
            .insert(endpoint, Failure::Decode(reason.to_string()));
    }

    /// Let `endpoint` succeed again.
    pub fn recover(&self, endpoint: Endpoint) {
        self.script.lock().failures.remove(&endpoint);
    }

    /// Park every following request until [`ScriptedApi::release`] is called.
    pub fn hold_requests(&self) {
        self.script.lock().held = true;
    }

    /// Let one parked request (or the next one to arrive) proceed.
    pub fn release(&self) {
        self.release.notify_one();
    }

    /// Endpoints called so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Endpoint> {
        self.script.lock().calls.clone()
    }

    /// Bodies received by `POST /api/config`, in order.
    #[must_use]
    pub fn saved_configs(&self) -> Vec<BotConfig> {
        self.script.lock().saved.clone()
    }

    async fn respond(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        let held = {
            let mut script = self.script.lock();
            script.calls.push(endpoint);
            script.held
        };
        if held {
            self.release.notified().await;
        }
        match self.script.lock().failures.get(&endpoint).cloned() {
            Some(failure) => Err(failure.into_error(endpoint)),
            None => Ok(()),
        }
    }
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BotApi for ScriptedApi {
    async fn fetch_config(&self) -> Result<BotConfig, ApiError> {
        self.respond(Endpoint::FetchConfig).await?;
        Ok(self.script.lock().config.clone())
    }

    async fn save_config(&self, config: &BotConfig) -> Result<Value, ApiError> {
        self.script.lock().saved.push(config.clone());
        self.respond(Endpoint::SaveConfig).await?;
        Ok(json!({ "message": "Config saved successfully" }))
    }

    async fn start_bot(&self) -> Result<Value, ApiError> {
        self.respond(Endpoint::StartBot).await?;
        Ok(json!({ "message": "Bot started" }))
    }

    async fn stop_bot(&self) -> Result<Value, ApiError> {
        self.respond(Endpoint::StopBot).await?;
        Ok(json!({ "message": "Bot stopped" }))
    }

    async fn kill_bot(&self) -> Result<Value, ApiError> {
        self.respond(Endpoint::KillBot).await?;
        Ok(json!({ "message": "Kill switch activated" }))
    }

    async fn fetch_status(&self) -> Result<StatusReport, ApiError> {
        self.respond(Endpoint::Status).await?;
        Ok(self.script.lock().report.clone())
    }
}
