//! Bot server port.
//!
//! One method per REST endpoint the dashboard consumes. Implementations
//! perform exactly one attempt per call: no retries, no timeout.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{BotConfig, StatusReport};
use crate::error::ApiError;

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Fixed set of server endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    FetchConfig,
    SaveConfig,
    StartBot,
    StopBot,
    KillBot,
    Status,
}

impl Endpoint {
    /// Path relative to the server origin.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::FetchConfig | Self::SaveConfig => "/api/config",
            Self::StartBot => "/api/bot/start",
            Self::StopBot => "/api/bot/stop",
            Self::KillBot => "/api/bot/kill",
            // trailing slash is part of the server route
            Self::Status => "/api/status/",
        }
    }

    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::FetchConfig | Self::Status => Method::Get,
            Self::SaveConfig | Self::StartBot | Self::StopBot | Self::KillBot => Method::Post,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method().as_str(), self.path())
    }
}

/// REST API of the bot server.
///
/// Responses of the control endpoints carry no state the client relies on;
/// they are returned as raw JSON.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// `GET /api/config`
    async fn fetch_config(&self) -> Result<BotConfig, ApiError>;

    /// `POST /api/config`
    async fn save_config(&self, config: &BotConfig) -> Result<Value, ApiError>;

    /// `POST /api/bot/start`
    async fn start_bot(&self) -> Result<Value, ApiError>;

    /// `POST /api/bot/stop`
    async fn stop_bot(&self) -> Result<Value, ApiError>;

    /// `POST /api/bot/kill`
    async fn kill_bot(&self) -> Result<Value, ApiError>;

    /// `GET /api/status/`
    async fn fetch_status(&self) -> Result<StatusReport, ApiError>;
}
