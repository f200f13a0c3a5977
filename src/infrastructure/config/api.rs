//! Bot server connection and polling settings.

use serde::Deserialize;

/// Environment variable that overrides [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "METRON_API_URL";

/// Where the bot server lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Origin (optionally with a path prefix) the `/api/...` routes hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Status polling cadence used by `metron watch`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollConfig {
    /// Seconds between status polls (default: 5).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    5
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Operator notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationsConfig {
    /// Print notifications to the terminal.
    #[serde(default = "default_true")]
    pub console: bool,
    /// Also record notifications in the log.
    #[serde(default)]
    pub log: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            console: true,
            log: false,
        }
    }
}
