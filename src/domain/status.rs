//! Bot run status and the server's status report.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Run status of the remote bot.
///
/// `Initializing` is an optimistic placeholder set locally while a start
/// request is in flight. `Error` is only ever taken from a status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotRunStatus {
    Initializing,
    Running,
    #[default]
    Stopped,
    Error,
}

impl BotRunStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Error => "error",
        }
    }

    /// Whether the bot is running or about to be.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Initializing | Self::Running)
    }
}

impl fmt::Display for BotRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET /api/status/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(rename = "botStatus")]
    pub status: BotRunStatus,
    #[serde(rename = "pnL", with = "rust_decimal::serde::float")]
    pub pnl: Decimal,
    #[serde(rename = "marketOpen")]
    pub market_open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_status_is_stopped() {
        assert_eq!(BotRunStatus::default(), BotRunStatus::Stopped);
    }

    #[test]
    fn active_states() {
        assert!(BotRunStatus::Initializing.is_active());
        assert!(BotRunStatus::Running.is_active());
        assert!(!BotRunStatus::Stopped.is_active());
        assert!(!BotRunStatus::Error.is_active());
    }

    #[test]
    fn parses_status_report() {
        let json = r#"{"botStatus": "running", "pnL": -12.5, "marketOpen": false}"#;
        let report: StatusReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.status, BotRunStatus::Running);
        assert_eq!(report.pnl, dec!(-12.5));
        assert!(!report.market_open);
    }

    #[test]
    fn error_status_parses_from_report() {
        let json = r#"{"botStatus": "error", "pnL": 0, "marketOpen": true}"#;
        let report: StatusReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.status, BotRunStatus::Error);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{"botStatus": "paused", "pnL": 0, "marketOpen": true}"#;
        assert!(serde_json::from_str::<StatusReport>(json).is_err());
    }
}
