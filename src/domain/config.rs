//! Bot configuration as exchanged with the bot server.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Venue class the bot trades on.
///
/// The label set is owned by the server; labels this client does not know
/// are carried through unchanged in [`ExchangeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExchangeKind {
    #[default]
    Crypto,
    Stocks,
    Forex,
    Other(String),
}

impl ExchangeKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Crypto => "crypto",
            Self::Stocks => "stocks",
            Self::Forex => "forex",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for ExchangeKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "crypto" => Self::Crypto,
            "stocks" => Self::Stocks,
            "forex" => Self::Forex,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for ExchangeKind {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<ExchangeKind> for String {
    fn from(kind: ExchangeKind) -> Self {
        match kind {
            ExchangeKind::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision mode the bot runs its strategy in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StrategyMode {
    #[default]
    Hybrid,
    Ai,
    Technical,
    Other(String),
}

impl StrategyMode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Ai => "ai",
            Self::Technical => "technical",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for StrategyMode {
    fn from(label: String) -> Self {
        match label.as_str() {
            "hybrid" => Self::Hybrid,
            "ai" => Self::Ai,
            "technical" => Self::Technical,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for StrategyMode {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<StrategyMode> for String {
    fn from(mode: StrategyMode) -> Self {
        match mode {
            StrategyMode::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StrategyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bot configuration.
///
/// Serialized with the server's camelCase field names. Percentages travel as
/// JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    pub exchange_type: ExchangeKind,
    pub exchange_name: String,
    /// Per-trade risk limit, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_limit: Decimal,
    /// Maximum drawdown before the bot halts, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub max_drawdown: Decimal,
    pub strategy_mode: StrategyMode,
}

impl BotConfig {
    /// Merge a partial update into this configuration.
    ///
    /// Fields left as `None` in the patch keep their current value.
    pub fn apply(&mut self, patch: BotConfigPatch) {
        if let Some(exchange_type) = patch.exchange_type {
            self.exchange_type = exchange_type;
        }
        if let Some(exchange_name) = patch.exchange_name {
            self.exchange_name = exchange_name;
        }
        if let Some(risk_limit) = patch.risk_limit {
            self.risk_limit = risk_limit;
        }
        if let Some(max_drawdown) = patch.max_drawdown {
            self.max_drawdown = max_drawdown;
        }
        if let Some(strategy_mode) = patch.strategy_mode {
            self.strategy_mode = strategy_mode;
        }
    }

    /// Return a copy of this configuration with `patch` merged in.
    #[must_use]
    pub fn merged(mut self, patch: BotConfigPatch) -> Self {
        self.apply(patch);
        self
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            exchange_type: ExchangeKind::Crypto,
            exchange_name: "Binance".to_string(),
            risk_limit: dec!(2),
            max_drawdown: dec!(20),
            strategy_mode: StrategyMode::Hybrid,
        }
    }
}

/// Partial configuration update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotConfigPatch {
    pub exchange_type: Option<ExchangeKind>,
    pub exchange_name: Option<String>,
    pub risk_limit: Option<Decimal>,
    pub max_drawdown: Option<Decimal>,
    pub strategy_mode: Option<StrategyMode>,
}

impl BotConfigPatch {
    /// Whether the patch would leave a configuration unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchange_type.is_none()
            && self.exchange_name.is_none()
            && self.risk_limit.is_none()
            && self.max_drawdown.is_none()
            && self.strategy_mode.is_none()
    }
}
