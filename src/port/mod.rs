//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  (ApiCaller, BotStore)  │
//!                    └────────────┬────────────┘
//!                 ┌───────────────┴───────────────┐
//!                 ▼                               ▼
//!          ┌─────────────┐                 ┌───────────┐
//!          │   BotApi    │                 │ Notifier  │
//!          │ HTTP adapter│                 │  Adapter  │
//!          └─────────────┘                 └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`BotApi`] - REST endpoints of the bot server
//! - [`Notifier`] - Transient success/error notifications

pub mod outbound;

pub use outbound::api::{BotApi, Endpoint, Method};
pub use outbound::notifier::{Notification, NotificationLevel, Notifier};
