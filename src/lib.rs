//! Metron - operator client for a remote trading bot.
//!
//! This crate keeps the last-known configuration and run status of a bot
//! server in one observable store, and exposes the server's REST actions
//! (config, start, stop, kill, status) through a wrapper that turns every
//! outcome into a user-facing notification.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Bot configuration and run-status types
//! - **`port`** - The `BotApi` and `Notifier` traits
//! - **`application`** - `ApiCaller` (notifying call wrapper) and `BotStore`
//! - **`adapter`** - reqwest-backed `HttpBotApi`, console notifiers, the CLI
//! - **`infrastructure`** - TOML configuration, logging, and wiring
//!
//! # Features
//!
//! - `testkit` - Scripted API and recording notifier for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use metron::adapter::outbound::notifier::NullNotifier;
//! use metron::adapter::outbound::HttpBotApi;
//! use metron::application::BotStore;
//!
//! # async fn run() -> metron::error::Result<()> {
//! let api = HttpBotApi::new("http://localhost:8000")?;
//! let store = BotStore::new(Arc::new(api), Arc::new(NullNotifier));
//!
//! store.poll_status().await;
//! println!("bot is {}", store.status());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
