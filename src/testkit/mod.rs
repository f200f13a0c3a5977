//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`api`] - `ScriptedApi`, an in-memory [`BotApi`](crate::port::BotApi)
//!   with per-endpoint failures and request holding.
//! - [`notifier`] - `RecordingNotifier`, which keeps every notification.

pub mod api;
pub mod notifier;
