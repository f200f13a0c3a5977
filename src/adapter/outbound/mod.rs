//! Outbound adapters: the bot server client and notification sinks.

pub mod http;
pub mod notifier;

pub use http::HttpBotApi;
