//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod api;
pub mod notifier;
