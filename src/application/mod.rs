//! Application services: the notifying call wrapper and the bot store.

pub mod call;
pub mod store;

pub use call::{ApiCaller, CallOptions, TrackedCall, FALLBACK_ERROR_MESSAGE};
pub use store::{ActionOutcome, BotState, BotStore};
