//! Implementations of ports (hexagonal adapters).
//!
//! - `inbound` - driving adapters (the operator CLI)
//! - `outbound` - driven adapters (HTTP client, notifiers)

pub mod inbound;
pub mod outbound;
