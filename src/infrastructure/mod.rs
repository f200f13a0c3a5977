//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root: config in, session store out
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
