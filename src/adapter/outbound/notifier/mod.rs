//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for the terminal, for `tracing`,
//! and as a composite that fans out to several notifiers.

mod console;


pub use console::{ConsoleNotifier, ConsoleStyle};

use tracing::{info, warn};

use crate::port::{Notification, NotificationLevel, Notifier};

/// Registry of notifiers (composite pattern).
///
/// Broadcasts each notification to every registered notifier, in
/// registration order.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, notification: Notification) {
        for notifier in &self.notifiers {
            notifier.notify(notification.clone());
        }
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// A logging notifier that records notifications via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                info!(at = %notification.at, message = %notification.message, "Notification");
            }
            NotificationLevel::Error => {
                warn!(at = %notification.at, message = %notification.message, "Notification");
            }
        }
    }
}
