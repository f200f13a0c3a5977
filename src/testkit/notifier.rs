//! Notifier that keeps everything it is told.

use parking_lot::Mutex;

use crate::port::{Notification, NotificationLevel, Notifier};

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    /// Level and message of every notification, timestamps dropped.
    #[must_use]
    pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.received
            .lock()
            .iter()
            .map(|n| (n.level, n.message.clone()))
            .collect()
    }

    #[must_use]
    pub fn success_messages(&self) -> Vec<String> {
        self.with_level(NotificationLevel::Success)
    }

    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.with_level(NotificationLevel::Error)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.received.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.received.lock().is_empty()
    }

    pub fn clear(&self) {
        self.received.lock().clear();
    }

    fn with_level(&self, level: NotificationLevel) -> Vec<String> {
        self.received
            .lock()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().push(notification);
    }
}
