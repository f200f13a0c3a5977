//! Terminal notifier.
//!
//! Renders notifications as one-line toasts: successes on stdout, errors on
//! stderr. In JSON mode each toast is a single JSON object per line so
//! scripts can consume them alongside command output.

use std::io::{self, Write};

use owo_colors::{OwoColorize, Stream};
use parking_lot::Mutex;
use serde_json::json;

use crate::port::{Notification, NotificationLevel, Notifier};

/// How [`ConsoleNotifier`] renders toasts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleStyle {
    /// Colored when the stream supports it.
    #[default]
    Color,
    /// No escape codes.
    Plain,
    /// One JSON object per line.
    Json,
}

/// Prints notifications to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    style: ConsoleStyle,
    // serializes toasts from concurrent actions so lines never interleave
    lock: Mutex<()>,
}

impl ConsoleNotifier {
    #[must_use]
    pub fn new(style: ConsoleStyle) -> Self {
        Self {
            style,
            lock: Mutex::new(()),
        }
    }

    /// Render one toast line without trailing newline.
    #[must_use]
    pub fn render(&self, notification: &Notification) -> String {
        let (symbol, stream) = match notification.level {
            NotificationLevel::Success => ("✓", Stream::Stdout),
            NotificationLevel::Error => ("✗", Stream::Stderr),
        };
        match self.style {
            ConsoleStyle::Json => json!({
                "type": "notification",
                "payload": {
                    "level": notification.level.to_string(),
                    "message": notification.message,
                    "at": notification.at.to_rfc3339(),
                },
            })
            .to_string(),
            ConsoleStyle::Plain => format!("{symbol} {}", notification.message),
            ConsoleStyle::Color => match notification.level {
                NotificationLevel::Success => format!(
                    "{} {}",
                    symbol.if_supports_color(stream, |s| s.green()),
                    notification.message
                ),
                NotificationLevel::Error => format!(
                    "{} {}",
                    symbol.if_supports_color(stream, |s| s.red()),
                    notification.message.if_supports_color(stream, |s| s.red())
                ),
            },
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let line = self.render(&notification);
        let _guard = self.lock.lock();
        // A closed pipe must not take the session down with it.
        let _ = match notification.level {
            NotificationLevel::Success => writeln!(io::stdout(), "{line}"),
            NotificationLevel::Error => writeln!(io::stderr(), "{line}"),
        };
    }
}
