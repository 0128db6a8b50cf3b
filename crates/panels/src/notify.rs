//! User-visible notifications, the terminal's toasts.

use parking_lot::Mutex;
use std::{fmt, sync::Arc};
use stxdesk_common::{sh_eprintln, sh_println};
use yansi::Paint;

/// Whether an action succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A transient message describing the outcome of one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: Level::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: Level::Error, message: message.into() }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

/// Receives the notifications emitted by panels.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to the terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellNotifier;

impl Notifier for ShellNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => {
                info!(message = %notification.message, "notification");
                let _ = sh_println!("{} {}", "✔".green().bold(), notification.message);
            }
            Level::Error => {
                warn!(message = %notification.message, "notification");
                let _ = sh_eprintln!("{} {}", "✘".red().bold(), notification.message.red());
            }
        }
    }
}

/// Keeps every notification in memory.
#[derive(Clone, Debug, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    /// The messages of all notifications so far.
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|n| n.message.clone()).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries.lock().push(notification);
    }
}

