//! Notification Sink: terminal feedback for each submit attempt.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Failure,
}

impl Severity {
    /// Accent color of the toast.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Success => "green",
            Severity::Failure => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Failure,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Fire-and-forget. Implementations must not fail the caller.
pub trait NotificationSink: Send + Sync {
    fn show(&self, notification: Notification);
}

/// Writes notifications to the log. Used by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn show(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => info!(
                color = notification.severity.color(),
                "{}: {}", notification.title, notification.message
            ),
            Severity::Failure => warn!(
                color = notification.severity.color(),
                "{}: {}", notification.title, notification.message
            ),
        }
    }
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    shown: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<Notification> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl NotificationSink for MemorySink {
    fn show(&self, notification: Notification) {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
