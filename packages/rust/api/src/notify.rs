//! User notification capability.
//!
//! The API layer reports outcomes (deletions, failed calls) through an
//! injected [`Notifier`] rather than a concrete UI, so frontends decide how
//! to render them and tests can record them.

use std::sync::Mutex;

/// Default dismiss label shown on notifications.
pub const DISMISS_LABEL: &str = "Ok";

/// A single user-facing notification.
///
/// `duration_ms = 0` means the notification persists until the user
/// dismisses it; anything else auto-dismisses after that many milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub dismiss_label: String,
    pub duration_ms: u64,
}

impl Notification {
    /// A notification that auto-dismisses after `duration_ms` milliseconds.
    pub fn transient(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            message: message.into(),
            dismiss_label: DISMISS_LABEL.into(),
            duration_ms,
        }
    }

    /// A notification that persists until the user dismisses it.
    /// Used for errors the user may need to act on.
    pub fn sticky(message: impl Into<String>) -> Self {
        Self::transient(message, 0)
    }

    /// Whether this notification persists until dismissed.
    pub fn is_sticky(&self) -> bool {
        self.duration_ms == 0
    }
}

/// Sink for user-facing notifications. Fire-and-forget, append-only.
pub trait Notifier: Send + Sync {
    fn notify(&self, note: Notification);
}

/// Default notifier that forwards notifications to `tracing`.
///
/// Persistent (actionable) notifications log at `warn`, transient success
/// notices at `info`.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, note: Notification) {
        if note.is_sticky() {
            tracing::warn!(message = %note.message, "notification");
        } else {
            tracing::info!(
                message = %note.message,
                duration_ms = note.duration_ms,
                "notification"
            );
        }
    }
}

/// Notifier that records every notification, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notes: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications recorded so far, in order.
    pub fn notes(&self) -> Vec<Notification> {
        self.notes.lock().expect("notifier lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, note: Notification) {
        self.notes.lock().expect("notifier lock poisoned").push(note);
    }
}
