//! Reminder scheduling.
//!
//! The countdown talks to a `Notifier`; the terminal app uses
//! `LocalNotifier`, which keeps scheduled reminders in memory and delivers
//! them from the main loop once they are due.

use crate::domain::Clock;
use chrono::Duration;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Opaque identifier of a scheduled reminder
pub type NotificationId = String;

/// Result of asking to post notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// What a reminder says
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

/// Platform notification service
pub trait Notifier {
    fn request_permission(&self) -> Permission;

    /// Schedule a reminder `delay` from now. `None` if nothing was scheduled.
    fn schedule(&self, content: &NotificationContent, delay: Duration) -> Option<NotificationId>;

    /// Cancel a reminder. Unknown or already delivered ids are ignored.
    fn cancel(&self, id: &str);
}

#[derive(Debug, Clone)]
struct PendingReminder {
    id: NotificationId,
    due_ms: i64,
    content: NotificationContent,
}

/// In-process reminder queue
pub struct LocalNotifier {
    clock: Rc<dyn Clock>,
    enabled: bool,
    pending: RefCell<Vec<PendingReminder>>,
}

impl LocalNotifier {
    pub fn new(clock: Rc<dyn Clock>, enabled: bool) -> Self {
        Self {
            clock,
            enabled,
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Re-arm a reminder scheduled by an earlier run under its original id.
    /// Ignored when notifications are off or the id is already queued.
    pub fn restore(&self, id: &str, due_ms: i64, content: &NotificationContent) -> bool {
        if !self.enabled {
            return false;
        }
        let mut pending = self.pending.borrow_mut();
        if pending.iter().any(|r| r.id == id) {
            return false;
        }
        tracing::debug!(id, due_ms, "restored reminder");
        pending.push(PendingReminder {
            id: id.to_string(),
            due_ms,
            content: content.clone(),
        });
        true
    }

    /// Deliver every reminder whose time has come. Returns how many fired.
    pub fn deliver_due(&self) -> usize {
        let now = self.clock.now_ms();
        let due: Vec<PendingReminder> = {
            let mut pending = self.pending.borrow_mut();
            let (due, waiting): (Vec<_>, Vec<_>) = pending.drain(..).partition(|r| r.due_ms <= now);
            *pending = waiting;
            due
        };

        for reminder in &due {
            tracing::info!(id = %reminder.id, "delivering reminder");
            deliver(&reminder.content);
        }
        due.len()
    }
}

impl Notifier for LocalNotifier {
    fn request_permission(&self) -> Permission {
        if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn schedule(&self, content: &NotificationContent, delay: Duration) -> Option<NotificationId> {
        if !self.enabled {
            return None;
        }

        let id = Uuid::new_v4().to_string();
        let due_ms = self.clock.now_ms().saturating_add(delay.num_milliseconds());
        tracing::debug!(%id, due_ms, "scheduled reminder");
        self.pending.borrow_mut().push(PendingReminder {
            id: id.clone(),
            due_ms,
            content: content.clone(),
        });
        Some(id)
    }

    fn cancel(&self, id: &str) {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|r| r.id != id);
        if pending.len() < before {
            tracing::debug!(id, "cancelled reminder");
        }
    }
}

/// Show a desktop notification
fn deliver(content: &NotificationContent) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            applescript_escape(&content.body),
            applescript_escape(&content.title)
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::warn!(error = %e, "failed to post notification");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        tracing::info!(title = %content.title, body = %content.body, "reminder due");
    }
}

/// Quote text for an AppleScript string literal
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Records every call, with a configurable permission answer
#[cfg(test)]
pub struct RecordingNotifier {
    pub permission: Permission,
    pub calls: RefCell<Vec<NotifierCall>>,
    next_id: std::cell::Cell<u32>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    RequestPermission,
    Schedule { delay_ms: i64 },
    Cancel(String),
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new(permission: Permission) -> Self {
        Self {
            permission,
            calls: RefCell::new(Vec::new()),
            next_id: std::cell::Cell::new(0),
        }
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn request_permission(&self) -> Permission {
        self.calls.borrow_mut().push(NotifierCall::RequestPermission);
        self.permission
    }

    fn schedule(&self, _content: &NotificationContent, delay: Duration) -> Option<NotificationId> {
        self.calls.borrow_mut().push(NotifierCall::Schedule {
            delay_ms: delay.num_milliseconds(),
        });
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        Some(format!("reminder-{}", n))
    }

    fn cancel(&self, id: &str) {
        self.calls.borrow_mut().push(NotifierCall::Cancel(id.to_string()));
    }
}
