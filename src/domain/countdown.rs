use super::clock::Clock;
use super::enums::Signal;
use super::status::{derive_status, CountdownStatus};
use crate::error::StorageError;
use crate::feedback::FeedbackSink;
use crate::notifications::{NotificationContent, NotificationId, Notifier, Permission};
use crate::persistence::{load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Store key for the countdown record
pub const COUNTDOWN_KEY: &str = "taskly-countdown";

/// Persisted countdown record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCountdownState {
    /// Reminder scheduled by the last completion, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_notification_id: Option<NotificationId>,
    /// Completion times in epoch ms, newest first
    #[serde(default)]
    pub completed_at_time_stamps: Vec<i64>,
}

impl PersistedCountdownState {
    pub fn last_completed(&self) -> Option<i64> {
        self.completed_at_time_stamps.first().copied()
    }

    /// New record with `timestamp` prepended and the reminder replaced
    pub fn with_completion(&self, timestamp: i64, notification: Option<NotificationId>) -> Self {
        let mut stamps = Vec::with_capacity(self.completed_at_time_stamps.len() + 1);
        stamps.push(timestamp);
        stamps.extend_from_slice(&self.completed_at_time_stamps);

        Self {
            current_notification_id: notification,
            completed_at_time_stamps: stamps,
        }
    }
}

/// What happened when the thing was completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub completed_at: i64,
    /// `None` when permission was denied or scheduling failed
    pub notification: Option<NotificationId>,
}

/// The recurring countdown and its completion history
pub struct Countdown {
    state: PersistedCountdownState,
    interval_ms: i64,
    reminder: NotificationContent,
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    notifier: Rc<dyn Notifier>,
    feedback: Rc<dyn FeedbackSink>,
}

impl Countdown {
    /// Read the persisted record; absent means never completed
    pub fn load(
        interval_ms: i64,
        reminder: NotificationContent,
        store: Rc<dyn KeyValueStore>,
        clock: Rc<dyn Clock>,
        notifier: Rc<dyn Notifier>,
        feedback: Rc<dyn FeedbackSink>,
    ) -> Self {
        let state: PersistedCountdownState =
            load_json(store.as_ref(), COUNTDOWN_KEY).unwrap_or_default();
        tracing::info!(
            completions = state.completed_at_time_stamps.len(),
            "loaded countdown"
        );

        Self {
            state,
            interval_ms,
            reminder,
            store,
            clock,
            notifier,
            feedback,
        }
    }

    pub fn state(&self) -> &PersistedCountdownState {
        &self.state
    }

    pub fn last_completed(&self) -> Option<i64> {
        self.state.last_completed()
    }

    /// The recorded reminder and its due time, if it has not fired yet
    pub fn pending_reminder(&self) -> Option<(&str, i64)> {
        let id = self.state.current_notification_id.as_deref()?;
        let due_ms = self.last_completed()?.saturating_add(self.interval_ms);
        (due_ms > self.clock.now_ms()).then_some((id, due_ms))
    }

    pub fn reminder(&self) -> &NotificationContent {
        &self.reminder
    }

    /// Status at the current clock time
    pub fn status(&self) -> CountdownStatus {
        derive_status(self.last_completed(), self.clock.now_ms(), self.interval_ms)
    }

    /// Record a completion and reschedule the reminder.
    ///
    /// The completion is recorded even when no reminder could be scheduled.
    /// On a write failure the new record is still the in-memory state.
    pub fn complete_thing(&mut self) -> Result<Completion, StorageError> {
        let now = self.clock.now_ms();
        self.feedback.emit(Signal::Success);

        if let Some(previous) = &self.state.current_notification_id {
            self.notifier.cancel(previous);
        }

        let notification = match self.notifier.request_permission() {
            Permission::Granted => self.notifier.schedule(
                &self.reminder,
                chrono::Duration::milliseconds(self.interval_ms),
            ),
            Permission::Denied => {
                tracing::warn!("notification permission denied, recording completion only");
                None
            }
        };

        self.state = self.state.with_completion(now, notification.clone());
        tracing::info!(completed_at = now, reminder = ?notification, "thing completed");
        save_json(self.store.as_ref(), COUNTDOWN_KEY, &self.state)?;

        Ok(Completion {
            completed_at: now,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::feedback::RecordingFeedback;
    use crate::notifications::{NotifierCall, RecordingNotifier};
    use crate::persistence::MemoryStore;
    use pretty_assertions::assert_eq;

    const NOW: i64 = 1_792_249_440_000;

    struct Fixture {
        store: Rc<MemoryStore>,
        clock: Rc<FixedClock>,
        notifier: Rc<RecordingNotifier>,
        feedback: Rc<RecordingFeedback>,
    }

    impl Fixture {
        fn new(permission: Permission) -> Self {
            Self {
                store: Rc::new(MemoryStore::new()),
                clock: Rc::new(FixedClock::new(NOW)),
                notifier: Rc::new(RecordingNotifier::new(permission)),
                feedback: Rc::new(RecordingFeedback::default()),
            }
        }

        fn seed(&self, state: &PersistedCountdownState) {
            save_json(self.store.as_ref(), COUNTDOWN_KEY, state).unwrap();
        }

        fn countdown(&self) -> Countdown {
            Countdown::load(
                10_000,
                NotificationContent {
                    title: "Due".to_string(),
                    body: "Now".to_string(),
                },
                self.store.clone(),
                self.clock.clone(),
                self.notifier.clone(),
                self.feedback.clone(),
            )
        }

        fn persisted(&self) -> PersistedCountdownState {
            serde_json::from_str(&self.store.raw(COUNTDOWN_KEY).unwrap()).unwrap()
        }
    }

    #[test]
    fn test_load_absent_is_never_completed() {
        let fx = Fixture::new(Permission::Granted);
        let countdown = fx.countdown();

        assert_eq!(countdown.state(), &PersistedCountdownState::default());
        assert_eq!(countdown.last_completed(), None);
        assert_eq!(fx.store.write_count(), 0);
    }

    #[test]
    fn test_complete_prepends_and_schedules() {
        let fx = Fixture::new(Permission::Granted);
        let mut countdown = fx.countdown();

        let completion = countdown.complete_thing().unwrap();

        assert_eq!(completion.completed_at, NOW);
        assert_eq!(completion.notification.as_deref(), Some("reminder-1"));
        assert_eq!(
            fx.persisted(),
            PersistedCountdownState {
                current_notification_id: Some("reminder-1".to_string()),
                completed_at_time_stamps: vec![NOW],
            }
        );
        assert_eq!(
            *fx.notifier.calls.borrow(),
            vec![
                NotifierCall::RequestPermission,
                NotifierCall::Schedule { delay_ms: 10_000 },
            ]
        );
        assert_eq!(*fx.feedback.signals.borrow(), vec![Signal::Success]);
    }

    #[test]
    fn test_complete_cancels_previous_reminder() {
        let fx = Fixture::new(Permission::Granted);
        fx.seed(&PersistedCountdownState {
            current_notification_id: Some("abc".to_string()),
            completed_at_time_stamps: vec![NOW - 20_000, NOW - 40_000],
        });
        let mut countdown = fx.countdown();

        countdown.complete_thing().unwrap();

        let calls = fx.notifier.calls.borrow();
        assert_eq!(calls[0], NotifierCall::Cancel("abc".to_string()));
        assert!(calls.contains(&NotifierCall::Schedule { delay_ms: 10_000 }));
        assert_eq!(
            fx.persisted().completed_at_time_stamps,
            vec![NOW, NOW - 20_000, NOW - 40_000]
        );
    }

    #[test]
    fn test_permission_denied_still_records_completion() {
        let fx = Fixture::new(Permission::Denied);
        fx.seed(&PersistedCountdownState {
            current_notification_id: Some("old".to_string()),
            completed_at_time_stamps: vec![NOW - 60_000],
        });
        let mut countdown = fx.countdown();

        let completion = countdown.complete_thing().unwrap();

        assert_eq!(completion.notification, None);
        let persisted = fx.persisted();
        assert_eq!(persisted.current_notification_id, None);
        assert_eq!(persisted.completed_at_time_stamps, vec![NOW, NOW - 60_000]);
        assert!(!fx
            .notifier
            .calls
            .borrow()
            .iter()
            .any(|c| matches!(c, NotifierCall::Schedule { .. })));
    }

    #[test]
    fn test_status_follows_latest_completion() {
        let fx = Fixture::new(Permission::Granted);
        let mut countdown = fx.countdown();
        assert!(countdown.status().distance.is_zero());

        countdown.complete_thing().unwrap();
        fx.clock.advance(15_000);

        let status = countdown.status();
        assert!(status.is_overdue);
        assert_eq!(status.distance.seconds, 5);
    }

    #[test]
    fn test_pending_reminder_until_due() {
        let fx = Fixture::new(Permission::Granted);
        let mut countdown = fx.countdown();
        assert_eq!(countdown.pending_reminder(), None);

        countdown.complete_thing().unwrap();
        assert_eq!(
            countdown.pending_reminder(),
            Some(("reminder-1", NOW + 10_000))
        );

        fx.clock.advance(10_000);
        assert_eq!(countdown.pending_reminder(), None);
    }

    #[test]
    fn test_no_pending_reminder_without_id() {
        let fx = Fixture::new(Permission::Denied);
        let mut countdown = fx.countdown();
        countdown.complete_thing().unwrap();

        assert_eq!(countdown.pending_reminder(), None);
    }

    #[test]
    fn test_write_failure_keeps_new_record_in_memory() {
        let fx = Fixture::new(Permission::Granted);
        let mut countdown = fx.countdown();
        fx.store.set_fail_writes(true);

        assert!(countdown.complete_thing().is_err());
        assert_eq!(countdown.last_completed(), Some(NOW));
        assert_eq!(fx.store.raw(COUNTDOWN_KEY), None);
    }

    #[test]
    fn test_repeated_completions_stay_newest_first() {
        let fx = Fixture::new(Permission::Granted);
        let mut countdown = fx.countdown();

        for _ in 0..3 {
            countdown.complete_thing().unwrap();
            fx.clock.advance(1_000);
        }

        assert_eq!(
            countdown.state().completed_at_time_stamps,
            vec![NOW + 2_000, NOW + 1_000, NOW]
        );
        assert_eq!(
            countdown.state().current_notification_id.as_deref(),
            Some("reminder-3")
        );
        let cancels: Vec<NotifierCall> = fx
            .notifier
            .calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, NotifierCall::Cancel(_)))
            .cloned()
            .collect();
        assert_eq!(
            cancels,
            vec![
                NotifierCall::Cancel("reminder-1".to_string()),
                NotifierCall::Cancel("reminder-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_record_json_shape() {
        let state = PersistedCountdownState {
            current_notification_id: Some("n1".to_string()),
            completed_at_time_stamps: vec![2, 1],
        };
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"currentNotificationId":"n1","completedAtTimeStamps":[2,1]}"#
        );

        let bare: PersistedCountdownState =
            serde_json::from_str(r#"{"completedAtTimeStamps":[]}"#).unwrap();
        assert_eq!(bare, PersistedCountdownState::default());
    }
}
