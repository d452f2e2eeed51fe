use crate::domain::{
    Clock, Countdown, CountdownStatus, History, ShoppingList, Signal, Tab, UiMode,
};
use crate::error::StorageError;
use crate::feedback::TerminalFeedback;
use crate::notifications::{LocalNotifier, NotificationContent};
use crate::persistence::{KeyValueStore, Settings};
use crate::ticker::{RepeatingTask, STATUS_PERIOD};
use std::rc::Rc;
use std::time::Instant;

/// Main application state
pub struct AppState {
    pub tab: Tab,
    pub ui_mode: UiMode,
    pub shopping: ShoppingList,
    pub countdown: Countdown,
    /// Last computed countdown status, refreshed by `status_task`
    pub status: CountdownStatus,
    /// Snapshot shown by the history view
    pub history: Option<History>,
    /// Pending text of the shopping list input field
    pub input: String,
    pub selected_index: usize,
    /// Item awaiting delete confirmation
    pub pending_delete: Option<String>,
    /// Notice shown in the status bar until the next action
    pub message: Option<String>,
    pub history_scroll_offset: usize,
    status_task: RepeatingTask,
    store: Rc<dyn KeyValueStore>,
    notifier: Rc<LocalNotifier>,
    feedback: Rc<TerminalFeedback>,
}

impl AppState {
    pub fn new(settings: &Settings, store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        let notifier = Rc::new(LocalNotifier::new(clock.clone(), settings.notifications_enabled));
        let feedback = Rc::new(TerminalFeedback::new());

        let shopping = ShoppingList::load(store.clone(), clock.clone(), feedback.clone());
        let countdown = Countdown::load(
            settings.interval_ms(),
            NotificationContent {
                title: settings.reminder_title.clone(),
                body: settings.reminder_body.clone(),
            },
            store.clone(),
            clock,
            notifier.clone(),
            feedback.clone(),
        );
        let status = countdown.status();

        if let Some((id, due_ms)) = countdown.pending_reminder() {
            if notifier.restore(id, due_ms, countdown.reminder()) {
                tracing::info!(id, due_ms, "re-armed reminder from last run");
            }
        }

        Self {
            tab: Tab::ShoppingList,
            ui_mode: UiMode::Normal,
            shopping,
            countdown,
            status,
            history: None,
            input: String::new(),
            selected_index: 0,
            pending_delete: None,
            message: None,
            history_scroll_offset: 0,
            status_task: RepeatingTask::new(STATUS_PERIOD),
            store,
            notifier,
            feedback,
        }
    }

    /// Advance timers: recompute the countdown and deliver due reminders
    pub fn tick(&mut self, now: Instant) {
        if self.status_task.poll(now) {
            self.refresh_status();
        }
        self.notifier.deliver_due();
    }

    pub fn refresh_status(&mut self) {
        self.status = self.countdown.status();
    }

    #[cfg(test)]
    pub fn is_status_ticking(&self) -> bool {
        self.status_task.is_running()
    }

    /// Feedback signal to flash right now
    pub fn active_signal(&self, now: Instant) -> Option<Signal> {
        self.feedback.active(now)
    }

    pub fn pending_reminders(&self) -> usize {
        self.notifier.pending_count()
    }

    fn report(&mut self, result: Result<bool, StorageError>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist change");
            let prefix = if e.is_write_failure() {
                "Could not save"
            } else {
                "Storage error"
            };
            self.message = Some(format!("{}: {}", prefix, e));
        }
    }

    // Navigation

    pub fn set_tab(&mut self, tab: Tab, now: Instant) {
        if tab == self.tab {
            return;
        }
        if self.tab == Tab::Counter {
            self.status_task.stop();
            self.close_history();
        }
        self.tab = tab;
        self.ui_mode = UiMode::Normal;
        if tab == Tab::Counter {
            self.refresh_status();
            self.status_task.start(now);
        }
    }

    pub fn next_tab(&mut self, now: Instant) {
        self.set_tab(self.tab.next(), now);
    }

    pub fn previous_tab(&mut self, now: Instant) {
        self.set_tab(self.tab.previous(), now);
    }

    /// Release the recurring status task when the app is torn down
    pub fn shutdown(&mut self) {
        if self.status_task.stop() {
            tracing::debug!("stopped status task");
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.shopping.len() {
            self.selected_index += 1;
        }
    }

    pub fn selected_item_id(&self) -> Option<String> {
        self.shopping
            .items()
            .get(self.selected_index)
            .map(|item| item.id.clone())
    }

    fn clamp_selection(&mut self) {
        if self.shopping.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.shopping.len() {
            self.selected_index = self.shopping.len() - 1;
        }
    }

    // Shopping list input

    pub fn start_editing(&mut self) {
        self.message = None;
        self.ui_mode = UiMode::Editing;
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Add the typed item. The field is cleared either way.
    pub fn submit_input(&mut self) {
        let name = std::mem::take(&mut self.input);
        let result = self.shopping.add(&name);
        if matches!(result, Ok(true) | Err(_)) {
            self.selected_index = 0;
        }
        self.report(result);
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_editing(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::Normal;
    }

    // Shopping list actions

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_item_id() else {
            return;
        };
        self.message = None;
        let result = self.shopping.toggle_complete(&id);
        self.report(result);

        if let Some(index) = self.shopping.items().iter().position(|item| item.id == id) {
            self.selected_index = index;
        }
    }

    /// Ask for confirmation before deleting the selected item
    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_item_id() {
            self.pending_delete = Some(id);
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    /// Name of the item awaiting confirmation
    pub fn pending_delete_name(&self) -> Option<&str> {
        let id = self.pending_delete.as_deref()?;
        self.shopping.get(id).map(|item| item.name.as_str())
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.message = None;
            let result = self.shopping.delete(&id);
            self.report(result);
            self.clamp_selection();
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.ui_mode = UiMode::Normal;
    }

    // Counter actions

    pub fn complete_thing(&mut self) {
        self.message = None;
        match self.countdown.complete_thing() {
            Ok(completion) => {
                if completion.notification.is_none() {
                    self.message = Some(
                        "Unable to schedule notification: notifications are disabled in settings"
                            .to_string(),
                    );
                }
            }
            Err(e) => self.report(Err(e)),
        }
        self.refresh_status();
    }

    pub fn open_history(&mut self) {
        self.history = Some(History::load(self.store.as_ref()));
        self.history_scroll_offset = 0;
        self.ui_mode = UiMode::History;
    }

    pub fn close_history(&mut self) {
        self.history = None;
        if self.ui_mode == UiMode::History {
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn scroll_history_up(&mut self) {
        if self.history_scroll_offset > 0 {
            self.history_scroll_offset -= 1;
        }
    }

    pub fn scroll_history_down(&mut self) {
        let len = self.history.as_ref().map_or(0, History::len);
        if self.history_scroll_offset + 1 < len {
            self.history_scroll_offset += 1;
        }
    }
}
