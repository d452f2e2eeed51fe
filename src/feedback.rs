use crate::domain::Signal;
use std::cell::Cell;
use std::time::{Duration, Instant};

/// How long a signal stays visible in the status bar
const FLASH_DURATION: Duration = Duration::from_millis(1200);

/// Receiver of tactile/audible feedback signals
pub trait FeedbackSink {
    fn emit(&self, signal: Signal);
}

/// Terminal feedback: a short status-bar flash
#[derive(Debug, Default)]
pub struct TerminalFeedback {
    last: Cell<Option<(Signal, Instant)>>,
}

impl TerminalFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal to display right now, if one is still fresh
    pub fn active(&self, now: Instant) -> Option<Signal> {
        match self.last.get() {
            Some((signal, at)) if now.duration_since(at) < FLASH_DURATION => Some(signal),
            _ => None,
        }
    }
}

impl FeedbackSink for TerminalFeedback {
    fn emit(&self, signal: Signal) {
        tracing::debug!(?signal, "feedback");
        self.last.set(Some((signal, Instant::now())));
    }
}

/// Records every signal
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub signals: std::cell::RefCell<Vec<Signal>>,
}

#[cfg(test)]
impl FeedbackSink for RecordingFeedback {
    fn emit(&self, signal: Signal) {
        self.signals.borrow_mut().push(signal);
    }
}
