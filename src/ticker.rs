use std::time::{Duration, Instant};

/// Default event poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Period of the countdown status recomputation
pub const STATUS_PERIOD: Duration = Duration::from_secs(1);

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// A fixed-period task driven by the main loop.
///
/// `start` arms it, `poll` reports whether a period has elapsed, `stop`
/// disarms it. Stopping an idle task does nothing.
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    period: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTask {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arm the task; the first firing is one period from `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Disarm the task. Returns true if it was running.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// True once per elapsed period. Missed periods collapse into one firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_idle_task_never_fires() {
        let mut task = RepeatingTask::new(STATUS_PERIOD);
        let now = Instant::now();
        assert!(!task.is_running());
        assert!(!task.poll(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut task = RepeatingTask::new(STATUS_PERIOD);
        let start = Instant::now();
        task.start(start);

        assert!(!task.poll(start + Duration::from_millis(999)));
        assert!(task.poll(start + Duration::from_millis(1000)));
        assert!(!task.poll(start + Duration::from_millis(1500)));
        assert!(task.poll(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_missed_periods_collapse() {
        let mut task = RepeatingTask::new(STATUS_PERIOD);
        let start = Instant::now();
        task.start(start);

        assert!(task.poll(start + Duration::from_secs(5)));
        assert!(!task.poll(start + Duration::from_millis(5500)));
        assert!(task.poll(start + Duration::from_secs(6)));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut task = RepeatingTask::new(STATUS_PERIOD);
        let start = Instant::now();
        task.start(start);

        assert!(task.stop());
        assert!(!task.stop());
        assert!(!task.poll(start + Duration::from_secs(3)));
    }
}
