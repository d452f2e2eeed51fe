use chrono::Duration;

/// A non-negative duration split into calendar-free units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationParts {
    /// Break down the span from `start` to `end` (epoch ms), largest unit
    /// first. Sub-second remainders are dropped; a reversed span is zero.
    pub fn between(start: i64, end: i64) -> Self {
        let span = Duration::milliseconds(end.saturating_sub(start).max(0));

        let days = span.num_days();
        let span = span - Duration::days(days);
        let hours = span.num_hours();
        let span = span - Duration::hours(hours);
        let minutes = span.num_minutes();
        let span = span - Duration::minutes(minutes);

        Self {
            days,
            hours,
            minutes,
            seconds: span.num_seconds(),
        }
    }

    #[cfg(test)]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Where the recurring deadline stands right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountdownStatus {
    pub is_overdue: bool,
    /// Time left until the deadline, or time past it when overdue
    pub distance: DurationParts,
}

/// Compute the countdown status from the last completion.
///
/// With no completion the deadline is `now` itself, giving a zero,
/// not-overdue status.
pub fn derive_status(last_completed: Option<i64>, now: i64, interval_ms: i64) -> CountdownStatus {
    let target = match last_completed {
        Some(ts) => ts.saturating_add(interval_ms),
        None => now,
    };

    let is_overdue = target < now;
    let distance = if is_overdue {
        DurationParts::between(target, now)
    } else {
        DurationParts::between(now, target)
    };

    CountdownStatus {
        is_overdue,
        distance,
    }
}
