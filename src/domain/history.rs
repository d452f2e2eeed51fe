use super::countdown::{PersistedCountdownState, COUNTDOWN_KEY};
use crate::persistence::{load_json, KeyValueStore};
use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Display format for history entries, e.g. "Oct 17 2026, 3:04 pm"
const FULL_DATE_FORMAT: &str = "%b %-d %Y, %-I:%M %P";

/// Read-only snapshot of completion times, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    timestamps: Vec<i64>,
}

impl History {
    /// Load once from the store. Refreshing means loading again.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let state: PersistedCountdownState = load_json(store, COUNTDOWN_KEY).unwrap_or_default();
        Self {
            timestamps: state.completed_at_time_stamps,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Raw epoch-ms timestamps
    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.timestamps.iter().copied()
    }

    /// Entries formatted in the given time zone
    pub fn formatted<'a, Tz>(&'a self, tz: &'a Tz) -> impl Iterator<Item = String> + 'a
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.timestamps().map(move |ts| format_timestamp(ts, tz))
    }

    /// Entries formatted in local time
    pub fn formatted_local(&self) -> impl Iterator<Item = String> + '_ {
        self.formatted(&Local)
    }
}

/// Format an epoch-ms timestamp as an absolute date-time
pub fn format_timestamp<Tz>(ts: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.format(FULL_DATE_FORMAT).to_string(),
        None => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{save_json, MemoryStore};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1_792_249_440_000, &Utc), "Oct 17 2026, 3:04 pm");
        assert_eq!(format_timestamp(1_767_605_400_000, &Utc), "Jan 5 2026, 9:30 am");
        assert_eq!(format_timestamp(0, &Utc), "Jan 1 1970, 12:00 am");
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = MemoryStore::new();
        let history = History::load(&store);
        assert!(history.is_empty());
        assert_eq!(history.formatted(&Utc).count(), 0);
    }

    #[test]
    fn test_formatted_keeps_order_and_restarts() {
        let store = MemoryStore::new();
        save_json(
            &store,
            COUNTDOWN_KEY,
            &PersistedCountdownState {
                current_notification_id: None,
                completed_at_time_stamps: vec![1_792_249_440_000, 1_767_605_400_000],
            },
        )
        .unwrap();

        let history = History::load(&store);
        let first: Vec<String> = history.formatted(&Utc).collect();
        let second: Vec<String> = history.formatted(&Utc).collect();

        assert_eq!(
            first,
            vec![
                "Oct 17 2026, 3:04 pm".to_string(),
                "Jan 5 2026, 9:30 am".to_string()
            ]
        );
        assert_eq!(first, second);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_snapshot_ignores_later_writes() {
        let store = MemoryStore::new();
        let history = History::load(&store);

        save_json(
            &store,
            COUNTDOWN_KEY,
            &PersistedCountdownState {
                current_notification_id: None,
                completed_at_time_stamps: vec![1],
            },
        )
        .unwrap();

        assert!(history.is_empty());
        assert_eq!(History::load(&store).len(), 1);
    }
}
