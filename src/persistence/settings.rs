use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_COUNTDOWN_INTERVAL_SECS: u64 = 10;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of the recurring deadline after each completion
    pub countdown_interval_secs: u64,
    /// When false, reminder permission is always denied
    pub notifications_enabled: bool,
    pub reminder_title: String,
    pub reminder_body: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            countdown_interval_secs: DEFAULT_COUNTDOWN_INTERVAL_SECS,
            notifications_enabled: true,
            reminder_title: "The thing is due 👍".to_string(),
            reminder_body: "This is a test notification".to_string(),
        }
    }
}

impl Settings {
    /// Fixed interval in epoch milliseconds
    pub fn interval_ms(&self) -> i64 {
        i64::try_from(self.countdown_interval_secs)
            .unwrap_or(i64::MAX / 1000)
            .saturating_mul(1000)
    }
}

/// Load settings from settings.json, defaults when the file doesn't exist
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file: {}", path.display()))?;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
