//! Settings persistence - one JSON blob under a fixed namespace
//!
//! The blob holds the theme, the chosen layout, the sound flag and the best
//! completion time per layout. Loading never fails: a missing or corrupt blob
//! yields the defaults, and missing fields are filled from them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Namespace the blob is stored under.
pub const SETTINGS_NAMESPACE: &str = "mahjong-settings";

/// Environment variable naming the settings directory (read by the binary's config).
pub const SETTINGS_DIR_ENV: &str = "MAHJONG_SETTINGS_DIR";

pub const DEFAULT_THEME: &str = "green";
pub const DEFAULT_LAYOUT: &str = "turtle";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings blob is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: String,
    pub layout: String,
    pub sound_enabled: bool,
    /// Best completion time in milliseconds, keyed by layout name.
    pub best_times: BTreeMap<String, u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            layout: DEFAULT_LAYOUT.to_string(),
            sound_enabled: true,
            best_times: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn from_json(s: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn best_time(&self, layout: &str) -> Option<u64> {
        self.best_times.get(layout).copied()
    }

    /// Record `elapsed_ms` for `layout` if it beats the stored time.
    ///
    /// Returns true when the record changed.
    pub fn record_time(&mut self, layout: &str, elapsed_ms: u64) -> bool {
        match self.best_times.get(layout) {
            Some(&best) if best <= elapsed_ms => false,
            _ => {
                self.best_times.insert(layout.to_string(), elapsed_ms);
                true
            }
        }
    }
}

/// File-backed store for the settings blob.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store rooted in `dir`; the blob lives at `<dir>/mahjong-settings.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SETTINGS_NAMESPACE)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the blob, reporting why it could not be used.
    pub fn try_load(&self) -> Result<Settings, SettingsError> {
        let raw = fs::read_to_string(&self.path)?;
        Settings::from_json(&raw)
    }

    /// Read the blob, using defaults when it is absent or unusable.
    pub fn load(&self) -> Settings {
        self.try_load().unwrap_or_default()
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, settings.to_json()?)?;
        Ok(())
    }
}
