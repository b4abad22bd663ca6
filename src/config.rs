//! Startup configuration read from the environment.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::settings::SETTINGS_DIR_ENV;
use crate::core::LayoutName;

pub const SEED_ENV: &str = "MAHJONG_SEED";
pub const LAYOUT_ENV: &str = "MAHJONG_LAYOUT";

/// Launch options for the terminal game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// RNG seed for the first deal.
    pub seed: u32,
    /// Layout forced for this run; overrides the stored setting.
    pub layout: Option<LayoutName>,
    /// Directory holding the settings blob.
    pub settings_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing or unparsable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty(SEED_ENV)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let layout = non_empty(LAYOUT_ENV).and_then(|s| LayoutName::from_str(&s));

        let settings_dir = non_empty(SETTINGS_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            seed,
            layout,
            settings_dir,
        }
    }
}

/// Seed from the wall clock (sub-second bits mixed in).
fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos().rotate_left(16)
}
