//! Runtime settings
//!
//! Read once at startup from a JSON file. Every field has a default, so a
//! missing file or a partial one is fine; nothing is ever written back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Environment variable that overrides the settings file location.
pub const SETTINGS_ENV: &str = "ARCADE_TRIO_SETTINGS";
const SETTINGS_FILE: &str = "arcade-trio.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay between Whack ticks in milliseconds
    pub whack_tick_ms: u64,
    /// Delay between Pong ticks in milliseconds
    pub pong_tick_ms: u64,
    /// Delay between Snake ticks in milliseconds
    pub snake_tick_ms: u64,
    /// Fixed RNG seed for reproducible serves and food; entropy when unset
    pub seed: Option<u64>,
    /// Log destination. Logging is off when unset, the terminal belongs to the UI.
    pub log_file: Option<PathBuf>,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            whack_tick_ms: 1,
            pong_tick_ms: 10,
            snake_tick_ms: 75,
            seed: None,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `$ARCADE_TRIO_SETTINGS`, or from `arcade-trio.json`
    /// next to the executable. A missing file yields the defaults.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&Self::settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text).map_err(|e| match e {
                AppError::SettingsParse { source, .. } => AppError::SettingsParse {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, AppError> {
        let settings: Settings =
            serde_json::from_str(text).map_err(|source| AppError::SettingsParse {
                path: PathBuf::new(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        let delays = [
            ("whack_tick_ms", self.whack_tick_ms),
            ("pong_tick_ms", self.pong_tick_ms),
            ("snake_tick_ms", self.snake_tick_ms),
        ];
        for (key, ms) in delays {
            if ms == 0 {
                return Err(AppError::InvalidSetting {
                    key,
                    reason: "tick delay must be at least 1 ms".to_string(),
                });
            }
        }
        Ok(())
    }

    fn settings_path() -> PathBuf {
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return PathBuf::from(path);
        }
        // Store next to the executable
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(SETTINGS_FILE);
            }
        }
        PathBuf::from(SETTINGS_FILE)
    }

    pub fn whack_delay(&self) -> Duration {
        Duration::from_millis(self.whack_tick_ms)
    }

    pub fn pong_delay(&self) -> Duration {
        Duration::from_millis(self.pong_tick_ms)
    }

    pub fn snake_delay(&self) -> Duration {
        Duration::from_millis(self.snake_tick_ms)
    }
}
