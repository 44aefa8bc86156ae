//! Settings Persistence
//!
//! Stores user preferences for the CLI and editor session in
//! `{config_dir}/wscribe/settings.json`. Missing fields fall back to
//! defaults and out-of-range values are clamped on load and save, so an old
//! or hand-edited file never blocks a run.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{
    formats::ExportFormat, fs::atomic_write_json_pretty, grouping::DEFAULT_CHUNK_SIZE,
    CoreError, CoreResult, Millis, View,
};

/// Settings schema version for migration support
pub const SETTINGS_VERSION: u32 = 1;

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Advisory lock file shared by concurrent CLI processes
pub const SETTINGS_LOCK_FILE: &str = "settings.json.lock";

const MAX_CHUNK_SIZE: usize = 1_000;
const MAX_TAIL_PLACEHOLDER_MS: Millis = 600_000.0;

// =============================================================================
// Settings Sections
// =============================================================================

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub grouping: GroupingSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub timestamp: TimestampSettings,

    #[serde(default)]
    pub editor: EditorSettings,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            grouping: GroupingSettings::default(),
            export: ExportSettings::default(),
            timestamp: TimestampSettings::default(),
            editor: EditorSettings::default(),
        }
    }
}

impl AppSettings {
    /// Corrects bad values in place instead of failing
    pub fn normalize(&mut self) {
        self.version = SETTINGS_VERSION;

        self.grouping.chunk_size = self.grouping.chunk_size.clamp(1, MAX_CHUNK_SIZE);

        self.editor.tail_placeholder_ms = clamp_f64(
            self.editor.tail_placeholder_ms,
            1.0,
            MAX_TAIL_PLACEHOLDER_MS,
            default_tail_placeholder_ms(),
        );
        if self.editor.placeholder_before.trim().is_empty() {
            self.editor.placeholder_before = default_placeholder_before();
        }
        if self.editor.placeholder_after.trim().is_empty() {
            self.editor.placeholder_after = default_placeholder_after();
        }
    }
}

fn clamp_f64(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, max)
}

/// Chunking of subtitle lines into transcript paragraphs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupingSettings {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for GroupingSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

/// Defaults for `convert` and `edit` when no flag is given
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    #[serde(default)]
    pub default_format: ExportFormat,

    #[serde(default)]
    pub default_view: View,

    /// Directory for timestamped exports; `None` means the working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

/// Timestamp rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimestampSettings {
    /// Round the millisecond remainder in human-facing output
    #[serde(default)]
    pub trim_fractional: bool,
}

/// Editor session behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    /// Length of a placeholder inserted after the last segment
    #[serde(default = "default_tail_placeholder_ms")]
    pub tail_placeholder_ms: Millis,

    #[serde(default = "default_placeholder_before")]
    pub placeholder_before: String,

    #[serde(default = "default_placeholder_after")]
    pub placeholder_after: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tail_placeholder_ms: default_tail_placeholder_ms(),
            placeholder_before: default_placeholder_before(),
            placeholder_after: default_placeholder_after(),
        }
    }
}

fn default_tail_placeholder_ms() -> Millis {
    1_000.0
}

fn default_placeholder_before() -> String {
    "placeholder text added before".to_string()
}

fn default_placeholder_after() -> String {
    "placeholder text added after".to_string()
}

// =============================================================================
// Settings Manager
// =============================================================================

/// Platform default settings directory, e.g. `~/.config/wscribe`
pub fn default_settings_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wscribe"))
}

/// Loads, saves and resets the settings file under an advisory lock
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            settings_path: config_dir.join(SETTINGS_FILE),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    fn lock_path(&self) -> PathBuf {
        self.settings_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(SETTINGS_LOCK_FILE)
    }

    fn with_lock<T>(&self, exclusive: bool, op: impl FnOnce() -> CoreResult<T>) -> CoreResult<T> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        if exclusive {
            fs2::FileExt::lock_exclusive(&lock_file)?;
        } else {
            fs2::FileExt::lock_shared(&lock_file)?;
        }

        let result = op();

        if let Err(e) = fs2::FileExt::unlock(&lock_file) {
            warn!("Failed to unlock settings lock file: {}", e);
        }

        result
    }

    /// Reads the settings file, or the defaults if it is missing or unreadable
    pub fn load(&self) -> AppSettings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                AppSettings::default()
            }
        }
    }

    /// Reads the settings file, surfacing read and parse failures
    pub fn try_load(&self) -> CoreResult<AppSettings> {
        self.with_lock(false, || {
            if !self.settings_path.exists() {
                info!("Settings file not found, using defaults");
                return Ok(AppSettings::default());
            }

            let content = fs::read_to_string(&self.settings_path)?;
            let mut settings = serde_json::from_str::<AppSettings>(&content)?;

            if settings.version < SETTINGS_VERSION {
                info!(
                    "Migrating settings from version {} to {}",
                    settings.version, SETTINGS_VERSION
                );
            }
            settings.normalize();
            Ok(settings)
        })
    }

    /// Normalizes and persists `settings`, returning what was written
    pub fn save(&self, settings: &AppSettings) -> CoreResult<AppSettings> {
        self.with_lock(true, || {
            let mut normalized = settings.clone();
            normalized.normalize();

            atomic_write_json_pretty(&self.settings_path, &normalized)?;
            info!("Settings saved to {}", self.settings_path.display());
            Ok(normalized)
        })
    }

    /// Deletes the settings file and returns the defaults
    pub fn reset(&self) -> CoreResult<AppSettings> {
        self.with_lock(true, || {
            match fs::remove_file(&self.settings_path) {
                Ok(()) => info!("Settings file deleted"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(CoreError::IoError(e)),
            }
            Ok(AppSettings::default())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
