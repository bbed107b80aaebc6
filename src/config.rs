//! Configuration for the display widget.
//!
//! Settings are plain serde structs stored as JSON. Every field has a
//! default, so partial files (or files from older versions) load fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTOSCROLL_INTERVAL_MS, AUTOSCROLL_MARGIN, AUTOSCROLL_STEP, DEFAULT_BACKGROUND_SHADE,
    DEFAULT_ZOOM, MIN_SELECTION_SIZE, SENSOR_SIZE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::error::{DisplayError, Result};
use crate::keybindings::KeyBindings;

/// Log level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// File name used under the platform config directory.
const CONFIG_FILE_NAME: &str = "display.json";

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Version of the configuration file format
    pub version: u32,

    #[serde(default)]
    pub zoom: ZoomConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub autoscroll: AutoScrollConfig,

    /// Gray level around the image (0 = black, 255 = white)
    #[serde(default = "default_background_shade")]
    pub background_shade: u8,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_background_shade() -> u8 {
    DEFAULT_BACKGROUND_SHADE
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            zoom: ZoomConfig::default(),
            selection: SelectionConfig::default(),
            autoscroll: AutoScrollConfig::default(),
            background_shade: default_background_shade(),
            log_level: LogLevel::default(),
            keybindings: KeyBindings::default(),
        }
    }
}

/// Zoom limits and stepping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Zoom applied to newly loaded images
    pub default_zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Factor per wheel notch
    pub zoom_step: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            min_zoom: ZOOM_MIN,
            max_zoom: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Selection behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Whether left-drag draws a selection (otherwise it pans)
    pub enabled: bool,
    /// Handle size in view pixels
    pub sensor_size: f32,
    /// Released selections smaller than this in either dimension are dropped
    pub min_selection_size: u32,
    /// Fixed width / height ratio, if any
    pub aspect_ratio: Option<f32>,
    /// Redraw only the overlay while the selection changes
    pub use_fast_selector: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sensor_size: SENSOR_SIZE,
            min_selection_size: MIN_SELECTION_SIZE,
            aspect_ratio: None,
            use_fast_selector: true,
        }
    }
}

/// Auto-scroll while dragging near a viewport edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollConfig {
    pub interval_ms: u64,
    /// Scene pixels per step
    pub step: f32,
    /// Width of the trigger band along each edge
    pub margin: f32,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            interval_ms: AUTOSCROLL_INTERVAL_MS,
            step: AUTOSCROLL_STEP,
            margin: AUTOSCROLL_MARGIN,
        }
    }
}

impl DisplayConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DisplayConfig = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(DisplayError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded display config from {:?}", path);
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        log::info!("Saved display config to {:?}", path);
        Ok(())
    }

    /// Platform config location, e.g. `~/.config/pixview/display.json`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(CONFIG_FILE_NAME))
            .ok_or(DisplayError::NoConfigDir)
    }

    /// There is no config directory on the web.
    #[cfg(target_arch = "wasm32")]
    pub fn default_path() -> Result<PathBuf> {
        Err(DisplayError::NoConfigDir)
    }

    /// Load from [`Self::default_path`], falling back to defaults if the file
    /// is missing or unreadable.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}", e);
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut config = DisplayConfig::default();
        config.selection.aspect_ratio = Some(1.5);
        config.background_shade = 40;
        config.log_level = LogLevel::Debug;

        let json = config.to_json().unwrap();
        let parsed = DisplayConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed =
            DisplayConfig::from_json(r#"{ "version": 1, "zoom": { "zoom_step": 2.0 } }"#).unwrap();
        assert_eq!(parsed.zoom.zoom_step, 2.0);
        assert_eq!(parsed.zoom.max_zoom, ZOOM_MAX);
        assert_eq!(parsed.selection, SelectionConfig::default());
        assert_eq!(parsed.background_shade, DEFAULT_BACKGROUND_SHADE);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = DisplayConfig::from_json(r#"{ "version": 99 }"#).unwrap_err();
        assert!(matches!(
            err,
            DisplayError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = DisplayConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DisplayError::Json(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("pixview-config-test-{}", std::process::id()));
        let path = dir.join("nested").join("display.json");

        let mut config = DisplayConfig::default();
        config.autoscroll.step = 7.0;
        config.save(&path).unwrap();

        let loaded = DisplayConfig::load(&path).unwrap();
        assert_eq!(loaded.autoscroll.step, 7.0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
        assert_eq!(LogLevel::default().name(), "Info");
    }
}
