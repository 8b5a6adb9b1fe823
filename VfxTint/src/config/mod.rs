//! User preferences persisted between runs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::project::DEFAULT_SESSION_NAME;
use crate::session::DEFAULT_RESET_HOLD;
use crate::transform::{DEFAULT_PALETTE, TransformOptions};

/// Master color used until the user picks one.
pub const DEFAULT_MASTER_COLOR: &str = "#ffffff";

/// Directory created under the chosen save location.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "output";

// Default value functions for serde
fn default_true() -> bool {
    true
}
fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(ToString::to_string).collect()
}
fn default_master_color() -> String {
    DEFAULT_MASTER_COLOR.to_string()
}
fn default_output_dir_name() -> String {
    DEFAULT_OUTPUT_DIR_NAME.to_string()
}
fn default_session_name() -> String {
    DEFAULT_SESSION_NAME.to_string()
}
fn default_reset_hold_ms() -> u64 {
    DEFAULT_RESET_HOLD.as_millis() as u64
}

/// Persistable preferences (saved to disk)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub ignore_grayscale: bool,
    #[serde(default = "default_true")]
    pub preserve_intensity: bool,
    /// Whether grayscale rows are listed.
    #[serde(default = "default_true")]
    pub show_grayscale: bool,
    #[serde(default = "default_palette")]
    pub shuffle_palette: Vec<String>,
    #[serde(default = "default_master_color")]
    pub master_color: String,
    /// Keyword dictionary to use instead of the bundled one. `~` is expanded.
    #[serde(default)]
    pub dictionary_path: Option<String>,
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,
    #[serde(default = "default_session_name")]
    pub session_name: String,
    #[serde(default = "default_reset_hold_ms")]
    pub reset_hold_ms: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            ignore_grayscale: true,
            preserve_intensity: true,
            show_grayscale: true,
            shuffle_palette: default_palette(),
            master_color: default_master_color(),
            dictionary_path: None,
            output_dir_name: default_output_dir_name(),
            session_name: default_session_name(),
            reset_hold_ms: default_reset_hold_ms(),
        }
    }
}

impl Preferences {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("VfxTint").join("config.json"))
    }

    /// Load preferences from disk, or return defaults
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load preferences from `path`; a missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            debug!("No preferences at {}, using defaults", path.display());
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring invalid preferences {}: {e}", path.display());
            Self::default()
        })
    }

    /// Save preferences to disk
    pub fn save(&self) -> crate::Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The transform toggles these preferences describe.
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions::new()
            .with_ignore_grayscale(self.ignore_grayscale)
            .with_preserve_intensity(self.preserve_intensity)
    }

    pub fn reset_hold(&self) -> Duration {
        Duration::from_millis(self.reset_hold_ms)
    }

    /// Configured dictionary path with `~` expanded.
    pub fn dictionary_path(&self) -> Option<PathBuf> {
        self.dictionary_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(|path| PathBuf::from(shellexpand::tilde(path).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_fills_defaults() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"ignore_grayscale": false, "session_name": "Fire"}"#).unwrap();
        assert!(!prefs.ignore_grayscale);
        assert_eq!(prefs.session_name, "Fire");
        assert_eq!(prefs.shuffle_palette, vec!["#ccffff", "#88eeee", "#66dddd"]);
        assert_eq!(prefs.output_dir_name, "output");
        assert_eq!(prefs.reset_hold(), Duration::from_millis(2000));
    }

    #[test]
    fn test_round_trip_and_broken_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let prefs = Preferences {
            master_color: "#ff8800".to_string(),
            ..Preferences::default()
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(Preferences::load_from(&path), prefs);

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Preferences::load_from(&path), Preferences::default());
        assert_eq!(Preferences::load_from(&dir.path().join("missing.json")), Preferences::default());
    }

    #[test]
    fn test_transform_options() {
        let prefs = Preferences {
            preserve_intensity: false,
            ..Preferences::default()
        };
        let options = prefs.transform_options();
        assert!(options.ignore_grayscale);
        assert!(!options.preserve_intensity);
    }
}
