//! TOML settings file for the adapter.
//!
//! ```toml
//! [keyboard]
//! unicode_mode = true
//!
//! [clipboard]
//! enabled = true
//! auto_sync = false
//!
//! [logging]
//! level = "debug"
//!
//! [session]
//! desktop_width = 1920
//! desktop_height = 1080
//! ```
//!
//! Every section and field is optional; missing values take the defaults
//! below, and a missing file is the same as an empty one.

use std::path::{Path, PathBuf};

use rdp_input_core::DesktopSize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Schema ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdapterSettings {
    #[serde(default)]
    pub keyboard: KeyboardSettings,
    #[serde(default)]
    pub clipboard: ClipboardSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyboardSettings {
    /// Send printable characters as Unicode events instead of scan codes.
    #[serde(default)]
    pub unicode_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClipboardSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub auto_sync: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop_width: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop_height: Option<u16>,
}

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            auto_sync: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AdapterSettings {
    /// Requested desktop size; only set when both dimensions are.
    pub fn desktop_size(&self) -> Option<DesktopSize> {
        match (self.session.desktop_width, self.session.desktop_height) {
            (Some(width), Some(height)) => Some(DesktopSize::new(width, height)),
            _ => None,
        }
    }
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not
/// found", and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(path: &Path) -> Result<AdapterSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AdapterSettings::default()),
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `settings` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system failures or
/// [`SettingsError::Serialize`] if serialization fails.
pub fn save_settings(path: &Path, settings: &AdapterSettings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("rdp-input-settings-{}-{name}", std::process::id()))
            .join("settings.toml")
    }

    #[test]
    fn test_defaults() {
        let s = AdapterSettings::default();
        assert!(!s.keyboard.unicode_mode);
        assert!(s.clipboard.enabled);
        assert!(!s.clipboard.auto_sync);
        assert_eq!(s.logging.level, "info");
        assert_eq!(s.desktop_size(), None);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let s: AdapterSettings = toml::from_str("").expect("deserialize empty");
        assert_eq!(s, AdapterSettings::default());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[keyboard]
unicode_mode = true

[session]
desktop_width = 1280
desktop_height = 720
"#;

        // Act
        let s: AdapterSettings = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert!(s.keyboard.unicode_mode);
        assert!(s.clipboard.enabled, "untouched section keeps its defaults");
        assert_eq!(s.desktop_size(), Some(DesktopSize::new(1280, 720)));
    }

    #[test]
    fn test_desktop_size_requires_both_dimensions() {
        let mut s = AdapterSettings::default();
        s.session.desktop_width = Some(1024);
        assert_eq!(s.desktop_size(), None);
    }

    #[test]
    fn test_unset_desktop_size_is_omitted_from_output() {
        let toml_str = toml::to_string_pretty(&AdapterSettings::default()).expect("serialize");
        assert!(!toml_str.contains("desktop_width"));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/settings.toml");
        assert_eq!(load_settings(&path).unwrap(), AdapterSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        // Arrange
        let path = temp_path("save-load");
        let mut settings = AdapterSettings::default();
        settings.keyboard.unicode_mode = true;
        settings.logging.level = "debug".to_string();

        // Act
        save_settings(&path, &settings).expect("save");
        let loaded = load_settings(&path).expect("load");

        // Assert
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_malformed_file_returns_parse_error() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_settings(&path);

        assert!(matches!(result, Err(SettingsError::Parse(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
