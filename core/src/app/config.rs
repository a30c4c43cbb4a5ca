//! Project settings (window, renderer, input)
//!
//! Settings are plain data: construct them in code, or load them from a
//! TOML file next to the executable. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::InputConfig;

/// Settings error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level project settings.
///
/// Organized into sections, each independently defaultable so a settings
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProjectSettings {
    /// Window settings
    #[serde(default)]
    pub window: WindowConfig,
    /// Renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,
    /// Input settings
    #[serde(default)]
    pub input: InputConfig,
}

/// Window creation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title (default: "Talvi App")
    #[serde(default = "default_title")]
    pub title: String,
    /// Initial window width in logical pixels (default: 1280)
    #[serde(default = "default_width")]
    pub width: u32,
    /// Initial window height in logical pixels (default: 720)
    #[serde(default = "default_height")]
    pub height: u32,
    /// Whether the window can be resized by the user (default: false)
    #[serde(default)]
    pub resizable: bool,
    /// Whether to start in borderless fullscreen (default: false)
    #[serde(default)]
    pub fullscreen: bool,
}

/// Graphics backend preference. `Auto` lets the driver stack pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BackendPreference {
    #[default]
    Auto,
    Vulkan,
    Metal,
    Dx12,
    Gl,
}

/// Frame presentation pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VsyncMode {
    Disabled,
    #[default]
    Enabled,
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Graphics backend preference (default: Auto)
    #[serde(default)]
    pub backend: BackendPreference,
    /// Vertical sync mode (default: Enabled)
    #[serde(default)]
    pub vsync: VsyncMode,
}

fn default_title() -> String {
    "Talvi App".to_string()
}
fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            resizable: false,
            fullscreen: false,
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            backend: BackendPreference::default(),
            vsync: VsyncMode::default(),
        }
    }
}

impl ProjectSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: Self = toml::from_str(&content)?;
        settings.input.sanitize();
        Ok(settings)
    }

    /// Load settings from a TOML file, falling back to defaults if the
    /// file is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(
                    "Failed to load settings from {}: {} - using defaults",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================================
    // Default value tests
    // =============================================================

    #[test]
    fn test_settings_default() {
        let settings = ProjectSettings::default();
        assert_eq!(settings.window.title, "Talvi App");
        assert_eq!(settings.window.width, 1280);
        assert_eq!(settings.window.height, 720);
        assert!(!settings.window.resizable);
        assert!(!settings.window.fullscreen);
        assert_eq!(settings.renderer.backend, BackendPreference::Auto);
        assert_eq!(settings.renderer.vsync, VsyncMode::Enabled);
    }

    // =============================================================
    // TOML serialization tests
    // =============================================================

    #[test]
    fn test_settings_serialize_roundtrip() {
        let settings = ProjectSettings {
            window: WindowConfig {
                title: "Paddle".to_string(),
                width: 800,
                height: 600,
                resizable: true,
                fullscreen: false,
            },
            renderer: RendererConfig {
                backend: BackendPreference::Vulkan,
                vsync: VsyncMode::Disabled,
            },
            input: InputConfig::default(),
        };

        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: ProjectSettings = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_settings_deserialize_empty() {
        // Empty TOML should produce defaults
        let settings: ProjectSettings = toml::from_str("").unwrap();
        assert_eq!(settings, ProjectSettings::default());
    }

    #[test]
    fn test_settings_deserialize_partial_window() {
        // Only set the title, rest should default
        let toml_str = r#"
[window]
title = "Breakout"
"#;
        let settings: ProjectSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.window.title, "Breakout");
        assert_eq!(settings.window.width, 1280); // default
        assert_eq!(settings.renderer.vsync, VsyncMode::Enabled); // default
    }

    #[test]
    fn test_settings_deserialize_partial_input() {
        let toml_str = r#"
[input]
stick_deadzone = 0.25
"#;
        let settings: ProjectSettings = toml::from_str(toml_str).unwrap();
        assert!((settings.input.stick_deadzone - 0.25).abs() < f32::EPSILON);
        assert!((settings.input.trigger_deadzone - 0.1).abs() < f32::EPSILON);
    }

    // =============================================================
    // Load function tests
    // =============================================================

    #[test]
    fn test_load_missing_file_is_error() {
        let result = ProjectSettings::load("/nonexistent/talvi-settings.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_or_default_swallows_missing_file() {
        let settings = ProjectSettings::load_or_default("/nonexistent/talvi-settings.toml");
        assert_eq!(settings, ProjectSettings::default());
    }

    #[test]
    fn test_load_from_file_sanitizes_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[window]
title = "Pong"

[input]
stick_deadzone = 3.0
"#,
        )
        .unwrap();

        let settings = ProjectSettings::load(&path).unwrap();
        assert_eq!(settings.window.title, "Pong");
        // Out-of-range deadzone is clamped on load
        assert!(settings.input.stick_deadzone <= crate::input::MAX_DEADZONE);
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "window = 42").unwrap();

        let result = ProjectSettings::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
