//! Editor configuration for cutlayout
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into two sections:
//! - Drag settings (push pass budget, drop snapping)
//! - Display settings (decimal places, heading and summary templates)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest accepted push pass budget.
pub const MAX_PUSH_PASSES_LIMIT: u32 = 64;
/// Largest accepted number of display decimals.
pub const MAX_DECIMALS: usize = 6;

/// Drag behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Passes allowed when pushing a dropped piece clear on another sheet
    pub max_push_passes: u32,
    /// Round committed positions to whole units when still valid
    pub snap_to_whole_units: bool,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            max_push_passes: 3,
            snap_to_whole_units: true,
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimal places for waste percentages
    pub decimals: usize,
    /// Per-sheet heading; `{number}` and `{waste}` are substituted
    pub heading_template: String,
    /// Job summary; `{count}` and `{waste}` are substituted
    pub summary_template: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            decimals: 1,
            heading_template: "Sheet {number} — Waste: {waste}%".to_string(),
            summary_template: "{count} sheet(s) — Overall waste: {waste}%".to_string(),
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Drag settings
    pub drag: DragSettings,
    /// Display settings
    pub display: DisplaySettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config dir>/cutlayout/editor.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("cutlayout").join("editor.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "editor config loaded");
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no editor config; using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drag.max_push_passes == 0 || self.drag.max_push_passes > MAX_PUSH_PASSES_LIMIT {
            return Err(ConfigError::ValueOutOfRange {
                key: "drag.max_push_passes".to_string(),
                value: self.drag.max_push_passes.to_string(),
            });
        }

        if self.display.decimals > MAX_DECIMALS {
            return Err(ConfigError::ValueOutOfRange {
                key: "display.decimals".to_string(),
                value: self.display.decimals.to_string(),
            });
        }

        for (key, template, placeholder) in [
            ("display.heading_template", &self.display.heading_template, "{number}"),
            ("display.summary_template", &self.display.summary_template, "{waste}"),
        ] {
            if !template.contains(placeholder) {
                return Err(ConfigError::MissingPlaceholder {
                    key: key.to_string(),
                    placeholder: placeholder.to_string(),
                });
            }
        }

        Ok(())
    }
}
