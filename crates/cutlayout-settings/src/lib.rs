//! Cutlayout Settings Crate
//!
//! Editor configuration: drag tuning, display precision, and heading
//! templates, stored as JSON or TOML in the platform config directory.

pub mod config;
pub mod error;

pub use config::{DisplaySettings, DragSettings, EditorConfig};
pub use error::{ConfigError, SettingsError, SettingsResult};
