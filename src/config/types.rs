//! Configuration data model.
//!
//! Struct/enum definitions plus default values. Source discovery, env
//! overrides, and validation live in sibling modules.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::input::KeyboardControls;

use super::defaults::{
    DEFAULT_CODE_BACKGROUND, DEFAULT_CODE_THEME, DEFAULT_DEBOUNCE_MS, DEFAULT_THEME,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub presentation: PresentationConfig,
    pub display: DisplayConfig,
    /// Custom `[themes.<name>]` color overrides keyed by theme token.
    pub themes: BTreeMap<String, BTreeMap<String, String>>,
}

/// Navigation behavior shared by every slide.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresentationConfig {
    pub keyboard_controls: KeyboardControls,
    /// Animate element reveals when stepping backwards.
    pub animations_when_going_back: bool,
    pub debounce_ms: u64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            keyboard_controls: KeyboardControls::Arrows,
            animations_when_going_back: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl PresentationConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Display / rendering preferences.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub theme: String,
    /// syntect theme used by code panes without their own `theme`.
    pub code_theme: String,
    pub code_background: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            theme: DEFAULT_THEME.to_string(),
            code_theme: DEFAULT_CODE_THEME.to_string(),
            code_background: DEFAULT_CODE_BACKGROUND.to_string(),
        }
    }
}

/// Where the active configuration text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path.
    Explicit(PathBuf),
    /// `./slidekit.toml`.
    Local,
    /// Per-user config under the config root.
    Global(PathBuf),
    /// No file found; built-in defaults.
    BuiltInDefaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Global(path) => write!(f, "{}", path.display()),
            Self::Local => f.write_str("./slidekit.toml"),
            Self::BuiltInDefaults => f.write_str("built-in defaults"),
        }
    }
}

/// Configuration payload plus where it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Result of `slidekit init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}
