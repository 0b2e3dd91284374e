//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`SLIDEKIT_DEBOUNCE_MS`,
//!    `SLIDEKIT_KEYBOARD_CONTROLS`, `SLIDEKIT_THEME`)
//! 2. TOML file specified via the `--config` flag
//! 3. `./slidekit.toml` in the current directory
//! 4. `$XDG_CONFIG_HOME/slidekit/slidekit.toml` (or
//!    `~/.config/slidekit/slidekit.toml`)
//! 5. Built-in defaults
//!
//! Deck files and command-line flags are applied on top by the presenter.

mod defaults;
mod env;
mod init;
mod loader;
mod sources;
mod types;

pub use defaults::{DEFAULT_CODE_BACKGROUND, DEFAULT_CODE_THEME};
pub use init::{config_root_dir, default_config_path, initialize_default_config};
pub use loader::load_config;
pub use types::{
    Config, ConfigInitResult, ConfigSource, DisplayConfig, LoadedConfig, PresentationConfig,
};
