//! Default configuration constants.
//!
//! Keeping defaults in one module lets the config types, the env layer, and
//! the presenter share the same literals.

/// Embedded default `slidekit.toml` template written by `slidekit init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/slidekit.toml");
/// Config file name used for local and global lookup.
pub(super) const CONFIG_FILE_NAME: &str = "slidekit.toml";
/// Per-user config directory name under the config root.
pub(super) const CONFIG_DIR_NAME: &str = "slidekit";
/// Default coalescing window for repeated "next" presses.
pub(super) const DEFAULT_DEBOUNCE_MS: u64 = 200;
/// Default terminal theme.
pub(super) const DEFAULT_THEME: &str = "dark";
/// Default syntect theme for code panes.
pub const DEFAULT_CODE_THEME: &str = "base16-ocean.dark";
/// Default code pane background.
pub const DEFAULT_CODE_BACKGROUND: &str = "black";
