//! Environment overrides.
//!
//! `SLIDEKIT_*` variables override file values for one run without editing
//! the config.

use crate::error::ConfigError;
use crate::input::KeyboardControls;

use super::Config;

pub(super) const ENV_DEBOUNCE_MS: &str = "SLIDEKIT_DEBOUNCE_MS";
pub(super) const ENV_KEYBOARD_CONTROLS: &str = "SLIDEKIT_KEYBOARD_CONTROLS";
pub(super) const ENV_THEME: &str = "SLIDEKIT_THEME";

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(value) = env_value(env_lookup, ENV_DEBOUNCE_MS) {
        let parsed = value.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_DEBOUNCE_MS} value `{value}`: expected positive integer milliseconds"
            ))
        })?;
        // Clamp to at least 1 ms.
        config.presentation.debounce_ms = parsed.max(1);
    }
    if let Some(value) = env_value(env_lookup, ENV_KEYBOARD_CONTROLS) {
        config.presentation.keyboard_controls = KeyboardControls::parse(&value);
    }
    if let Some(value) = env_value(env_lookup, ENV_THEME) {
        config.display.theme = value;
    }
    Ok(())
}

/// Trimmed, non-empty env value.
fn env_value<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
