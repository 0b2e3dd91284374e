//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::ui::theme::parse_color;

use super::env::apply_env_overrides;
use super::init::config_root_dir;
use super::sources::read_config_text_with_sources;
use super::{Config, LoadedConfig};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&Path>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    validate_config(&config)?;
    apply_env_overrides(&mut config, &env_lookup)?;
    tracing::debug!(%source, "configuration loaded");
    Ok(LoadedConfig { config, source })
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.presentation.debounce_ms == 0 {
        return Err(ConfigError::Invalid(
            "presentation.debounce_ms must be at least 1".to_string(),
        ));
    }
    for (theme, values) in &config.themes {
        for (token, value) in values {
            parse_color(value).map_err(|err| {
                ConfigError::Invalid(format!("themes.{theme}.{token}: {err}"))
            })?;
        }
    }
    Ok(())
}
