//! `slidekit init`: write the default config template.

use slidekit::config::{initialize_default_config, ConfigInitResult};
use slidekit::error::ConfigError;

pub(crate) fn run_init(force: bool) -> Result<String, ConfigError> {
    initialize_default_config(force).map(|result| init_message(&result))
}

pub(crate) fn init_message(result: &ConfigInitResult) -> String {
    match result {
        ConfigInitResult::Created { path } => {
            format!("wrote default config to {}", path.display())
        }
        ConfigInitResult::AlreadyInitialized { path } => format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ),
        ConfigInitResult::Overwritten { path, backup_path } => format!(
            "overwrote {} (previous config saved to {})",
            path.display(),
            backup_path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn messages_name_the_paths() {
        let created = init_message(&ConfigInitResult::Created {
            path: PathBuf::from("/tmp/slidekit.toml"),
        });
        assert_eq!(created, "wrote default config to /tmp/slidekit.toml");

        let existing = init_message(&ConfigInitResult::AlreadyInitialized {
            path: PathBuf::from("/tmp/slidekit.toml"),
        });
        assert!(existing.contains("--force"));

        let overwritten = init_message(&ConfigInitResult::Overwritten {
            path: PathBuf::from("/tmp/slidekit.toml"),
            backup_path: PathBuf::from("/tmp/slidekit.toml.bak"),
        });
        assert!(overwritten.contains("/tmp/slidekit.toml.bak"));
    }
}
