//! Compile-time build metadata exposed to the CLI.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("SLIDEKIT_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("SLIDEKIT_BUILD_TIMESTAMP");

/// Version block printed by `slidekit --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("SLIDEKIT_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("SLIDEKIT_BUILD_TIMESTAMP")
);

/// Help trailer block that surfaces build metadata in `slidekit --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("SLIDEKIT_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("SLIDEKIT_BUILD_TIMESTAMP")
);
