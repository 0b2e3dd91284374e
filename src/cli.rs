//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use slidekit::build_info::{HELP_BUILD_METADATA, LONG_VERSION};
use slidekit::input::KeyboardControls;
use std::path::PathBuf;

/// Present slide decks in the terminal, revealing each slide element by element.
#[derive(Debug, Parser)]
#[command(
    name = "slidekit",
    version,
    long_version = LONG_VERSION,
    after_help = HELP_BUILD_METADATA
)]
pub struct Args {
    /// Path to config file (default: ./slidekit.toml or ~/.config/slidekit/slidekit.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Present a deck.
    Present(PresentArgs),
    /// Validate a deck file and print its outline.
    Check {
        /// Deck file (TOML).
        deck: PathBuf,
    },
    /// Write the default config to ~/.config/slidekit/slidekit.toml.
    Init {
        /// Overwrite an existing config after backing it up.
        #[arg(long = "force")]
        force: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct PresentArgs {
    /// Deck file (TOML).
    pub deck: PathBuf,

    /// Keyboard controls for every slide: arrows, space or disabled.
    #[arg(long = "controls", value_parser = parse_controls)]
    pub controls: Option<KeyboardControls>,

    /// Press-coalescing window in milliseconds.
    #[arg(long = "debounce-ms")]
    pub debounce_ms: Option<u64>,

    /// UI theme name.
    #[arg(long = "theme")]
    pub theme: Option<String>,

    /// Run an audience replica in-process and show its position.
    #[arg(long = "mirror")]
    pub mirror: bool,

    /// Write logs here while presenting (the screen is in raw mode).
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_controls(value: &str) -> Result<KeyboardControls, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "arrows" => Ok(KeyboardControls::Arrows),
        "space" => Ok(KeyboardControls::Space),
        "disabled" | "none" => Ok(KeyboardControls::Disabled),
        other => Err(format!(
            "unsupported controls `{other}` (expected arrows, space or disabled)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;
    use slidekit::input::KeyboardControls;

    #[test]
    fn present_parses_flags() {
        let args = Args::parse_from([
            "slidekit",
            "present",
            "talk.toml",
            "--controls",
            "space",
            "--mirror",
            "--debounce-ms",
            "150",
        ]);
        let Command::Present(present) = args.command else {
            panic!("expected present");
        };
        assert_eq!(present.deck.to_str(), Some("talk.toml"));
        assert_eq!(present.controls, Some(KeyboardControls::Space));
        assert_eq!(present.debounce_ms, Some(150));
        assert!(present.mirror);
        assert!(present.log_file.is_none());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let args = Args::parse_from(["slidekit", "check", "talk.toml", "-c", "alt.toml", "--no-color"]);
        assert!(matches!(args.command, Command::Check { .. }));
        assert_eq!(args.config.as_deref().and_then(|p| p.to_str()), Some("alt.toml"));
        assert!(args.no_color);
    }

    #[test]
    fn unknown_controls_are_rejected() {
        let result = Args::try_parse_from(["slidekit", "present", "talk.toml", "--controls", "mouse"]);
        assert!(result.is_err());
    }

    #[test]
    fn init_force() {
        let args = Args::parse_from(["slidekit", "init", "--force"]);
        assert!(matches!(args.command, Command::Init { force: true }));
    }
}
