//! Application entry orchestration for the slidekit CLI.

use slidekit::config::load_config;
use slidekit::deck::load_deck_file;
use slidekit::presenter::PresentationSettings;

use crate::app::check_mode::deck_outline;
use crate::app::init_flow::run_init;
use crate::app::logging::{init_tracing, LogTarget};
use crate::app::present_mode::run_present_mode;
use crate::cli::{Args, Command};

/// Run the parsed command and return the process exit code.
pub(crate) async fn run(args: Args) -> i32 {
    let (presenting, log_file) = match &args.command {
        Command::Present(present) => (true, present.log_file.as_deref()),
        _ => (false, None),
    };
    if let Err(e) = init_tracing(LogTarget::for_command(presenting, log_file)) {
        eprintln!("warning: failed to open log file: {e}");
    }

    if let Command::Init { force } = &args.command {
        return match run_init(*force) {
            Ok(message) => {
                println!("{message}");
                0
            }
            Err(e) => {
                eprintln!("error: {e}");
                1
            }
        };
    }

    let loaded = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    tracing::debug!(source = %loaded.source, "config loaded");
    let mut config = loaded.config;
    if args.no_color {
        config.display.color = false;
    }

    match &args.command {
        Command::Present(present) => match run_present_mode(present, &config).await {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("error: {e}");
                1
            }
        },
        Command::Check { deck } => match load_deck_file(deck) {
            Ok(file) => {
                let settings =
                    PresentationSettings::resolve(&config.presentation, &file, None, None);
                println!("{}", deck_outline(&file, &settings, &config.display));
                0
            }
            Err(e) => {
                eprintln!("error: {}: {e}", deck.display());
                1
            }
        },
        Command::Init { .. } => 0,
    }
}
