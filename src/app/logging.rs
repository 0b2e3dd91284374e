//! tracing-subscriber setup.
//!
//! While presenting the terminal is in raw mode on the alternate screen, so
//! logs go to `--log-file` or nowhere. Other commands log to stderr.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SLIDEKIT_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Where log lines go for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

impl<'a> LogTarget<'a> {
    pub(crate) fn for_command(presenting: bool, log_file: Option<&'a Path>) -> Self {
        match (presenting, log_file) {
            (_, Some(path)) => Self::File(path),
            (true, None) => Self::Discard,
            (false, None) => Self::Stderr,
        }
    }
}

pub(crate) fn init_tracing(target: LogTarget<'_>) -> io::Result<()> {
    let (writer, ansi) = match target {
        LogTarget::Stderr => (BoxMakeWriter::new(io::stderr), true),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        LogTarget::Discard => (BoxMakeWriter::new(io::sink), false),
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::LogTarget;
    use std::path::Path;

    #[test]
    fn presenting_without_log_file_discards() {
        assert_eq!(LogTarget::for_command(true, None), LogTarget::Discard);
        assert_eq!(LogTarget::for_command(false, None), LogTarget::Stderr);
        let path = Path::new("slidekit.log");
        assert_eq!(
            LogTarget::for_command(true, Some(path)),
            LogTarget::File(path)
        );
    }
}
