//! Error types for the outer surfaces (config, deck files, presenter).
//!
//! The slide/deck state machines themselves never fail: unknown actions and
//! inactive slides are identity no-ops.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// DeckFileError
// ---------------------------------------------------------------------------

/// Errors when reading a deck description file.
#[derive(Debug)]
pub enum DeckFileError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    /// The file parsed but describes an unusable deck.
    Invalid(String),
}

impl fmt::Display for DeckFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid deck: {msg}"),
        }
    }
}

impl std::error::Error for DeckFileError {}

impl From<std::io::Error> for DeckFileError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for DeckFileError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// PresentError (top-level)
// ---------------------------------------------------------------------------

/// Top-level error type for the presenter binary.
#[derive(Debug)]
pub enum PresentError {
    /// Terminal setup, drawing, or input failure.
    Io(std::io::Error),
    Config(ConfigError),
    Deck(DeckFileError),
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "terminal: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Deck(e) => write!(f, "deck: {e}"),
        }
    }
}

impl std::error::Error for PresentError {}

impl From<std::io::Error> for PresentError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for PresentError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<DeckFileError> for PresentError {
    fn from(e: DeckFileError) -> Self {
        Self::Deck(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn deck_error_invalid_message() {
        let e = DeckFileError::Invalid("deck has no slides".into());
        assert_eq!(e.to_string(), "invalid deck: deck has no slides");
    }

    #[test]
    fn present_error_wraps_sources() {
        let e = PresentError::from(DeckFileError::Invalid("empty".into()));
        assert!(e.to_string().starts_with("deck:"), "got: {e}");

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = PresentError::from(ConfigError::from(io_err));
        assert!(e.to_string().starts_with("config:"), "got: {e}");
    }
}
