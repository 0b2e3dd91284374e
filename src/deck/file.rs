//! Deck description files.
//!
//! A deck is a TOML document with a title, optional presentation overrides,
//! and one `[[slides]]` table per slide.

use std::path::Path;

use serde::Deserialize;

use crate::error::DeckFileError;
use crate::input::KeyboardControls;

/// Parsed deck file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckFile {
    #[serde(default)]
    pub title: String,
    /// Overrides `[presentation].keyboard_controls` for every slide.
    #[serde(default)]
    pub keyboard_controls: Option<KeyboardControls>,
    #[serde(default)]
    pub animations_when_going_back: Option<bool>,
    #[serde(default)]
    pub slides: Vec<SlideSpec>,
}

/// One `[[slides]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideSpec {
    #[serde(default)]
    pub title: String,
    /// Markdown snippets revealed one at a time.
    #[serde(default)]
    pub elements: Vec<String>,
    #[serde(default)]
    pub keyboard_controls: Option<KeyboardControls>,
    #[serde(default)]
    pub code: Option<CodeSpec>,
}

/// Optional read-only code pane shown under a slide's elements.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeSpec {
    /// Syntax token or file extension, e.g. `rust` or `rs`.
    #[serde(default)]
    pub language: Option<String>,
    pub source: String,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Parse and validate deck text.
pub fn parse_deck(text: &str) -> Result<DeckFile, DeckFileError> {
    let deck: DeckFile = toml::from_str(text)?;
    if deck.slides.is_empty() {
        return Err(DeckFileError::Invalid(
            "a deck needs at least one [[slides]] entry".to_string(),
        ));
    }
    Ok(deck)
}

/// Read and validate a deck file from disk.
pub fn load_deck_file(path: &Path) -> Result<DeckFile, DeckFileError> {
    let text = std::fs::read_to_string(path)?;
    let deck = parse_deck(&text)?;
    tracing::debug!(
        path = %path.display(),
        slides = deck.slides.len(),
        "loaded deck file"
    );
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;

    const SAMPLE: &str = r##"
title = "Talk"
keyboard_controls = "arrows"
animations_when_going_back = true

[[slides]]
title = "Intro"
elements = ["first point", "second point"]
keyboard_controls = "space"

[slides.code]
language = "rust"
background = "#101010"
theme = "base16-ocean.dark"
source = "fn main() {}"

[[slides]]
title = "Outro"
"##;

    #[test]
    fn parses_full_deck() {
        let deck = parse_deck(SAMPLE).expect("deck");
        assert_eq!(deck.title, "Talk");
        assert_eq!(deck.keyboard_controls, Some(KeyboardControls::Arrows));
        assert_eq!(deck.animations_when_going_back, Some(true));
        assert_eq!(deck.slides.len(), 2);

        let intro = &deck.slides[0];
        assert_eq!(intro.elements.len(), 2);
        assert_eq!(intro.keyboard_controls, Some(KeyboardControls::Space));
        let code = intro.code.as_ref().expect("code pane");
        assert_eq!(code.language.as_deref(), Some("rust"));
        assert_eq!(code.background.as_deref(), Some("#101010"));

        let outro = &deck.slides[1];
        assert!(outro.elements.is_empty());
        assert!(outro.code.is_none());
    }

    #[test]
    fn unsupported_controls_parse_as_disabled() {
        let deck = parse_deck("[[slides]]\nkeyboard_controls = \"mouse\"\n").expect("deck");
        assert_eq!(
            deck.slides[0].keyboard_controls,
            Some(KeyboardControls::Disabled)
        );
    }

    #[test]
    fn rejects_deck_without_slides() {
        let err = parse_deck("title = \"Empty\"\n").expect_err("must fail");
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse_deck("[[slides]]\nbullets = []\n").expect_err("must fail");
        assert!(matches!(err, DeckFileError::Toml(_)));
    }

    #[test]
    fn loads_from_disk() {
        let dir = TestTempDir::new("deck-file");
        let path = dir.path().join("talk.toml");
        std::fs::write(&path, SAMPLE).expect("write");
        let deck = load_deck_file(&path).expect("load");
        assert_eq!(deck.slides[0].title, "Intro");

        let missing = load_deck_file(&dir.path().join("nope.toml")).expect_err("missing");
        assert!(matches!(missing, DeckFileError::Io(_)));
    }
}
